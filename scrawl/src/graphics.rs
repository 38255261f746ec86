use crate::sample::Sample;
use std::fmt::{Display, Formatter};

/// a position in canvas space, the coordinate system strokes are built in
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct CanvasPos {
    pub x: f64,
    pub y: f64,
}

impl CanvasPos {
    pub fn new(x: f64, y: f64) -> CanvasPos {
        CanvasPos { x, y }
    }
}

impl Display for CanvasPos {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.02},{:.02}", self.x, self.y)
    }
}

impl scrawl_curve::Point for CanvasPos {
    fn new(x: f64, y: f64) -> Self {
        CanvasPos { x, y }
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

/// one centerline vertex ready to be buffered by a render surface
#[derive(Default, Debug, Clone, Copy, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub struct StrokeVertex {
    pub x: f32,
    pub y: f32,
    pub force: f32,
}

impl From<&Sample> for StrokeVertex {
    fn from(sample: &Sample) -> StrokeVertex {
        StrokeVertex {
            x: sample.location.x as f32,
            y: sample.location.y as f32,
            force: sample.force() as f32,
        }
    }
}

impl Display for StrokeVertex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.02},{:.02},{:.02}", self.x, self.y, self.force)
    }
}
