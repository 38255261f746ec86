use crate::{graphics::CanvasPos, sample::Sample};
use scrawl_curve::Vec2;

/// the core container for any sequence of drawn points. insertion order is
/// stroke order and defines adjacency for interpolation
#[derive(Debug, Clone, Default)]
pub struct Spline {
    points: Vec<Sample>,
}

/// a point's immediate neighborhood in its spline. exactly one variant holds
/// for every valid index, so callers match instead of null checking
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Neighbors {
    NoNeighbors,
    PrecedingOnly(Sample),
    FollowingOnly(Sample),
    Both(Sample, Sample),
}

impl Spline {
    pub fn new() -> Spline {
        Spline::default()
    }

    pub fn with_points(points: Vec<Sample>) -> Spline {
        Spline { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Sample] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.points.get(index)
    }

    pub fn append(&mut self, sample: Sample) {
        self.points.push(sample);
    }

    /// overwrite an existing slot. an out of range index means the caller's
    /// bookkeeping disagrees with the spline, which is not recoverable
    pub fn replace(&mut self, index: usize, sample: Sample) {
        assert!(
            index < self.points.len(),
            "replace index {index} out of range for spline of {}",
            self.points.len(),
        );
        self.points[index] = sample;
    }

    /// truncate the trailing n entries
    pub fn remove_last(&mut self, n: usize) {
        assert!(
            n <= self.points.len(),
            "cannot remove {n} trailing points from spline of {}",
            self.points.len(),
        );
        let keep = self.points.len() - n;
        self.points.truncate(keep);
    }

    fn in_bounds(&self, index: isize) -> bool {
        0 <= index && (index as usize) < self.points.len()
    }

    pub fn neighbors(&self, index: usize) -> Neighbors {
        let prev = index as isize - 1;
        let next = index as isize + 1;
        match (self.in_bounds(prev), self.in_bounds(next)) {
            (true, true) => Neighbors::Both(
                self.points[index - 1],
                self.points[index + 1],
            ),
            (true, false) => Neighbors::PrecedingOnly(self.points[index - 1]),
            (false, true) => Neighbors::FollowingOnly(self.points[index + 1]),
            (false, false) => Neighbors::NoNeighbors,
        }
    }

    /// a lazy, restartable pass of positioned views over the points
    pub fn iter(&self) -> SplineIter<'_> {
        SplineIter {
            spline: self,
            index: 0,
        }
    }
}

pub struct SplineIter<'a> {
    spline: &'a Spline,
    index: usize,
}

impl<'a> Iterator for SplineIter<'a> {
    type Item = SplinePoint<'a>;

    fn next(&mut self) -> Option<SplinePoint<'a>> {
        if self.index >= self.spline.len() {
            return None;
        }

        let index = self.index;
        self.index += 1;
        Some(SplinePoint {
            spline: self.spline,
            index,
        })
    }
}

/// a point and its neighborhood, the unit the width offset engine works on
#[derive(Clone, Copy)]
pub struct SplinePoint<'a> {
    spline: &'a Spline,
    // in bounds by invariant
    index: usize,
}

/// the left and right offset points straddling a centerline sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rib {
    pub left: CanvasPos,
    pub right: CanvasPos,
}

impl<'a> SplinePoint<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn sample(&self) -> &'a Sample {
        &self.spline.points[self.index]
    }

    pub fn location(&self) -> CanvasPos {
        self.sample().location
    }

    pub fn force(&self) -> f64 {
        self.sample().force()
    }

    pub fn neighbors(&self) -> Neighbors {
        self.spline.neighbors(self.index)
    }

    /// the point at a relative offset, if it exists.
    /// relative(-1) is the immediate prior point, relative(0) is this one
    pub fn relative(&self, offset: isize) -> Option<&'a Sample> {
        let index = self.index as isize + offset;
        if self.spline.in_bounds(index) {
            Some(&self.spline.points[index as usize])
        } else {
            None
        }
    }

    /// the unit direction pointing to the left of the stroke at this point.
    ///
    /// with no neighbors there is no meaningful direction, so this falls back
    /// to the unit vector at angle 0. a degenerate chord normalizes through
    /// polar form to the same fallback rather than to NaN.
    pub fn left_direction(&self) -> Vec2 {
        match self.neighbors() {
            Neighbors::NoNeighbors => Vec2::unit_with_angle(0.),
            Neighbors::FollowingOnly(p) => Vec2::between(self.location(), p.location)
                .perpendicular()
                .into_unit(),
            Neighbors::PrecedingOnly(p) => -Vec2::between(self.location(), p.location)
                .perpendicular()
                .into_unit(),
            Neighbors::Both(first, second) => {
                let prev = Vec2::between(first.location, self.location());
                let next = Vec2::between(self.location(), second.location);
                // turns of less than half a rotation bend to the left
                let is_left = next.heading_relative_to(prev) < std::f64::consts::PI;
                let mean = Vec2::mean(prev, next).perpendicular().into_unit();
                if is_left {
                    mean
                } else {
                    -mean
                }
            }
        }
    }

    /// offset points at a fixed width
    pub fn rib(&self, width: f64) -> Rib {
        let left = self.left_direction();
        Rib {
            left: (width * left).offset(self.location()),
            right: (-width * left).offset(self.location()),
        }
    }

    /// offset points scaled by the sample's force
    pub fn weighted_rib(&self, width: f64) -> Rib {
        self.rib(width * self.force())
    }
}
