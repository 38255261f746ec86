#![allow(dead_code)]

#[allow(non_upper_case_globals)]
#[rustfmt::skip]
const squiggle: &[Pos] = &[
    Pos { x: 0.0000, y: 0.0000, },
    Pos { x: 1.1421, y: 0.8763, },
    Pos { x: 2.0874, y: 1.9102, },
    Pos { x: 2.7331, y: 3.1184, },
    Pos { x: 3.0168, y: 4.4419, },
    Pos { x: 2.9026, y: 5.7633, },
    Pos { x: 2.4107, y: 6.9525, },
    Pos { x: 1.6042, y: 7.9011, },
    Pos { x: 0.5731, y: 8.5364, },
    Pos { x: -0.5731, y: 8.8152, },
    Pos { x: -1.7296, y: 8.7364, },
    Pos { x: -2.7812, y: 8.3009, },
    Pos { x: -3.6235, y: 7.5411, },
    Pos { x: -4.1786, y: 6.5248, },
    Pos { x: -4.4004, y: 5.3417, },
    Pos { x: -4.2781, y: 4.1035, },
    Pos { x: -3.8361, y: 2.9283, },
    Pos { x: -3.1296, y: 1.9233, },
    Pos { x: -2.2392, y: 1.1693, },
    Pos { x: -1.2631, y: 0.7136, },
];

use scrawl_curve::{Point, ToCurve};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Clone, Copy, Debug)]
struct Pos {
    pub x: f64,
    pub y: f64,
}

impl Point for Pos {
    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:.05},{:.05}", self.x, self.y)
    }
}

fn main() {
    let segments = 30;

    for curve in squiggle.fit(1.0, 1.0e-5) {
        for p in curve.flatten(segments) {
            println!("({p})");
        }
    }
}
