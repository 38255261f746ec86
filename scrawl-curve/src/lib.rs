use itertools::Itertools;

pub trait Point: Clone + Copy {
    fn new(x: f64, y: f64) -> Self;
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn zero() -> Self {
        Self::new(0., 0.)
    }
}

/// a 2d displacement, separate from positions so the polar helpers don't end
/// up on every coordinate type
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub dx: f64,
    pub dy: f64,
}

impl Vec2 {
    pub fn new(dx: f64, dy: f64) -> Vec2 {
        Vec2 { dx, dy }
    }

    pub fn between<P: Point>(from: P, to: P) -> Vec2 {
        Vec2 {
            dx: to.x() - from.x(),
            dy: to.y() - from.y(),
        }
    }

    pub fn from_polar(magnitude: f64, angle: f64) -> Vec2 {
        Vec2 {
            dx: magnitude * angle.cos(),
            dy: magnitude * angle.sin(),
        }
    }

    pub fn unit_with_angle(angle: f64) -> Vec2 {
        Vec2::from_polar(1., angle)
    }

    /// the angle in radians from the x axis
    pub fn angle(&self) -> f64 {
        self.dy.atan2(self.dx)
    }

    pub fn magnitude(&self) -> f64 {
        self.quadrance().sqrt()
    }

    /// squared magnitude, for threshold comparisons without a sqrt
    pub fn quadrance(&self) -> f64 {
        self.dx * self.dx + self.dy * self.dy
    }

    pub fn dot(&self, other: Vec2) -> f64 {
        self.dx * other.dx + self.dy * other.dy
    }

    /// the angle of this vector relative to another, in [0, pi]
    pub fn heading_relative_to(&self, other: Vec2) -> f64 {
        (self.dot(other) / (self.magnitude() * other.magnitude())).acos()
    }

    /// unit vector with the same angle. goes through polar form, so the zero
    /// vector maps to the unit vector at angle 0 rather than to NaN
    pub fn into_unit(self) -> Vec2 {
        Vec2::unit_with_angle(self.angle())
    }

    /// the 90 degree left rotation
    pub fn perpendicular(self) -> Vec2 {
        Vec2 {
            dx: -self.dy,
            dy: self.dx,
        }
    }

    pub fn mean(v1: Vec2, v2: Vec2) -> Vec2 {
        Vec2 {
            dx: (v1.dx + v2.dx) / 2.,
            dy: (v1.dy + v2.dy) / 2.,
        }
    }

    /// the point displaced by this vector
    pub fn offset<P: Point>(self, p: P) -> P {
        P::new(p.x() + self.dx, p.y() + self.dy)
    }
}

impl std::ops::Mul<Vec2> for f64 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            dx: self * rhs.dx,
            dy: self * rhs.dy,
        }
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2 {
            dx: -self.dx,
            dy: -self.dy,
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            dx: self.dx + rhs.dx,
            dy: self.dy + rhs.dy,
        }
    }
}

/// the two cubic Bezier control points interpolating between the middle pair
/// of a four point window
#[derive(Debug, Clone, Copy)]
pub struct ControlPoints<P: Point> {
    pub c1: P,
    pub c2: P,
}

/// derive cubic Bezier control points for a Catmull-Rom interpolation between
/// p1 and p2. callers substitute p0 = p1 or p3 = p2 at sequence boundaries.
///
/// all three chord lengths are guarded against epsilon: a degenerate middle
/// chord collapses both control points onto the endpoints, a degenerate outer
/// chord collapses only its own side.
pub fn catmull_rom<P: Point>(
    p0: P,
    p1: P,
    p2: P,
    p3: P,
    alpha: f64,
    epsilon: f64,
) -> ControlPoints<P> {
    let d01 = Vec2::between(p0, p1).magnitude();
    let d12 = Vec2::between(p1, p2).magnitude();
    let d23 = Vec2::between(p2, p3).magnitude();

    if d12 < epsilon {
        return ControlPoints { c1: p1, c2: p2 };
    }

    let d12a = d12.powf(alpha);
    let d12a2 = d12.powf(2. * alpha);

    let c1 = if d01 < epsilon {
        p1
    } else {
        let d01a = d01.powf(alpha);
        let d01a2 = d01.powf(2. * alpha);
        let m = 2. * d01a2 + 3. * d01a * d12a + d12a2;
        let div = 3. * d01a * (d01a + d12a);
        P::new(
            (d01a2 * p2.x() - d12a2 * p0.x() + m * p1.x()) / div,
            (d01a2 * p2.y() - d12a2 * p0.y() + m * p1.y()) / div,
        )
    };

    let c2 = if d23 < epsilon {
        p2
    } else {
        let d23a = d23.powf(alpha);
        let d23a2 = d23.powf(2. * alpha);
        let m = 2. * d23a2 + 3. * d23a * d12a + d12a2;
        let div = 3. * d23a * (d23a + d12a);
        P::new(
            (d23a2 * p1.x() - d12a2 * p3.x() + m * p2.x()) / div,
            (d23a2 * p1.y() - d12a2 * p3.y() + m * p2.y()) / div,
        )
    };

    ControlPoints { c1, c2 }
}

#[derive(Debug, Clone, Copy)]
pub struct Cubic<P: Point> {
    pub a: P,
    pub b: P,
    pub c: P,
    pub d: P,
}

pub fn steps(steps: usize) -> impl Iterator<Item = f64> {
    (0..=steps).map(move |t| t as f64 / steps as f64)
}

impl<P: Point> Cubic<P> {
    /// polynomial-form evaluation. agrees with casteljau to rounding
    pub fn weighted_basis(&self, t: f64) -> P {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1. - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;
        P::new(
            mt3 * self.a.x()
                + 3. * mt2 * t * self.b.x()
                + 3. * mt * t2 * self.c.x()
                + t3 * self.d.x(),
            mt3 * self.a.y()
                + 3. * mt2 * t * self.b.y()
                + 3. * mt * t2 * self.c.y()
                + t3 * self.d.y(),
        )
    }

    pub fn casteljau(&self, t: f64) -> P {
        let tn = 1. - t;
        let ab_x = self.a.x() * tn + self.b.x() * t;
        let ab_y = self.a.y() * tn + self.b.y() * t;
        let bc_x = self.b.x() * tn + self.c.x() * t;
        let bc_y = self.b.y() * tn + self.c.y() * t;
        let cd_x = self.c.x() * tn + self.d.x() * t;
        let cd_y = self.c.y() * tn + self.d.y() * t;
        let ab_bc_x = ab_x * tn + bc_x * t;
        let ab_bc_y = ab_y * tn + bc_y * t;
        let bc_cd_x = bc_x * tn + cd_x * t;
        let bc_cd_y = bc_y * tn + cd_y * t;
        let x = ab_bc_x * tn + bc_cd_x * t;
        let y = ab_bc_y * tn + bc_cd_y * t;
        P::new(x, y)
    }

    pub fn flatten(&self, segments: usize) -> Vec<P> {
        steps(segments).map(|t| self.casteljau(t)).collect()
    }

    pub fn derivative(&self, t: f64) -> P {
        let tn = 1. - t;
        let dx = 3. * tn * tn * (self.b.x() - self.a.x())
            + 6. * tn * t * (self.c.x() - self.b.x())
            + 3. * t * t * (self.d.x() - self.c.x());
        let dy = 3. * tn * tn * (self.b.y() - self.a.y())
            + 6. * tn * t * (self.c.y() - self.b.y())
            + 3. * t * t * (self.d.y() - self.c.y());
        P::new(dx, dy)
    }

    pub fn direction(&self, t: f64) -> P {
        let tan = self.derivative(t);
        let d = (tan.x() * tan.x() + tan.y() * tan.y()).sqrt();
        P::new(tan.x() / d, tan.y() / d)
    }

    pub fn normal(&self, t: f64) -> P {
        let dir = self.direction(t);
        P::new(-dir.y(), dir.x())
    }
}

pub trait ToCurve<P: Point> {
    /// fit one cubic per interior segment, duplicating the endpoints to stand
    /// in for the missing outer neighbors
    fn fit(&self, alpha: f64, epsilon: f64) -> Vec<Cubic<P>>;
}

impl<P: Point> ToCurve<P> for [P] {
    fn fit(&self, alpha: f64, epsilon: f64) -> Vec<Cubic<P>> {
        let (first, last) = match (self.first(), self.last()) {
            (Some(first), Some(last)) if self.len() >= 2 => (*first, *last),
            _ => return Vec::new(),
        };

        std::iter::once(first)
            .chain(self.iter().copied())
            .chain(std::iter::once(last))
            .tuple_windows()
            .map(|(p0, p1, p2, p3)| {
                let cp = catmull_rom(p0, p1, p2, p3, alpha, epsilon);
                Cubic {
                    a: p1,
                    b: cp.c1,
                    c: cp.c2,
                    d: p2,
                }
            })
            .collect()
    }
}
