use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use svg::node::element::path::Parameters;

#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn x(x: f32) -> Self {
        Self { x, y: 0.0 }
    }

    pub const fn y(y: f32) -> Self {
        Self { x: 0.0, y }
    }

    /// Unit vector pointing along `theta` degrees, counter-clockwise from +x.
    pub fn polar(theta: f32) -> Self {
        let rad = theta.to_radians();
        snap(Self { x: rad.cos(), y: rad.sin() })
    }

    pub fn min(&self, other: Self) -> Self {
        Self { x: self.x.min(other.x), y: self.y.min(other.y) }
    }

    pub fn max(&self, other: Self) -> Self {
        Self { x: self.x.max(other.x), y: self.y.max(other.y) }
    }

    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Direction of this vector in degrees, in `(-180, 180]`.
    pub fn angle(&self) -> f32 {
        self.y.atan2(self.x).to_degrees()
    }

    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len == 0.0 { *self } else { *self / len }
    }

    /// Counter-clockwise perpendicular.
    pub fn perp(&self) -> Self {
        Self { x: -self.y, y: self.x }
    }

    pub fn rotate(&self, theta: f32) -> Self {
        let Vec2 { x: c, y: s } = Vec2::polar(theta);
        Self {
            x: self.x * c - self.y * s,
            y: self.x * s + self.y * c,
        }
    }
}

// Keeps right-angle rotations exact so anchors line up with grid holes.
fn snap(v: Vec2) -> Vec2 {
    let clean = |n: f32| if n.abs() < 1e-6 { 0.0 } else { n };
    Vec2 { x: clean(v.x), y: clean(v.y) }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Self) -> Self::Output {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Self::Output {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f32) -> Self::Output {
        Self { x: self.x / rhs, y: self.y / rhs }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Self) -> Self::Output {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Self::Output {
        Self { x: -self.x, y: -self.y }
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<Vec2> for Parameters {
    fn from(Vec2 { x, y }: Vec2) -> Self {
        Parameters::from((x, y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn closed_at(position: Vec2) -> Self {
        Self { min: position, max: position }
    }

    pub fn around(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        let mut points = points.into_iter();
        let mut bounds = Self::closed_at(points.next()?);
        points.for_each(|p| bounds.include(p));
        Some(bounds)
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn svg_viewbox(&self) -> (f32, f32, f32, f32) {
        let Vec2 { x, y } = self.min;
        let Vec2 { x: width, y: height } = self.max - self.min;
        (x, y, width, height)
    }

    pub fn expand(&mut self, other: Self) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn include(&mut self, point: Vec2) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn padded(&self, pad: f32) -> Self {
        Self {
            min: self.min - Vec2::new(pad, pad),
            max: self.max + Vec2::new(pad, pad),
        }
    }
}

/// Rotation by `theta` degrees about the origin, then translation by `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub theta: f32,
    pub offset: Vec2,
}

impl Transform {
    /// The transform that rotates by `theta` and moves `local` onto `target`.
    pub fn aligning(theta: f32, local: Vec2, target: Vec2) -> Self {
        Self { theta, offset: target - local.rotate(theta) }
    }

    pub fn apply(&self, point: Vec2) -> Vec2 {
        point.rotate(self.theta) + self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turns_are_exact() {
        let v = Vec2::new(1.0, -2.0);
        assert_eq!(v.rotate(90.0), Vec2::new(2.0, 1.0));
        assert_eq!(v.rotate(180.0), Vec2::new(-1.0, 2.0));
        assert_eq!(v.rotate(-90.0), Vec2::new(-2.0, -1.0));
    }

    #[test]
    fn aligning_moves_anchor_onto_target() {
        let local = Vec2::new(0.5, 1.0);
        let target = Vec2::new(3.0, 4.0);
        let t = Transform::aligning(90.0, local, target);
        assert_eq!(t.apply(local), target);
    }

    #[test]
    fn bounds_around_points() {
        let b = Bounds::around([Vec2::new(1.0, 5.0), Vec2::new(-2.0, 3.0)]).unwrap();
        assert_eq!(b.min, Vec2::new(-2.0, 3.0));
        assert_eq!(b.max, Vec2::new(1.0, 5.0));
        assert_eq!(b.svg_viewbox(), (-2.0, 3.0, 3.0, 2.0));
        assert!(Bounds::around(std::iter::empty()).is_none());
    }
}
