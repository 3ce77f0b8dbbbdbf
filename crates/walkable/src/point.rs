//! Integer 2-vector primitive.
//!
//! Purpose
//! - Exact value type for every vertex and edge vector in the engine.
//! - Products (`dot`, `cross`, squared lengths) are widened to `i64` so
//!   coordinates up to `|c| < 2^29` never overflow; `length` is the only
//!   floating operation.
//!
//! Code cross-refs: `Ring`, `Edge`, `Polygon`.

use nalgebra::Vector2;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Exclusive bound on every coordinate the engine works with, after scaling.
pub const COORD_LIMIT: i32 = 1 << 29;

/// Integer point or vector `(x, y)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True for `(0, 0)`.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    #[inline]
    pub fn dot(&self, p: Point) -> i64 {
        i64::from(self.x) * i64::from(p.x) + i64::from(self.y) * i64::from(p.y)
    }

    /// Scalar z of the 3D cross product; positive when `p` is counterclockwise
    /// from `self`.
    #[inline]
    pub fn cross(&self, p: Point) -> i64 {
        i64::from(self.x) * i64::from(p.y) - i64::from(self.y) * i64::from(p.x)
    }

    #[inline]
    pub fn length_squared(&self) -> i64 {
        self.dot(*self)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.length_squared() as f64).sqrt()
    }

    #[inline]
    pub fn distance(&self, p: Point) -> f64 {
        (p - *self).length()
    }

    #[inline]
    pub fn distance_squared(&self, p: Point) -> i64 {
        (p - *self).length_squared()
    }

    /// Both coordinates strictly inside `COORD_LIMIT`.
    #[inline]
    pub fn in_range(&self) -> bool {
        self.x.unsigned_abs() < COORD_LIMIT as u32 && self.y.unsigned_abs() < COORD_LIMIT as u32
    }

    /// `self * k`, or `None` when the result leaves the coordinate range.
    pub fn checked_scale(self, k: i32) -> Option<Point> {
        let p = Point::new(self.x.checked_mul(k)?, self.y.checked_mul(k)?);
        p.in_range().then_some(p)
    }

    /// Float copy for Euclidean work (sightline lengths, sampling).
    #[inline]
    pub fn to_vec2(self) -> Vector2<f64> {
        Vector2::new(f64::from(self.x), f64::from(self.y))
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for Point {
    #[inline]
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, s: i32) -> Point {
        Point::new(self.x * s, self.y * s)
    }
}

impl Mul<Point> for i32 {
    type Output = Point;
    #[inline]
    fn mul(self, p: Point) -> Point {
        p * self
    }
}

impl MulAssign<i32> for Point {
    #[inline]
    fn mul_assign(&mut self, s: i32) {
        self.x *= s;
        self.y *= s;
    }
}

/// Integer division, truncating toward zero.
impl Div<i32> for Point {
    type Output = Point;
    #[inline]
    fn div(self, s: i32) -> Point {
        Point::new(self.x / s, self.y / s)
    }
}

impl DivAssign<i32> for Point {
    #[inline]
    fn div_assign(&mut self, s: i32) {
        self.x /= s;
        self.y /= s;
    }
}
