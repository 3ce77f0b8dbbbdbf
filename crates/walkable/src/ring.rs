//! Simple polygons (rings) and their exact predicates.
//!
//! A `Ring` is an ordered vertex loop; the last vertex connects back to the
//! first. Its signed area decides its `Polarity`: positive area is `Fill`
//! (walkable region), negative is `Hole` (subtracted region). A zero-area
//! ring counts as `Fill`.
//!
//! Invariant (caller's responsibility): the ring is simple, i.e. no two edges
//! cross. Winding, containment and the merge in `Polygon::add_ring` assume it.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use crate::edge::Edges;
use crate::point::Point;

/// Which side of the boundary a ring fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Polarity {
    Fill,
    Hole,
}

impl Polarity {
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Polarity::Fill => Polarity::Hole,
            Polarity::Hole => Polarity::Fill,
        }
    }
}

/// Winding number of a ring around a point, plus whether the point lies
/// exactly on the ring's boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Winding {
    pub number: i32,
    pub on_boundary: bool,
}

/// A vertex with its two neighbours along the ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corner {
    pub prev: Point,
    pub here: Point,
    pub next: Point,
}

impl Corner {
    /// Incoming edge, reversed: `prev - here`.
    #[inline]
    pub fn back(&self) -> Point {
        self.prev - self.here
    }

    /// Outgoing edge: `next - here`.
    #[inline]
    pub fn forward(&self) -> Point {
        self.next - self.here
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ring {
    pub points: Vec<Point>,
}

impl Ring {
    #[inline]
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn edges(&self) -> Edges<'_> {
        Edges::new(&self.points)
    }

    /// Twice the signed area (shoelace), exact.
    pub fn area2(&self) -> i128 {
        self.edges()
            .map(|e| i128::from(e.start.cross(e.end)))
            .sum()
    }

    /// Signed area; positive for fill, negative for a hole.
    pub fn area(&self) -> f64 {
        self.area2() as f64 * 0.5
    }

    pub fn polarity(&self) -> Polarity {
        if self.area2() < 0 {
            Polarity::Hole
        } else {
            Polarity::Fill
        }
    }

    #[inline]
    pub fn is_hole(&self) -> bool {
        self.polarity() == Polarity::Hole
    }

    /// Fewer than three vertices or zero area.
    pub fn is_degenerate(&self) -> bool {
        self.len() < 3 || self.area2() == 0
    }

    /// Nonzero winding, with boundary points counted as inside.
    pub fn contains(&self, point: Point) -> bool {
        let w = self.winding(point);
        w.on_boundary || w.number != 0
    }

    /// Winding number by upward/downward crossings of the horizontal line
    /// through `point`.
    pub fn winding(&self, point: Point) -> Winding {
        let mut out = Winding::default();
        for e in self.edges() {
            if e.touches(point) {
                out.on_boundary = true;
            }
            let starts_below = e.start.y <= point.y;
            let ends_below = e.end.y <= point.y;
            if starts_below == ends_below {
                continue;
            }
            let cross = e.vector().cross(point - e.start);
            if !ends_below && cross > 0 {
                out.number += 1;
            }
            if ends_below && cross <= 0 {
                out.number -= 1;
            }
        }
        out
    }

    /// Whether `point` lies exactly on this ring's boundary.
    pub fn touches(&self, point: Point) -> bool {
        self.edges().any(|e| e.touches(point))
    }

    /// Whether `other` lies inside this ring.
    ///
    /// Pre: the two rings do not cross (they may touch). Decided by the
    /// winding of the first vertex of `other` off this ring's boundary, then
    /// of the first such edge midpoint. A ring whose whole outline lies on
    /// this boundary is not contained.
    pub(crate) fn contains_ring(&self, other: &Ring) -> bool {
        if let Some(&p) = other.points.iter().find(|&&p| !self.touches(p)) {
            return self.winding(p).number != 0;
        }
        // Midpoints in doubled coordinates stay on the integer grid.
        let doubled = self.clone() * 2;
        match other
            .edges()
            .map(|e| e.start + e.end)
            .find(|&m| !doubled.touches(m))
        {
            Some(m) => doubled.winding(m).number != 0,
            None => false,
        }
    }

    /// Same outline as `other`, up to start vertex and direction.
    ///
    /// Pre: neither ring crosses the other.
    pub fn coincides(&self, other: &Ring) -> bool {
        if self.area2().abs() != other.area2().abs() || self.is_degenerate() {
            return false;
        }
        let on = |a: &Ring, b: &Ring| {
            let doubled = a.clone() * 2;
            b.points.iter().all(|&p| a.touches(p))
                && b.edges().all(|e| doubled.touches(e.start + e.end))
        };
        on(self, other) && on(other, self)
    }

    /// Copy scaled by `k`, or `None` if any vertex leaves the coordinate
    /// range.
    pub fn checked_scale(&self, k: i32) -> Option<Ring> {
        self.points.iter().map(|p| p.checked_scale(k)).collect()
    }

    /// Every vertex with its neighbours, in ring order.
    pub fn corners(&self) -> impl Iterator<Item = Corner> + '_ {
        let n = self.len();
        (0..n).map(move |i| Corner {
            prev: self.points[(i + n - 1) % n],
            here: self.points[i],
            next: self.points[(i + 1) % n],
        })
    }

    /// Vertices where the boundary turns against the ring's winding: for a
    /// fill these are reflex corners, for a hole the obstacle's convex ones.
    /// A degenerate ring returns all its points.
    pub fn concave_points(&self) -> Vec<Point> {
        if self.len() < 3 {
            return self.points.clone();
        }
        self.corners()
            .filter(|c| (c.here - c.prev).cross(c.next - c.prev) < 0)
            .map(|c| c.here)
            .collect()
    }

    /// Flip vertex order in place, toggling polarity.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    pub fn reversed(&self) -> Ring {
        let mut out = self.clone();
        out.reverse();
        out
    }
}

impl From<Vec<Point>> for Ring {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl FromIterator<Point> for Ring {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl AddAssign<Point> for Ring {
    fn add_assign(&mut self, offset: Point) {
        for p in &mut self.points {
            *p += offset;
        }
    }
}

impl Add<Point> for Ring {
    type Output = Ring;
    fn add(mut self, offset: Point) -> Ring {
        self += offset;
        self
    }
}

impl SubAssign<Point> for Ring {
    fn sub_assign(&mut self, offset: Point) {
        *self += -offset;
    }
}

impl Sub<Point> for Ring {
    type Output = Ring;
    fn sub(self, offset: Point) -> Ring {
        self + -offset
    }
}

impl MulAssign<i32> for Ring {
    fn mul_assign(&mut self, scale: i32) {
        for p in &mut self.points {
            *p *= scale;
        }
    }
}

impl Mul<i32> for Ring {
    type Output = Ring;
    fn mul(mut self, scale: i32) -> Ring {
        self *= scale;
        self
    }
}

impl DivAssign<i32> for Ring {
    fn div_assign(&mut self, scale: i32) {
        for p in &mut self.points {
            *p /= scale;
        }
    }
}

impl Div<i32> for Ring {
    type Output = Ring;
    fn div(mut self, scale: i32) -> Ring {
        self /= scale;
        self
    }
}
