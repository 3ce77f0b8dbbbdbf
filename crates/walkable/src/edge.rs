//! Directed edge traversal over one ring, with an exact position key.
//!
//! An `Edge` is the segment from vertex `i` to vertex `i + 1` (the last edge
//! closes the loop). Positions along the perimeter are expressed as an
//! `EdgeKey`: the edge index plus an exact fraction `t ∈ [0, 1)` along it.
//! Keys increase monotonically along one traversal; `t == 1` is the start of
//! the next edge, and one past the last edge wraps to `(0, 0)`.
//!
//! Keys are only comparable within one traversal of one ring.

use std::cmp::Ordering;

use crate::point::Point;

/// Exact fraction `num / den` with `den > 0`.
#[derive(Clone, Copy, Debug)]
pub struct Frac {
    num: i64,
    den: i64,
}

impl Frac {
    pub const ZERO: Frac = Frac { num: 0, den: 1 };
    pub const ONE: Frac = Frac { num: 1, den: 1 };

    /// `num / den`, sign-normalized; `None` for a zero denominator.
    pub fn new(num: i64, den: i64) -> Option<Self> {
        match den.cmp(&0) {
            Ordering::Equal => None,
            Ordering::Greater => Some(Self { num, den }),
            Ordering::Less => Some(Self {
                num: -num,
                den: -den,
            }),
        }
    }

    #[inline]
    pub fn num(&self) -> i64 {
        self.num
    }

    #[inline]
    pub fn den(&self) -> i64 {
        self.den
    }

    /// Within the closed unit interval.
    #[inline]
    pub fn in_unit(&self) -> bool {
        self.num >= 0 && self.num <= self.den
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.num == self.den
    }
}

impl PartialEq for Frac {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frac {}

impl PartialOrd for Frac {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frac {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = i128::from(self.num) * i128::from(other.den);
        let rhs = i128::from(other.num) * i128::from(self.den);
        lhs.cmp(&rhs)
    }
}

/// Position on a ring's perimeter: edge index, then fraction along that edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct EdgeKey {
    pub edge: usize,
    pub t: Frac,
}

impl EdgeKey {
    /// Key at `t` along `edge` of a ring with `count` edges. `t == 1` becomes
    /// the start of the following edge, wrapping past the last one.
    pub fn new(edge: usize, t: Frac, count: usize) -> Self {
        if t.is_one() {
            let next = if edge + 1 >= count { 0 } else { edge + 1 };
            Self {
                edge: next,
                t: Frac::ZERO,
            }
        } else {
            Self { edge, t }
        }
    }

    /// Start of edge `edge`.
    #[inline]
    pub fn at_vertex(edge: usize) -> Self {
        Self {
            edge,
            t: Frac::ZERO,
        }
    }

    /// One past the end of a full traversal. No normalized key reaches it.
    #[inline]
    pub fn max(count: usize) -> Self {
        Self::at_vertex(count)
    }
}

/// One directed segment of a ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub index: usize,
    pub start: Point,
    pub end: Point,
    count: usize,
}

impl Edge {
    /// `end - start`.
    #[inline]
    pub fn vector(&self) -> Point {
        self.end - self.start
    }

    /// Key of this edge's start vertex.
    #[inline]
    pub fn order(&self) -> EdgeKey {
        EdgeKey::at_vertex(self.index)
    }

    /// Key of the point `t` along this edge.
    #[inline]
    pub fn key_at(&self, t: Frac) -> EdgeKey {
        EdgeKey::new(self.index, t, self.count)
    }

    /// True when `p` lies on the closed segment.
    pub fn touches(&self, p: Point) -> bool {
        let v = self.vector();
        let d = p - self.start;
        if v.cross(d) != 0 {
            return false;
        }
        (p - self.start).dot(p - self.end) <= 0
    }
}

/// Forward-only iterator over a vertex loop's edges.
#[derive(Clone, Debug)]
pub struct Edges<'a> {
    verts: &'a [Point],
    next: usize,
}

impl<'a> Edges<'a> {
    pub fn new(verts: &'a [Point]) -> Self {
        Self { verts, next: 0 }
    }
}

impl<'a> Iterator for Edges<'a> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        let n = self.verts.len();
        if self.next >= n {
            return None;
        }
        let i = self.next;
        self.next += 1;
        Some(Edge {
            index: i,
            start: self.verts[i],
            end: self.verts[if i + 1 == n { 0 } else { i + 1 }],
            count: n,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.verts.len().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Edges<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 4),
            Point::new(0, 4),
        ]
    }

    #[test]
    fn frac_compares_exactly() {
        let half = Frac::new(1, 2).unwrap();
        assert_eq!(half, Frac::new(2, 4).unwrap());
        assert_eq!(half, Frac::new(-3, -6).unwrap());
        assert!(Frac::new(1, 3).unwrap() < half);
        assert!(Frac::new(1, 0).is_none());
        assert!(!Frac::new(-1, 2).unwrap().in_unit());
        // Values that collide in f64 still order correctly.
        let a = Frac::new(i64::MAX - 1, i64::MAX).unwrap();
        let b = Frac::new(i64::MAX - 2, i64::MAX).unwrap();
        assert!(b < a);
    }

    #[test]
    fn edges_close_the_loop() {
        let v = square();
        let edges: Vec<Edge> = Edges::new(&v).collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3].start, Point::new(0, 4));
        assert_eq!(edges[3].end, Point::new(0, 0));
        assert_eq!(edges[1].vector(), Point::new(0, 4));
        assert_eq!(Edges::new(&[]).count(), 0);
    }

    #[test]
    fn order_is_monotonic_and_wraps() {
        let v = square();
        let mut last = None;
        for e in Edges::new(&v) {
            let k0 = e.order();
            let k1 = e.key_at(Frac::new(1, 3).unwrap());
            assert!(k0 < k1);
            if let Some(prev) = last {
                assert!(prev < k0);
            }
            last = Some(k1);
            assert!(k1 < EdgeKey::max(4));
        }
        let e3 = Edges::new(&v).nth(3).unwrap();
        assert_eq!(e3.key_at(Frac::ONE), EdgeKey::at_vertex(0));
        let e1 = Edges::new(&v).nth(1).unwrap();
        assert_eq!(e1.key_at(Frac::ONE), EdgeKey::at_vertex(2));
    }

    #[test]
    fn touches_closed_segment() {
        let v = square();
        let e = Edges::new(&v).next().unwrap();
        assert!(e.touches(Point::new(0, 0)));
        assert!(e.touches(Point::new(2, 0)));
        assert!(e.touches(Point::new(4, 0)));
        assert!(!e.touches(Point::new(5, 0)));
        assert!(!e.touches(Point::new(2, 1)));
    }
}
