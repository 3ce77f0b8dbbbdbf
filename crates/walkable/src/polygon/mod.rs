//! Multiply-connected regions as ordered sets of rings.
//!
//! Purpose
//! - Boolean merge of one simple ring into an existing region (`add_ring`), with
//!   the ring's polarity deciding union (fill) or difference (hole).
//! - Connected-component extraction (`flood_fill`), point containment and
//!   open-segment crossing tests used by the pathfinder.
//!
//! Invariant
//! - After every `add_ring`, rings may nest or touch but never cross. It
//!   relies on it as a hard precondition: the "smallest container" shortcut
//!   for a ring that crosses nothing is only sound when every existing pair
//!   of rings is non-crossing. Build regions exclusively through `add_ring`
//!   (`from_rings` skips the merge and is meant for raw object masks).
//!
//! All predicates are exact integer arithmetic; see `merge` for the
//! intersection bookkeeping.
//!
//! Code cross-refs: `Ring`, `Edge`, `EdgeKey`, `paths::Paths`.

mod merge;

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use crate::point::Point;
use crate::ring::{Polarity, Ring};

/// Region bounded by rings; fill rings add area, hole rings subtract it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Polygon {
    pub rings: Vec<Ring>,
}

impl Polygon {
    #[inline]
    pub fn new() -> Self {
        Self { rings: Vec::new() }
    }

    /// Wrap rings as-is, without merging. Used for object masks.
    #[inline]
    pub fn from_rings(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    /// Merge every ring in order through `add_ring`.
    pub fn merged<'a, I>(rings: I) -> Self
    where
        I: IntoIterator<Item = &'a Ring>,
    {
        let mut out = Self::new();
        for r in rings {
            out.add_ring(r);
        }
        out
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Ring> {
        self.rings.iter()
    }

    /// Every vertex of every ring.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.rings.iter().flat_map(|r| r.points.iter().copied())
    }

    /// Merge a simple ring into this region: a fill ring is unioned in, a
    /// hole ring is cut out. Degenerate rings (fewer than 3 vertices or zero
    /// area) are ignored.
    ///
    /// Pre: rings already in `self` are pairwise non-crossing.
    /// Post: output rings are pairwise non-crossing; each ring's polarity
    /// follows from its own signed area.
    pub fn add_ring(&mut self, ring: &Ring) {
        if ring.is_degenerate() {
            tracing::trace!(vertices = ring.len(), "ignoring degenerate ring");
            return;
        }
        self.rings = merge::merge(&self.rings, ring);
    }

    /// Keep only the connected component containing `point`: the smallest
    /// fill ring around it, plus the holes directly inside that ring. Holes
    /// nested in other holes bound land again and are dropped. If no fill
    /// ring contains `point`, the polygon becomes empty.
    pub fn flood_fill(&mut self, point: Point) {
        let area: Vec<i128> = self.rings.iter().map(Ring::area2).collect();
        let outer = (0..self.rings.len())
            .filter(|&i| area[i] > 0 && self.rings[i].contains(point))
            .min_by_key(|&i| area[i]);
        let Some(outer) = outer else {
            self.rings.clear();
            return;
        };
        let shell = &self.rings[outer];
        let inside: Vec<bool> = (0..self.rings.len())
            .map(|i| area[i] < 0 && shell.contains_ring(&self.rings[i]))
            .collect();
        let mut keep = vec![false; self.rings.len()];
        keep[outer] = true;
        for i in (0..self.rings.len()).filter(|&i| inside[i]) {
            // A larger hole has a more negative area.
            let nested = (0..self.rings.len()).any(|j| {
                inside[j] && area[j] < area[i] && self.rings[j].contains_ring(&self.rings[i])
            });
            keep[i] = !nested;
        }
        let mut k = 0;
        self.rings.retain(|_| {
            k += 1;
            keep[k - 1]
        });
    }

    /// Nonzero total winding; a point on any ring's boundary is inside.
    pub fn contains(&self, point: Point) -> bool {
        let mut winding = 0;
        for r in &self.rings {
            let w = r.winding(point);
            if w.on_boundary {
                return true;
            }
            winding += w.number;
        }
        winding != 0
    }

    /// Whether the open segment `start → end` crosses any ring edge. Touching
    /// a vertex counts only when the edge at that vertex is not collinear
    /// with the segment.
    pub fn intersects(&self, start: Point, end: Point) -> bool {
        let sv = end - start;
        self.rings.iter().flat_map(Ring::edges).any(|e| {
            segment_hit(e.start, e.vector(), start, sv)
                .is_some_and(|h| h.tb > 0 && h.tb < h.den && h.ta >= 0 && h.ta <= h.den)
        })
    }

    /// Total signed area of all rings.
    pub fn area(&self) -> f64 {
        self.rings.iter().map(Ring::area).sum()
    }

    /// Polarity of every ring, in order.
    pub fn polarities(&self) -> Vec<Polarity> {
        self.rings.iter().map(Ring::polarity).collect()
    }
}

/// Crossing parameters of segment `a` (from `a0` along `av`) with segment
/// `b`: the crossing is at `a0 + av * ta/den == b0 + bv * tb/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Hit {
    pub ta: i64,
    pub tb: i64,
    /// `|av × bv|`, always positive.
    pub den: i64,
    /// Sign of `av × bv` before normalization.
    pub positive: bool,
}

/// `None` for parallel (or degenerate) segments.
pub(crate) fn segment_hit(a0: Point, av: Point, b0: Point, bv: Point) -> Option<Hit> {
    let cross = av.cross(bv);
    if cross == 0 {
        return None;
    }
    let d = b0 - a0;
    let (ta, tb) = (d.cross(bv), d.cross(av));
    Some(if cross > 0 {
        Hit {
            ta,
            tb,
            den: cross,
            positive: true,
        }
    } else {
        Hit {
            ta: -ta,
            tb: -tb,
            den: -cross,
            positive: false,
        }
    })
}

impl FromIterator<Ring> for Polygon {
    /// Collects without merging, like `from_rings`.
    fn from_iter<I: IntoIterator<Item = Ring>>(iter: I) -> Self {
        Self::from_rings(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Polygon {
    type Item = &'a Ring;
    type IntoIter = std::slice::Iter<'a, Ring>;
    fn into_iter(self) -> Self::IntoIter {
        self.rings.iter()
    }
}

impl AddAssign<Point> for Polygon {
    fn add_assign(&mut self, offset: Point) {
        for r in &mut self.rings {
            *r += offset;
        }
    }
}

impl Add<Point> for Polygon {
    type Output = Polygon;
    fn add(mut self, offset: Point) -> Polygon {
        self += offset;
        self
    }
}

impl SubAssign<Point> for Polygon {
    fn sub_assign(&mut self, offset: Point) {
        *self += -offset;
    }
}

impl Sub<Point> for Polygon {
    type Output = Polygon;
    fn sub(self, offset: Point) -> Polygon {
        self + -offset
    }
}

impl MulAssign<i32> for Polygon {
    fn mul_assign(&mut self, scale: i32) {
        for r in &mut self.rings {
            *r *= scale;
        }
    }
}

impl Mul<i32> for Polygon {
    type Output = Polygon;
    fn mul(mut self, scale: i32) -> Polygon {
        self *= scale;
        self
    }
}

impl DivAssign<i32> for Polygon {
    fn div_assign(&mut self, scale: i32) {
        for r in &mut self.rings {
            *r /= scale;
        }
    }
}

impl Div<i32> for Polygon {
    type Output = Polygon;
    fn div(mut self, scale: i32) -> Polygon {
        self /= scale;
        self
    }
}
