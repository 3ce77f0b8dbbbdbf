//! Ring-into-region boolean merge.
//!
//! Names: `P` is the existing region (its rings are "parts"), `Q` the ring
//! being added.
//!
//! Steps
//! 1. Find every crossing of a part edge with a `Q` edge (endpoints
//!    included, parallel pairs skipped). Each crossing carries its position on
//!    the part and on `Q` as `EdgeKey`s, and whether `P` enters `Q` there.
//! 2. Collapse crossings at the same part position (vertex touches): a
//!    balanced group is a tangential touch and vanishes, otherwise one
//!    crossing survives. Then keep the entering flags alternating around
//!    the part.
//!    A `Q` that retraces a part exactly is settled before this step.
//! 3. Parts without crossings survive unless `Q` swallows them; the smallest
//!    one around `Q` is remembered.
//! 4. Crossing parts and `Q` are "amplified": written into one vertex arena
//!    with the crossing vertices inserted and cross-linked.
//! 5. Output rings are traced from each entering crossing on `Q`, following
//!    links, until the walk returns to its start.

use std::cmp::Ordering;

use crate::edge::{EdgeKey, Frac};
use crate::point::Point;
use crate::ring::{Polarity, Ring};

use super::segment_hit;

#[derive(Clone, Copy, Debug)]
struct Crossing {
    point: Point,
    p_key: EdgeKey,
    q_key: EdgeKey,
    entering: bool,
}

/// A crossing re-keyed along `Q`, pointing at its vertex in the arena.
#[derive(Clone, Copy, Debug)]
struct QCrossing {
    point: Point,
    key: EdgeKey,
    p_index: usize,
    entering: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Link {
    Free,
    To(usize),
    Used,
}

#[derive(Clone, Copy, Debug)]
struct Vertex {
    point: Point,
    link: Link,
}

impl Vertex {
    #[inline]
    fn free(point: Point) -> Self {
        Self {
            point,
            link: Link::Free,
        }
    }
}

pub(super) fn merge(parts: &[Ring], q: &Ring) -> Vec<Ring> {
    let q_polarity = q.polarity();
    if let Some(twin) = parts.iter().position(|p| p.coincides(q)) {
        return merge_twin(parts, twin, q_polarity);
    }
    let mut out: Vec<Ring> = Vec::with_capacity(parts.len() + 1);
    let mut arena: Vec<Vertex> = Vec::new();
    let mut q_crossings: Vec<QCrossing> = Vec::new();
    let mut smallest: Option<&Ring> = None;

    for part in parts {
        let mut found = find_crossings(part, q, q_polarity == Polarity::Hole);
        found.sort_by(|a, b| a.p_key.cmp(&b.p_key));
        collapse_touches(&mut found);
        alternate(&mut found);

        if found.is_empty() {
            if !q.contains_ring(part) {
                out.push(part.clone());
                // Parts never cross each other, so anything around Q is
                // either inside or around the current best container.
                if part.contains_ring(q) && smallest.map_or(true, |s| s.contains_ring(part)) {
                    smallest = Some(part);
                }
            }
            continue;
        }
        amplify_part(part, &found, &mut arena, &mut q_crossings);
    }

    if q_crossings.is_empty() {
        // Outside every ring counts as hole polarity.
        let container = smallest.map_or(Polarity::Hole, Ring::polarity);
        if container != q_polarity {
            out.push(q.clone());
        }
        return out;
    }

    q_crossings.sort_by(|a, b| a.key.cmp(&b.key));
    let starts = amplify_q(q, &q_crossings, &mut arena);
    for start in starts {
        if let Some(ring) = trace(&mut arena, start) {
            out.push(ring);
        }
    }
    out
}

/// `Q` retraces `parts[twin]`. Same polarity changes nothing; opposite
/// polarity cancels the twin together with every ring inside it.
fn merge_twin(parts: &[Ring], twin: usize, q_polarity: Polarity) -> Vec<Ring> {
    let outline = &parts[twin];
    if outline.polarity() == q_polarity {
        return parts.to_vec();
    }
    parts
        .iter()
        .enumerate()
        .filter(|&(i, r)| i != twin && !outline.contains_ring(r))
        .map(|(_, r)| r.clone())
        .collect()
}

fn find_crossings(part: &Ring, q: &Ring, q_is_hole: bool) -> Vec<Crossing> {
    let mut found = Vec::new();
    for p in part.edges() {
        let pv = p.vector();
        for e in q.edges() {
            let Some(hit) = segment_hit(p.start, pv, e.start, e.vector()) else {
                continue;
            };
            let (Some(tp), Some(tq)) = (Frac::new(hit.ta, hit.den), Frac::new(hit.tb, hit.den))
            else {
                continue;
            };
            if !tp.in_unit() || !tq.in_unit() {
                continue;
            }
            found.push(Crossing {
                point: p.start + scale_vec(pv, hit.ta, hit.den),
                p_key: p.key_at(tp),
                q_key: e.key_at(tq),
                entering: hit.positive != q_is_hole,
            });
        }
    }
    found
}

/// `v * num / den`, truncated toward zero.
fn scale_vec(v: Point, num: i64, den: i64) -> Point {
    let s = |c: i32| (i128::from(c) * i128::from(num) / i128::from(den)) as i32;
    Point::new(s(v.x), s(v.y))
}

/// Merge crossings sharing a part position. Input must be sorted by `p_key`.
fn collapse_touches(found: &mut Vec<Crossing>) {
    let mut kept = Vec::with_capacity(found.len());
    let mut i = 0;
    while i < found.len() {
        let key = found[i].p_key;
        let mut j = i;
        let mut net = 0i32;
        while j < found.len() && found[j].p_key == key {
            net += if found[j].entering { 1 } else { -1 };
            j += 1;
        }
        match net.cmp(&0) {
            Ordering::Equal => {}
            ord => {
                let entering = ord == Ordering::Greater;
                if let Some(c) = found[i..j].iter().find(|c| c.entering == entering) {
                    kept.push(*c);
                }
            }
        }
        i = j;
    }
    *found = kept;
}

/// Drop a crossing whose flag repeats the previous one (cyclically), which
/// happens when an edge runs collinear with `Q` between entering and leaving.
fn alternate(found: &mut Vec<Crossing>) {
    let Some(last) = found.last() else {
        return;
    };
    let mut was = last.entering;
    found.retain(|c| {
        if c.entering == was {
            false
        } else {
            was = c.entering;
            true
        }
    });
}

/// Write `part` into the arena with its crossings inserted, closed by a
/// sentinel linking back to the part's first vertex.
fn amplify_part(
    part: &Ring,
    found: &[Crossing],
    arena: &mut Vec<Vertex>,
    q_crossings: &mut Vec<QCrossing>,
) {
    let base = arena.len();
    let mut it = found.iter().peekable();
    for e in part.edges() {
        if it.peek().map_or(true, |c| c.p_key != e.order()) {
            arena.push(Vertex::free(e.start));
        }
        let next = EdgeKey::at_vertex(e.index + 1);
        while let Some(c) = it.next_if(|c| c.p_key < next) {
            q_crossings.push(QCrossing {
                point: c.point,
                key: c.q_key,
                p_index: arena.len(),
                entering: c.entering,
            });
            arena.push(Vertex::free(c.point));
        }
    }
    arena.push(Vertex {
        point: arena[base].point,
        link: Link::To(base),
    });
}

/// Write `Q` into the arena, linking each crossing with its part vertex:
/// entering crossings jump from `Q` onto the part, exiting ones from the
/// part onto `Q`. Returns the arena indices of the entering crossings.
fn amplify_q(q: &Ring, q_crossings: &[QCrossing], arena: &mut Vec<Vertex>) -> Vec<usize> {
    let base = arena.len();
    let mut starts = Vec::new();
    let mut it = q_crossings.iter().peekable();
    for e in q.edges() {
        if it.peek().map_or(true, |c| c.key != e.order()) {
            arena.push(Vertex::free(e.start));
        }
        let next = EdgeKey::at_vertex(e.index + 1);
        while let Some(c) = it.next_if(|c| c.key < next) {
            let here = arena.len();
            if c.entering {
                starts.push(here);
                arena.push(Vertex {
                    point: c.point,
                    link: Link::To(c.p_index),
                });
            } else {
                arena[c.p_index].link = Link::To(here);
                arena.push(Vertex::free(c.point));
            }
        }
    }
    arena.push(Vertex {
        point: arena[base].point,
        link: Link::To(base),
    });
    starts
}

/// Walk from `start`, jumping along unused links and marking them used, until
/// the walk comes back. `None` if the start was already consumed, the walk
/// does not close, or fewer than 3 distinct vertices remain.
fn trace(arena: &mut [Vertex], start: usize) -> Option<Ring> {
    if !matches!(arena[start].link, Link::To(_)) {
        return None;
    }
    let limit = 2 * arena.len();
    let mut points: Vec<Point> = Vec::new();
    let mut j = start;
    for _ in 0..limit {
        let v = &mut arena[j];
        match v.link {
            Link::To(k) => {
                v.link = Link::Used;
                j = k;
            }
            Link::Free | Link::Used => {
                if points.last() != Some(&v.point) {
                    points.push(v.point);
                }
                j += 1;
            }
        }
        if j == start {
            while points.len() > 1 && points.first() == points.last() {
                points.pop();
            }
            return (points.len() >= 3).then(|| Ring::new(points));
        }
        if j >= arena.len() {
            break;
        }
    }
    tracing::warn!(start, vertices = points.len(), "merge trace did not close");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crossing(edge: usize, num: i64, entering: bool) -> Crossing {
        Crossing {
            point: Point::new(edge as i32, num as i32),
            p_key: EdgeKey::new(edge, Frac::new(num, 4).unwrap(), 8),
            q_key: EdgeKey::at_vertex(0),
            entering,
        }
    }

    #[test]
    fn balanced_touch_vanishes() {
        let mut v = vec![
            crossing(1, 0, true),
            crossing(1, 0, false),
            crossing(2, 1, true),
        ];
        collapse_touches(&mut v);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].p_key, EdgeKey::new(2, Frac::new(1, 4).unwrap(), 8));
    }

    #[test]
    fn vertex_crossing_keeps_one() {
        let mut v = vec![
            crossing(3, 0, false),
            crossing(3, 0, false),
            crossing(3, 0, true),
            // Same position as (3, 0): end of edge 2.
            crossing(2, 4, false),
        ];
        v.sort_by(|a, b| a.p_key.cmp(&b.p_key));
        collapse_touches(&mut v);
        assert_eq!(v.len(), 1);
        assert!(!v[0].entering);
    }

    #[test]
    fn alternation_drops_repeats() {
        let mut v = vec![
            crossing(0, 1, true),
            crossing(1, 1, true),
            crossing(2, 1, false),
            crossing(3, 1, false),
        ];
        alternate(&mut v);
        let flags: Vec<bool> = v.iter().map(|c| c.entering).collect();
        assert_eq!(flags, vec![true, false]);

        let mut same = vec![crossing(0, 1, true), crossing(1, 1, true)];
        alternate(&mut same);
        assert!(same.is_empty());
    }

    #[test]
    fn scale_vec_truncates_toward_zero() {
        assert_eq!(scale_vec(Point::new(10, -10), 1, 3), Point::new(3, -3));
        assert_eq!(scale_vec(Point::new(7, 0), 4, 4), Point::new(7, 0));
    }
}
