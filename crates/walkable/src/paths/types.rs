//! Data types for the visibility graph and per-query search state.

use std::cmp::Ordering;

use crate::point::Point;

/// Pathfinding configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathsCfg {
    /// Integer supersampling factor applied to masks before merging, so
    /// intersection points keep sub-unit precision.
    pub scale: i32,
}

impl Default for PathsCfg {
    fn default() -> Self {
        Self { scale: 4 }
    }
}

/// Edge of the visibility graph, stored on both endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sightline {
    pub to: usize,
    pub length: f64,
}

/// Concave corner of the walkable region (internal coordinates).
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    pub point: Point,
    /// Incoming edge reversed (`prev - point`).
    pub back: Point,
    /// Outgoing edge (`next - point`).
    pub forward: Point,
    pub sightlines: Vec<Sightline>,
}

impl Waypoint {
    pub(crate) fn new(point: Point, back: Point, forward: Point) -> Self {
        Self {
            point,
            back,
            forward,
            sightlines: Vec::new(),
        }
    }

    /// Whether direction `dir` leaves this corner into the region, i.e. not
    /// into the narrow outside wedge between `back` and `forward`.
    #[inline]
    pub fn opens_toward(&self, dir: Point) -> bool {
        self.back.cross(dir) <= 0 || dir.cross(self.forward) <= 0
    }
}

/// Per-waypoint search state of one `find` query.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Slot {
    /// Straight-line distance to the query target.
    pub to_target: f64,
    pub sees_target: bool,
    /// Previous waypoint on the best known path; `None` for a seed.
    pub backtrack: Option<usize>,
    /// Best known distance from the query start.
    pub best: f64,
}

/// Reusable buffer for `Paths::find_with`, indexed by waypoint id.
///
/// One scratch per concurrent query; it is reset at the start of each search.
#[derive(Clone, Debug, Default)]
pub struct Scratch {
    pub(crate) slots: Vec<Slot>,
}

impl Scratch {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reset<I>(&mut self, slots: I)
    where
        I: IntoIterator<Item = (f64, bool)>,
    {
        self.slots.clear();
        self.slots
            .extend(slots.into_iter().map(|(to_target, sees_target)| Slot {
                to_target,
                sees_target,
                backtrack: None,
                best: f64::INFINITY,
            }));
    }
}

/// Open-set entry; the heap pops the smallest `f` first.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Node {
    /// Distance so far plus heuristic.
    pub f: f64,
    /// Distance so far.
    pub g: f64,
    pub index: usize,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behavior.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.index.cmp(&self.index))
    }
}
