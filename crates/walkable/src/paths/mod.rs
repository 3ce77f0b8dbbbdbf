//! Walkable region and visibility-graph pathfinding.
//!
//! Purpose
//! - `Paths::init` merges every object mask (supersampled by
//!   `PathsCfg::scale`) into one region, keeps the component around the start
//!   point, and links the region's concave corners into a visibility graph.
//! - `Paths::find` answers movement queries with A* over that graph, using the
//!   straight-line distance to the target as heuristic.
//!
//! Why this design
//! - Shortest paths in a polygonal region bend only at reflex corners, so the
//!   corner graph plus the two query endpoints is enough.
//! - Per-query state lives in a caller-owned `Scratch`, so a built `Paths` is
//!   immutable and can serve queries from several threads.
//!
//! Coordinates
//! - Inputs and outputs of `init`/`find`/`waypoints` are scene coordinates.
//!   `passable`, `nodes` and `visible` work in internal (scaled) coordinates.
//!
//! Code cross-refs: `Polygon::{add_ring, flood_fill, contains, intersects}`,
//! `Ring::corners`.

mod graph;
mod search;
mod types;

pub use graph::Paths;
pub use types::{PathsCfg, Scratch, Sightline, Waypoint};

#[cfg(test)]
mod tests;
