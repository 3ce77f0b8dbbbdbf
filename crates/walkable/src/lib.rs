//! Exact-integer 2D polygon engine and visibility-graph pathfinding.
//!
//! Layers
//! - `point`, `edge`, `ring`: integer vectors, ring edges with an exact order
//!   key, simple polygons with signed area and winding.
//! - `polygon`: regions as sets of non-crossing rings; boolean merge (`add_ring`),
//!   connected component (`flood_fill`), containment and segment crossing.
//! - `paths`: walkable region plus concave-corner visibility graph (`init`)
//!   and A* queries (`find`).
//! - `mask`: text format for collision masks, stock obstacle shapes.
//! - `rand`: reproducible random rings and scenes for tests and benches.
//!
//! Coordinates are `i32` and must stay within `|c| < 2^29` after scaling, so
//! every cross and dot product fits `i64`.

pub mod edge;
pub mod mask;
pub mod paths;
pub mod point;
pub mod polygon;
pub mod rand;
pub mod ring;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::edge::{Edge, EdgeKey, Frac};
    pub use crate::mask::{circle, parse_mask, MaskError};
    pub use crate::paths::{Paths, PathsCfg, Scratch};
    pub use crate::point::Point;
    pub use crate::polygon::Polygon;
    pub use crate::ring::{Polarity, Ring};
    pub use nalgebra::Vector2 as Vec2;
}
