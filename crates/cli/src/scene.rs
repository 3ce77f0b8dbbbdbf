//! JSON scene files: object masks placed in a room plus a start point.
//!
//! ```json
//! { "scale": 4, "start": [20, 20],
//!   "objects": [ { "mask": ["0,0 100,0 100,100 0,100"] },
//!                { "offset": [50, 0], "mask": ["-10,-10 -10,70 10,70 10,-10"] } ] }
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use walkable::mask::parse_mask;
use walkable::paths::PathsCfg;
use walkable::point::Point;
use walkable::polygon::Polygon;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Scene {
    /// Supersampling factor; `PathsCfg::default()` when absent.
    #[serde(default)]
    pub scale: Option<i32>,
    pub start: [i32; 2],
    pub objects: Vec<Object>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Object {
    #[serde(default)]
    pub offset: Option<[i32; 2]>,
    /// One ring per entry, in mask text format.
    pub mask: Vec<String>,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scene {}", path.display()))
    }

    pub fn cfg(&self) -> PathsCfg {
        self.scale
            .map(|scale| PathsCfg { scale })
            .unwrap_or_default()
    }

    pub fn start(&self) -> Point {
        Point::from(self.start)
    }

    /// Object masks in scene coordinates.
    pub fn masks(&self) -> Result<Vec<Polygon>> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, obj)| {
                let mask = parse_mask(&obj.mask.join("\n"))
                    .with_context(|| format!("object {i}: bad mask"))?;
                let offset = obj.offset.map(Point::from).unwrap_or_default();
                let Some(placed) = self.place(&mask, offset) else {
                    bail!(
                        "object {i}: mask leaves the coordinate range at scale {}",
                        self.cfg().scale
                    );
                };
                Ok(placed)
            })
            .collect()
    }

    /// `mask + offset`, if every vertex stays in range after scaling.
    fn place(&self, mask: &Polygon, offset: Point) -> Option<Polygon> {
        let scale = self.cfg().scale.max(1);
        let fits = |p: Point| p.in_range() && p.checked_scale(scale).is_some();
        if !fits(offset) || !mask.vertices().all(fits) {
            return None;
        }
        let placed = mask.clone() + offset;
        let ok = placed.vertices().all(fits);
        ok.then_some(placed)
    }
}
