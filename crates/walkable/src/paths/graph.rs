//! Walkable-region construction and the waypoint visibility graph.

use tracing::{debug, warn};

use crate::point::Point;
use crate::polygon::Polygon;
use crate::ring::Corner;

use super::types::{PathsCfg, Sightline, Waypoint};

/// Walkable region plus the sightlines between its concave corners.
///
/// Built once per scene by `init`; rebuild it whenever the scene changes.
#[derive(Clone, Debug)]
pub struct Paths {
    passable: Polygon,
    waypoints: Vec<Waypoint>,
    scale: i32,
}

impl Paths {
    /// Merge all mask rings (scaled by `cfg.scale`) in order, keep the
    /// component containing `start`, and build the visibility graph.
    ///
    /// If `start` is outside every walkable ring the region ends up empty and
    /// every `find` returns an empty path. Rings that leave the coordinate
    /// range once scaled are skipped, and an out-of-range `start` leaves the
    /// region empty.
    pub fn init<'a, I>(masks: I, start: Point, cfg: PathsCfg) -> Self
    where
        I: IntoIterator<Item = &'a Polygon>,
    {
        let scale = cfg.scale.max(1);
        let mut passable = Polygon::new();
        let mut merged = 0usize;
        for mask in masks {
            for ring in mask {
                let Some(scaled) = ring.checked_scale(scale) else {
                    warn!(scale, vertices = ring.len(), "ring out of range, skipped");
                    continue;
                };
                passable.add_ring(&scaled);
                merged += 1;
            }
        }
        match start.checked_scale(scale) {
            Some(seed) => passable.flood_fill(seed),
            None => {
                warn!(x = start.x, y = start.y, scale, "start out of coordinate range");
                passable = Polygon::new();
            }
        }

        let corners: Vec<Corner> = passable
            .iter()
            .filter(|r| r.len() >= 3)
            .flat_map(|r| r.corners())
            .filter(|c| c.back().cross(c.forward()) >= 0)
            .collect();
        let mut paths = Self {
            passable,
            waypoints: Vec::with_capacity(corners.len()),
            scale,
        };
        for c in corners {
            paths.add_waypoint(c);
        }
        debug!(
            scale,
            rings_merged = merged,
            rings_kept = paths.passable.len(),
            waypoints = paths.waypoints.len(),
            sightlines = paths.sightline_count(),
            "walkable region ready"
        );
        paths
    }

    /// Register a concave corner and link it to every earlier waypoint it can
    /// see. A sightline must leave both corners into the region, cross no
    /// boundary, and have its midpoint inside.
    fn add_waypoint(&mut self, corner: Corner) {
        let end = self.waypoints.len();
        let here = Waypoint::new(corner.here, corner.back(), corner.forward());
        let mut links = Vec::new();
        for (i, other) in self.waypoints.iter().enumerate() {
            let dir = other.point - here.point;
            if !here.opens_toward(dir) || !other.opens_toward(-dir) {
                continue;
            }
            if !self.visible(here.point, other.point) {
                continue;
            }
            links.push(Sightline {
                to: i,
                length: dir.length(),
            });
        }
        for s in &links {
            self.waypoints[s.to].sightlines.push(Sightline {
                to: end,
                length: s.length,
            });
        }
        self.waypoints.push(Waypoint {
            sightlines: links,
            ..here
        });
    }

    /// Whether the straight walk `from → to` stays in the region (internal
    /// coordinates). The midpoint check tells a chord through the region from
    /// one across a hole when both ends sit on the boundary.
    pub fn visible(&self, from: Point, to: Point) -> bool {
        !self.passable.intersects(from, to) && self.passable.contains((from + to) / 2)
    }

    /// Region vertex nearest to `target` by squared distance; first wins ties.
    pub(crate) fn closest_vertex(&self, target: Point) -> Option<Point> {
        let mut best: Option<(i64, Point)> = None;
        for p in self.passable.vertices() {
            let d = target.distance_squared(p);
            if best.map_or(true, |(b, _)| d < b) {
                best = Some((d, p));
            }
        }
        best.map(|(_, p)| p)
    }

    /// Walkable region in internal (scaled) coordinates.
    #[inline]
    pub fn passable(&self) -> &Polygon {
        &self.passable
    }

    /// Graph nodes in internal coordinates, indexed by waypoint id.
    #[inline]
    pub fn nodes(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Waypoint positions in scene coordinates.
    pub fn waypoints(&self) -> Vec<Point> {
        self.waypoints.iter().map(|w| w.point / self.scale).collect()
    }

    /// Number of undirected sightlines.
    pub fn sightline_count(&self) -> usize {
        self.waypoints.iter().map(|w| w.sightlines.len()).sum::<usize>() / 2
    }

    #[inline]
    pub fn scale(&self) -> i32 {
        self.scale
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.passable.is_empty()
    }
}
