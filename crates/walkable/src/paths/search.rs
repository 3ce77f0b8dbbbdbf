//! A* queries over the waypoint graph.

use std::collections::BinaryHeap;

use tracing::{trace, warn};

use crate::point::Point;

use super::graph::Paths;
use super::types::{Node, Scratch};

impl Paths {
    /// Waypoints to walk through from `from` to `to` (scene coordinates).
    ///
    /// The result is in stack order: the target comes first and the first
    /// waypoint to visit last. A target outside the region is replaced by the
    /// nearest region vertex. Empty if the region is empty, no path exists,
    /// or an endpoint leaves the coordinate range once scaled.
    pub fn find(&self, from: Point, to: Point) -> Vec<Point> {
        let mut scratch = Scratch::new();
        self.find_with(&mut scratch, from, to)
    }

    /// Like `find`, reusing the caller's scratch buffer.
    pub fn find_with(&self, scratch: &mut Scratch, from: Point, to: Point) -> Vec<Point> {
        if self.is_empty() {
            trace!("no walkable region");
            return Vec::new();
        }
        let scale = self.scale();
        let ends = (from.checked_scale(scale), to.checked_scale(scale));
        let (Some(from), Some(mut to)) = ends else {
            warn!(scale, "query endpoint out of coordinate range");
            return Vec::new();
        };
        if !self.passable().contains(to) {
            let Some(v) = self.closest_vertex(to) else {
                return Vec::new();
            };
            trace!(x = v.x, y = v.y, "target outside region, snapped to vertex");
            to = v;
        }
        if self.visible(from, to) {
            trace!("direct line of sight");
            return vec![to / scale];
        }

        let nodes = self.nodes();
        scratch.reset(
            nodes
                .iter()
                .map(|w| (w.point.distance(to), self.visible(w.point, to))),
        );
        let slots = &mut scratch.slots;
        let mut open = BinaryHeap::new();
        for (i, w) in nodes.iter().enumerate() {
            if !self.visible(from, w.point) {
                continue;
            }
            let g = from.distance(w.point);
            slots[i].best = g;
            open.push(Node {
                f: g + slots[i].to_target,
                g,
                index: i,
            });
        }

        let mut found = None;
        while let Some(node) = open.pop() {
            let slot = slots[node.index];
            if node.g > slot.best {
                continue;
            }
            // Heuristic is exact from a node that sees the target.
            if slot.sees_target {
                found = Some(node.index);
                break;
            }
            for s in &nodes[node.index].sightlines {
                let g = node.g + s.length;
                let next = &mut slots[s.to];
                if g >= next.best {
                    continue;
                }
                next.best = g;
                next.backtrack = Some(node.index);
                open.push(Node {
                    f: g + next.to_target,
                    g,
                    index: s.to,
                });
            }
        }

        let Some(mut i) = found else {
            trace!("no path");
            return Vec::new();
        };
        let mut path = vec![to / scale];
        loop {
            path.push(nodes[i].point / scale);
            match slots[i].backtrack {
                Some(j) => i = j,
                None => break,
            }
        }
        trace!(waypoints = path.len() - 1, "path found");
        path
    }
}
