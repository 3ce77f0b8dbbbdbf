//! Random star-shaped integer rings (radial jitter + replay tokens).
//!
//! Purpose
//! - Reproducible simple rings for property tests and benchmarks: obstacle
//!   masks, nested holes, whole random scenes.
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular and
//!   radial jitter, sort by angle and round to integer coordinates around a
//!   centre. Sorted angles around the centre give a simple polygon; increasing
//!   angle is counterclockwise, i.e. `Fill` polarity.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::point::Point;
use crate::polygon::Polygon;
use crate::ring::{Polarity, Ring};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii are `base_radius * (1 + u)` with `u ∈ [-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    /// Base radius in integer units.
    pub base_radius: f64,
    pub random_phase: bool,
}

impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 100.0,
            random_phase: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random star-shaped ring around `center` with the given polarity.
///
/// Consecutive vertices that round onto the same integer point are merged,
/// so very small radii can yield fewer vertices than requested.
pub fn draw_ring_radial(
    cfg: RadialCfg,
    center: Point,
    polarity: Polarity,
    tok: ReplayToken,
) -> Ring {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.95);
    let r0 = cfg.base_radius.max(1.0);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        0.0
    };
    let mut angles: Vec<f64> = (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            phase + (k as f64) * delta + jitter
        })
        .collect();
    angles.sort_by(f64::total_cmp);

    let c = center.to_vec2();
    let mut points: Vec<Point> = Vec::with_capacity(n);
    for th in angles {
        let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
        let v = c + Vector2::new(th.cos(), th.sin()) * (r0 * (1.0 + u));
        let p = Point::new(v.x.round() as i32, v.y.round() as i32);
        if points.last() != Some(&p) {
            points.push(p);
        }
    }
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    let mut ring = Ring::new(points);
    if polarity == Polarity::Hole {
        ring.reverse();
    }
    ring
}

/// Scene of `cols × rows` jittered obstacles (holes) on a grid inside a
/// square room (fill) of side `cols.max(rows) * spacing`. Obstacles fit in
/// their cells, so none of them overlap.
pub fn draw_grid_scene(cols: usize, rows: usize, spacing: i32, tok: ReplayToken) -> Vec<Polygon> {
    let side = spacing * cols.max(rows).max(1) as i32;
    let room = Ring::new(vec![
        Point::new(0, 0),
        Point::new(side, 0),
        Point::new(side, side),
        Point::new(0, side),
    ]);
    let cfg = RadialCfg {
        vertex_count: VertexCount::Uniform { min: 4, max: 9 },
        base_radius: f64::from(spacing) * 0.25,
        ..RadialCfg::default()
    };
    let mut masks = vec![Polygon::from_rings(vec![room])];
    for row in 0..rows {
        for col in 0..cols {
            let center = Point::new(
                spacing / 2 + spacing * col as i32,
                spacing / 2 + spacing * row as i32,
            );
            let t = ReplayToken {
                seed: tok.seed,
                index: tok.index.wrapping_add((row * cols + col) as u64),
            };
            let ring = draw_ring_radial(cfg, center, Polarity::Hole, t);
            masks.push(Polygon::from_rings(vec![ring]));
        }
    }
    masks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproducible_draw() {
        let cfg = RadialCfg::default();
        let tok = ReplayToken { seed: 42, index: 7 };
        let a = draw_ring_radial(cfg, Point::new(10, 10), Polarity::Fill, tok);
        let b = draw_ring_radial(cfg, Point::new(10, 10), Polarity::Fill, tok);
        assert_eq!(a, b);
        let other = draw_ring_radial(cfg, Point::new(10, 10), Polarity::Fill, ReplayToken {
            seed: 42,
            index: 8,
        });
        assert_ne!(a, other);
    }

    #[test]
    fn polarity_and_containment() {
        let cfg = RadialCfg {
            vertex_count: VertexCount::Fixed(9),
            ..RadialCfg::default()
        };
        let tok = ReplayToken { seed: 1, index: 0 };
        let fill = draw_ring_radial(cfg, Point::new(-50, 20), Polarity::Fill, tok);
        let hole = draw_ring_radial(cfg, Point::new(-50, 20), Polarity::Hole, tok);
        assert_eq!(fill.len(), 9);
        assert_eq!(fill.polarity(), Polarity::Fill);
        assert_eq!(hole.polarity(), Polarity::Hole);
        assert_eq!(fill.area2(), -hole.area2());
        assert!(fill.contains(Point::new(-50, 20)));
        assert!(!fill.contains(Point::new(200, 20)));
    }

    #[test]
    fn grid_scene_layout() {
        let masks = draw_grid_scene(3, 2, 100, ReplayToken { seed: 5, index: 0 });
        assert_eq!(masks.len(), 7);
        assert_eq!(masks[0].rings[0].area2(), 2 * 300 * 300);
        assert!(masks[1..].iter().all(|m| m.rings[0].is_hole()));
        assert!(masks[1].rings[0].contains(Point::new(50, 50)));
    }
}
