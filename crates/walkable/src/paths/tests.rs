use super::*;
use crate::mask::circle;
use crate::point::Point;
use crate::polygon::Polygon;
use crate::rand::{draw_grid_scene, ReplayToken};
use crate::ring::Ring;
use proptest::prelude::*;

fn ring(pts: &[(i32, i32)]) -> Ring {
    pts.iter().map(|&p| Point::from(p)).collect()
}

fn mask(rings: Vec<Ring>) -> Polygon {
    Polygon::from_rings(rings)
}

fn square(side: i32) -> Ring {
    ring(&[(0, 0), (side, 0), (side, side), (0, side)])
}

fn notch_scene() -> Vec<Polygon> {
    vec![
        mask(vec![square(100)]),
        mask(vec![ring(&[(40, -10), (40, 70), (60, 70), (60, -10)])]),
    ]
}

fn l_room() -> Vec<Polygon> {
    vec![mask(vec![ring(&[
        (0, 0),
        (100, 0),
        (100, 50),
        (50, 50),
        (50, 100),
        (0, 100),
    ])])]
}

/// Length of the walk `from → path[last] → … → path[0]`.
fn walk_length(from: Point, path: &[Point]) -> f64 {
    let mut at = from;
    let mut total = 0.0;
    for &p in path.iter().rev() {
        total += at.distance(p);
        at = p;
    }
    total
}

#[test]
fn open_room_returns_target_only() {
    let paths = Paths::init(&[mask(vec![square(100)])], Point::new(50, 50), PathsCfg::default());
    assert!(paths.waypoints().is_empty());
    assert_eq!(
        paths.find(Point::new(10, 10), Point::new(90, 90)),
        vec![Point::new(90, 90)]
    );
}

#[test]
fn notch_routes_through_its_corners() {
    let paths = Paths::init(&notch_scene(), Point::new(20, 20), PathsCfg::default());
    let mut corners = paths.waypoints();
    corners.sort_by_key(|p| (p.x, p.y));
    assert_eq!(corners, vec![Point::new(40, 70), Point::new(60, 70)]);
    assert_eq!(paths.sightline_count(), 1);

    let from = Point::new(20, 20);
    let path = paths.find(from, Point::new(80, 20));
    assert_eq!(
        path,
        vec![Point::new(80, 20), Point::new(60, 70), Point::new(40, 70)]
    );
    assert!(walk_length(from, &path) > 60.0);
}

#[test]
fn l_room_has_one_waypoint_at_the_bend() {
    let paths = Paths::init(&l_room(), Point::new(10, 10), PathsCfg::default());
    assert_eq!(paths.waypoints(), vec![Point::new(50, 50)]);
    assert_eq!(
        paths.find(Point::new(90, 20), Point::new(20, 90)),
        vec![Point::new(20, 90), Point::new(50, 50)]
    );
}

#[test]
fn target_outside_snaps_to_nearest_vertex() {
    let paths = Paths::init(&[mask(vec![square(100)])], Point::new(50, 50), PathsCfg::default());
    assert_eq!(
        paths.find(Point::new(10, 10), Point::new(150, 20)),
        vec![Point::new(100, 0)]
    );
}

#[test]
fn start_outside_every_floor_gives_empty_region() {
    let paths = Paths::init(&[mask(vec![square(100)])], Point::new(500, 500), PathsCfg::default());
    assert!(paths.is_empty());
    assert!(paths.find(Point::new(10, 10), Point::new(20, 20)).is_empty());
}

#[test]
fn endpoints_beyond_the_coordinate_range_give_empty_path() {
    let paths = Paths::init(&notch_scene(), Point::new(20, 20), PathsCfg::default());
    assert!(!paths.is_empty());
    assert!(paths.find(Point::new(20, 20), Point::new(600_000_000, 20)).is_empty());
    assert!(paths.find(Point::new(200_000_000, 20), Point::new(80, 20)).is_empty());
    assert!(!paths.find(Point::new(20, 20), Point::new(80, 20)).is_empty());
}

#[test]
fn rings_beyond_the_coordinate_range_are_skipped() {
    let far = ring(&[(0, 0), (200_000_000, 0), (200_000_000, 10), (0, 10)]);
    let masks = vec![mask(vec![square(100)]), mask(vec![far])];
    let paths = Paths::init(&masks, Point::new(20, 20), PathsCfg::default());
    assert_eq!(paths.passable().len(), 1);
    assert_eq!(paths.passable().rings[0], square(100) * 4);

    let lost = Paths::init(&masks, Point::new(200_000_000, 5), PathsCfg::default());
    assert!(lost.is_empty());
}

#[test]
fn walks_around_a_round_obstacle() {
    let room = mask(vec![ring(&[(0, 0), (200, 0), (200, 100), (0, 100)])]);
    let pillar = circle(5) + Point::new(100, 50);
    let paths = Paths::init(&[room, pillar], Point::new(10, 50), PathsCfg::default());
    assert_eq!(paths.passable().len(), 2);
    assert_eq!(paths.waypoints().len(), 8);

    let from = Point::new(20, 50);
    let path = paths.find(from, Point::new(180, 50));
    assert!(path.len() >= 3, "{path:?}");
    assert_eq!(path[0], Point::new(180, 50));
    assert!(walk_length(from, &path) > 160.0);
    let scale = paths.scale();
    for p in &path {
        assert!(paths.passable().contains(*p * scale));
    }
}

#[test]
fn scratch_buffer_is_reusable() {
    let paths = Paths::init(&notch_scene(), Point::new(20, 20), PathsCfg::default());
    let mut scratch = Scratch::new();
    let a = paths.find_with(&mut scratch, Point::new(20, 20), Point::new(80, 20));
    let b = paths.find_with(&mut scratch, Point::new(80, 20), Point::new(20, 20));
    let c = paths.find_with(&mut scratch, Point::new(20, 20), Point::new(80, 20));
    assert_eq!(a, c);
    assert_eq!(b.len(), 3);
    assert_eq!(b[1], Point::new(40, 70));
}

#[test]
fn cone_test_rejects_the_outside_wedge() {
    let w = Waypoint::new(Point::new(50, 50), Point::new(50, 0), Point::new(0, 50));
    assert!(!w.opens_toward(Point::new(1, 1)));
    assert!(w.opens_toward(Point::new(-1, -1)));
    assert!(w.opens_toward(Point::new(1, 0)));
}

/// Exhaustive Dijkstra over the same graph, with the same visibility rules.
fn exhaustive(paths: &Paths, from: Point, to: Point) -> f64 {
    if paths.visible(from, to) {
        return from.distance(to);
    }
    let nodes = paths.nodes();
    let n = nodes.len();
    let mut dist: Vec<f64> = nodes
        .iter()
        .map(|w| {
            if paths.visible(from, w.point) {
                from.distance(w.point)
            } else {
                f64::INFINITY
            }
        })
        .collect();
    let mut done = vec![false; n];
    loop {
        let next = (0..n)
            .filter(|&i| !done[i] && dist[i].is_finite())
            .min_by(|&a, &b| dist[a].total_cmp(&dist[b]));
        let Some(i) = next else {
            break;
        };
        done[i] = true;
        for s in &nodes[i].sightlines {
            dist[s.to] = dist[s.to].min(dist[i] + s.length);
        }
    }
    (0..n)
        .filter(|&i| paths.visible(nodes[i].point, to))
        .map(|i| dist[i] + nodes[i].point.distance(to))
        .fold(f64::INFINITY, f64::min)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn astar_never_beats_exhaustive_search(
        seed in any::<u64>(),
        tx in 1i32..300,
        ty in 1i32..300,
    ) {
        let scene = draw_grid_scene(3, 3, 100, ReplayToken { seed, index: 0 });
        let from = Point::new(2, 2);
        let paths = Paths::init(&scene, from, PathsCfg::default());
        // Masks have no crossings, so every internal vertex is a multiple of
        // the scale and scene-space lengths are exact.
        let scale = paths.scale();
        let to = Point::new(tx, ty);
        prop_assume!(paths.passable().contains(to * scale));

        let path = paths.find(from, to);
        let best = exhaustive(&paths, from * scale, to * scale) / f64::from(scale);
        prop_assert!(!path.is_empty());
        prop_assert_eq!(path[0], to);
        prop_assert!(best.is_finite());
        let len = walk_length(from, &path);
        prop_assert!(len <= best + 1e-6, "A* {} vs exhaustive {}", len, best);
        prop_assert!(len >= from.distance(to) - 1e-9);
    }

    #[test]
    fn direct_sight_returns_exactly_the_target(
        x0 in 1i32..100, y0 in 1i32..100, x1 in 1i32..100, y1 in 1i32..100,
    ) {
        let paths = Paths::init(&[mask(vec![square(100)])], Point::new(50, 50), PathsCfg::default());
        let to = Point::new(x1, y1);
        prop_assert_eq!(paths.find(Point::new(x0, y0), to), vec![to]);
    }
}
