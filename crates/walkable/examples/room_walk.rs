//! Build a small room from text masks and print a few routes through it.
//!
//! Usage:
//!   cargo run -p walkable --example room_walk
//!   cargo run -p walkable --example room_walk -- 180,20
//!
//! The room is 200×120 with a wall hanging down from the top edge and a
//! round pillar; the optional argument is the target point `x,y`.

use walkable::mask::{circle, parse_mask};
use walkable::paths::{Paths, PathsCfg};
use walkable::point::Point;

const ROOM: &str = "\
mask 0,0 200,0 200,120 0,120
mask 90,130 110,130 110,40 90,40
";

fn main() {
    let target = std::env::args()
        .nth(1)
        .and_then(|s| {
            let (x, y) = s.split_once(',')?;
            Some(Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
        })
        .unwrap_or(Point::new(180, 100));

    let room = match parse_mask(ROOM) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("room_walk: {e}");
            return;
        }
    };
    let pillar = circle(3) + Point::new(150, 60);
    let start = Point::new(20, 100);
    let paths = Paths::init([&room, &pillar], start, PathsCfg::default());

    println!(
        "region: {} rings, {} waypoints, {} sightlines",
        paths.passable().len(),
        paths.waypoints().len(),
        paths.sightline_count()
    );
    for p in paths.waypoints() {
        println!("  waypoint {},{}", p.x, p.y);
    }

    let route = paths.find(start, target);
    print!("route {},{}", start.x, start.y);
    for p in route.iter().rev() {
        print!(" -> {},{}", p.x, p.y);
    }
    println!();
}
