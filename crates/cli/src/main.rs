use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use walkable::paths::Paths;
use walkable::point::{Point, COORD_LIMIT};
use walkable::ring::Polarity;

mod provenance;
mod scene;

use provenance::{write_sidecar, Payload};
use scene::Scene;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Walkable regions and routes for JSON scenes")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the walkable region around the scene's start point
    Walkable {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Find a route between two points, in walk order
    Route {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: Point,
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Point,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the JSON results.
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Walkable { scene, out } => walkable(&scene, out.as_deref()),
        Action::Route {
            scene,
            from,
            to,
            out,
        } => route(&scene, from, to, out.as_deref()),
        Action::Report => report(),
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let coord = |c: &str| {
        c.trim()
            .parse::<i32>()
            .map_err(|e| format!("bad coordinate {c:?}: {e}"))
    };
    let p = Point::new(coord(x)?, coord(y)?);
    if !p.in_range() {
        return Err(format!("{s:?} is outside the coordinate range |c| < {COORD_LIMIT}"));
    }
    Ok(p)
}

#[derive(Serialize)]
struct RingOut {
    polarity: &'static str,
    points: Vec<[i32; 2]>,
}

#[derive(Serialize)]
struct RegionOut {
    scale: i32,
    rings: Vec<RingOut>,
    waypoints: Vec<[i32; 2]>,
    sightlines: usize,
}

#[derive(Serialize)]
struct RouteOut {
    from: [i32; 2],
    to: [i32; 2],
    path: Vec<[i32; 2]>,
    length: f64,
}

fn xy(p: Point) -> [i32; 2] {
    [p.x, p.y]
}

fn build(scene_path: &Path) -> Result<(Scene, Paths)> {
    let scene = Scene::load(scene_path)?;
    let masks = scene
        .masks()
        .with_context(|| format!("loading masks from {}", scene_path.display()))?;
    let paths = Paths::init(&masks, scene.start(), scene.cfg());
    Ok((scene, paths))
}

fn walkable(scene_path: &Path, out: Option<&Path>) -> Result<()> {
    tracing::info!(scene = %scene_path.display(), out = ?out, "walkable");
    let (scene, paths) = build(scene_path)?;
    let scale = paths.scale();
    let region = RegionOut {
        scale,
        rings: paths
            .passable()
            .iter()
            .map(|r| RingOut {
                polarity: match r.polarity() {
                    Polarity::Fill => "fill",
                    Polarity::Hole => "hole",
                },
                points: r.points.iter().map(|&p| xy(p / scale)).collect(),
            })
            .collect(),
        waypoints: paths.waypoints().into_iter().map(xy).collect(),
        sightlines: paths.sightline_count(),
    };
    let params = json!({ "command": "walkable", "start": scene.start, "scale": scale });
    emit(&region, out, Payload::new(params).with_input(scene_path))
}

fn route(scene_path: &Path, from: Point, to: Point, out: Option<&Path>) -> Result<()> {
    tracing::info!(
        scene = %scene_path.display(),
        from = ?xy(from),
        to = ?xy(to),
        out = ?out,
        "route"
    );
    let (_, paths) = build(scene_path)?;
    let scale = paths.scale();
    for (name, p) in [("--from", from), ("--to", to)] {
        anyhow::ensure!(
            p.checked_scale(scale).is_some(),
            "{name} {:?} leaves the coordinate range at scale {scale}",
            xy(p)
        );
    }
    // `find` returns a stack; reverse it into walk order.
    let walk: Vec<Point> = paths.find(from, to).into_iter().rev().collect();
    let mut length = 0.0;
    let mut at = from;
    for &p in &walk {
        length += at.distance(p);
        at = p;
    }
    let result = RouteOut {
        from: xy(from),
        to: xy(to),
        path: walk.into_iter().map(xy).collect(),
        length,
    };
    let params = json!({ "command": "route", "from": xy(from), "to": xy(to) });
    emit(&result, out, Payload::new(params).with_input(scene_path))
}

/// Print `value` as JSON, or write it to `out` with a provenance sidecar.
fn emit<T: Serialize>(value: &T, out: Option<&Path>, payload: Payload) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    let Some(out) = out else {
        println!("{text}");
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out, text).with_context(|| format!("writing {}", out.display()))?;
    let sidecar = write_sidecar(out, payload)?;
    tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "wrote");
    Ok(())
}

fn report() -> Result<()> {
    tracing::info!("report");
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "version": walkable::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
