//! Random maze solved with A*.
//!
//! Run: cargo run --bin maze -- [width] [height] [wall-density] [diagonal]

use pathkit_core::{FromRadix, ParseError, Point, parse_int};
use pathkit_paths::{GridMap, Movement};

const DEFAULT_WIDTH: i32 = 40;
const DEFAULT_HEIGHT: i32 = 16;
const DEFAULT_DENSITY: f64 = 0.3;

fn arg_or<T: FromRadix>(args: &[String], i: usize, default: T) -> Result<T, ParseError> {
    match args.get(i) {
        Some(text) => parse_int(text, 10),
        None => Ok(default),
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let width = arg_or(&args, 0, DEFAULT_WIDTH)?.max(2);
    let height = arg_or(&args, 1, DEFAULT_HEIGHT)?.max(1);
    let density = match args.get(2) {
        Some(text) => text.parse::<f64>()?.clamp(0.0, 1.0),
        None => DEFAULT_DENSITY,
    };
    let movement = match args.get(3).map(String::as_str) {
        Some("diagonal") => Movement::Diagonal,
        _ => Movement::Cardinal,
    };

    let start = Point::new(0, 0);
    let goal = Point::new(width - 1, height - 1);
    let mut map = GridMap::new(width, height, start, goal).with_movement(movement);
    for p in map.range() {
        if p != start && p != goal && rand::random_bool(density) {
            map.set_wall(p, true);
        }
    }

    let outcome = map.solve();
    match &outcome.path {
        Some(path) => {
            println!("{}", map.render(&path.nodes));
            println!("path: {} steps, cost {}", path.len() - 1, path.cost);
        }
        None => {
            println!("{map}");
            println!("no path from {start} to {goal}");
        }
    }
    let stats = outcome.stats;
    println!(
        "expanded {} nodes, pushed {} ({} requeued, {} stale)",
        stats.expanded, stats.pushed, stats.requeued, stats.stale
    );
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
