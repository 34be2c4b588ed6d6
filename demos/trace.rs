//! Terminal demo: run every search on one random grid and print what each
//! explored.
//!
//! Run: cargo run --bin pathviz-trace -- [ROWS] [COLS] [--density D] [--seed N]
//!
//! Set `RUST_LOG=debug` to see run lifecycle logs.

use std::collections::HashSet;
use std::process;

use clap::Parser;
use pathviz_core::{CellKind, Grid, Point};
use pathviz_paths::Algorithm;
use pathviz_run::{RunController, RunError, Trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Run every search on one random grid.
#[derive(Parser, Debug)]
#[command(name = "pathviz-trace")]
struct Args {
    /// Grid rows
    #[arg(default_value_t = 12, value_parser = clap::value_parser!(i32).range(2..))]
    rows: i32,

    /// Grid columns
    #[arg(default_value_t = 24, value_parser = clap::value_parser!(i32).range(2..))]
    cols: i32,

    /// Chance of each empty cell becoming a wall
    #[arg(short, long, default_value_t = 0.25, value_parser = parse_density)]
    density: f64,

    /// Seed for the wall layout
    #[arg(short, long, default_value_t = 7)]
    seed: u64,
}

fn parse_density(s: &str) -> Result<f64, String> {
    let density: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !(0.0..=1.0).contains(&density) {
        return Err(format!("{density} is not between 0 and 1"));
    }
    Ok(density)
}

/// The grid with explored cells as `+` and the path as `*`.
fn overlay(grid: &Grid, trace: &Trace) -> String {
    let visited: HashSet<Point> = trace.visited().collect();
    let path: HashSet<Point> = trace
        .result()
        .and_then(|r| r.outcome.path())
        .map(|p| p.iter().copied().collect())
        .unwrap_or_default();

    let mut out = String::new();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let p = Point::at(row, col);
            let kind = grid.kind(p).unwrap_or_default();
            let ch = match kind {
                CellKind::Empty if path.contains(&p) => '*',
                CellKind::Empty if visited.contains(&p) => '+',
                other => other.glyph(),
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

fn run(args: &Args) -> Result<(), RunError> {
    let mut ctl = RunController::new(args.rows, args.cols);
    ctl.set_start(Point::at(0, 0))?;
    ctl.set_end(Point::at(args.rows - 1, args.cols - 1))?;
    let mut rng = StdRng::seed_from_u64(args.seed);
    let walls = ctl.scatter_walls(args.density, &mut rng)?;
    println!(
        "{}x{} grid, {walls} walls (density {}, seed {})\n",
        args.rows, args.cols, args.density, args.seed
    );

    for algorithm in Algorithm::ALL {
        ctl.run(algorithm)?;
        let trace = ctl.record()?;
        let Some(result) = trace.result() else {
            log::warn!("{algorithm} trace ended without a result");
            continue;
        };
        match result.path_len() {
            Some(len) => println!(
                "{algorithm}: path of {len} moves, {} nodes visited, {} events",
                result.visited_count,
                trace.len()
            ),
            None => println!(
                "{algorithm}: no path, {} nodes visited, {} events",
                result.visited_count,
                trace.len()
            ),
        }
        println!("{}", overlay(ctl.grid(), &trace));
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
