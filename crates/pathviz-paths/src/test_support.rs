//! Helpers shared by the search tests.

use std::collections::VecDeque;
use std::rc::Rc;

use pathviz_core::{CellKind, Grid, Point, Snapshot};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::search::{Progress, Search, SearchEvent};

pub(crate) struct Finished {
    pub progress: Progress,
    pub events: Vec<SearchEvent>,
    pub visited: usize,
    pub steps: usize,
}

impl Finished {
    pub fn path(&self) -> Option<&[Point]> {
        match &self.progress {
            Progress::Found(path) => Some(path),
            _ => None,
        }
    }

    /// Path length in moves.
    pub fn len(&self) -> Option<usize> {
        self.path().map(|p| p.len() - 1)
    }

    pub fn visited_positions(&self) -> Vec<Point> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SearchEvent::Visited { pos } => Some(*pos),
                SearchEvent::Frontier { .. } => None,
            })
            .collect()
    }
}

/// Parse a grid and return its snapshot with both endpoints.
pub(crate) fn parse(text: &str) -> (Rc<Snapshot>, Point, Point) {
    let grid = Grid::from_ascii(text).unwrap();
    let start = grid.start().unwrap();
    let end = grid.end().unwrap();
    (Rc::new(grid.snapshot()), start, end)
}

pub(crate) fn open_grid(rows: i32, cols: i32, start: Point, end: Point) -> Rc<Snapshot> {
    let mut grid = Grid::new(rows, cols);
    grid.set_cell_kind(start, CellKind::Start).unwrap();
    grid.set_cell_kind(end, CellKind::End).unwrap();
    Rc::new(grid.snapshot())
}

/// Step `search` until it finishes.
pub(crate) fn drive(search: &mut impl Search) -> Finished {
    let mut events = Vec::new();
    let mut steps = 0;
    loop {
        steps += 1;
        assert!(steps < 100_000, "search did not terminate");
        let progress = search.step(&mut events).unwrap();
        if progress.is_finished() {
            return Finished {
                progress,
                events,
                visited: search.visited_count(),
                steps,
            };
        }
    }
}

/// Brute-force shortest path length in moves.
pub(crate) fn bfs_len(snapshot: &Snapshot, start: Point, end: Point) -> Option<usize> {
    let bounds = snapshot.bounds();
    let mut dist = vec![usize::MAX; bounds.len()];
    let mut queue = VecDeque::new();
    dist[bounds.index(start)?] = 0;
    queue.push_back(start);
    while let Some(p) = queue.pop_front() {
        let d = dist[bounds.index(p)?];
        if p == end {
            return Some(d);
        }
        for n in snapshot.neighbors(p) {
            let ni = bounds.index(n)?;
            if dist[ni] == usize::MAX {
                dist[ni] = d + 1;
                queue.push_back(n);
            }
        }
    }
    None
}

/// A path is valid if it runs from `start` to `end` in unit steps over
/// walkable cells without repeating a cell.
pub(crate) fn assert_valid_path(snapshot: &Snapshot, path: &[Point], start: Point, end: Point) {
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&end));
    for w in path.windows(2) {
        let d = w[1] - w[0];
        assert_eq!(d.x.abs() + d.y.abs(), 1, "non-adjacent step {} -> {}", w[0], w[1]);
    }
    for p in path {
        assert!(snapshot.is_walkable(*p), "path crosses wall at {p}");
    }
    let mut seen = path.to_vec();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), path.len(), "path repeats a cell");
}

/// Seeded random grid with walls and two distinct endpoints.
pub(crate) fn random_grid(seed: u64) -> (Rc<Snapshot>, Point, Point) {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = rng.random_range(2..=10);
    let cols = rng.random_range(2..=10);
    let mut grid = Grid::new(rows, cols);
    let density = rng.random_range(0.0..0.45);
    grid.scatter_walls(density, &mut rng);

    let start = Point::at(rng.random_range(0..rows), rng.random_range(0..cols));
    let mut end = start;
    while end == start {
        end = Point::at(rng.random_range(0..rows), rng.random_range(0..cols));
    }
    grid.set_cell_kind(start, CellKind::Start).unwrap();
    grid.set_cell_kind(end, CellKind::End).unwrap();
    (Rc::new(grid.snapshot()), start, end)
}
