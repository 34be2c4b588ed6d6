use pathviz_core::Point;

use crate::traits::Heuristic;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// The zero heuristic. Best-first search with it is uniform-cost search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Uniform;

impl Heuristic for Uniform {
    #[inline]
    fn estimate(&self, _from: Point, _to: Point) -> i32 {
        0
    }
}

/// Manhattan-distance heuristic, admissible and consistent for
/// 4-directional unit-cost moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}
