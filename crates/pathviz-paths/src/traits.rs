use pathviz_core::{Point, Range, Snapshot};

/// Minimal search interface: bounds plus neighbour enumeration.
///
/// Every traversable edge costs one step.
pub trait Pather {
    /// The rectangle searched. Node tables are sized from it.
    fn bounds(&self) -> Range;

    /// Append walkable neighbours of `p` into `buf`, in expansion order.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Estimate of the remaining cost from `from` to `to`.
///
/// Must never overestimate the true cost (admissible) for the search to
/// return shortest paths.
pub trait Heuristic {
    fn estimate(&self, from: Point, to: Point) -> i32;
}

impl Pather for Snapshot {
    #[inline]
    fn bounds(&self) -> Range {
        Snapshot::bounds(self)
    }

    #[inline]
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(Snapshot::neighbors(self, p));
    }
}
