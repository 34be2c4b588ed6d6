use std::rc::Rc;

use pathviz_core::Point;

use crate::distance::Uniform;
use crate::search::BestFirst;
use crate::traits::Pather;

/// Uniform-cost search from Start to End.
pub type Dijkstra<P> = BestFirst<P, Uniform>;

impl<P: Pather> BestFirst<P, Uniform> {
    /// Dijkstra search from `start`, stopping once `end` is settled.
    ///
    /// All moves cost the same, so the path found is a shortest path by
    /// move count.
    pub fn dijkstra(pather: Rc<P>, start: Point, end: Point) -> Self {
        Self::new(pather, Uniform, start, Some(end))
    }
}
