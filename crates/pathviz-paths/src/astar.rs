use std::rc::Rc;

use pathviz_core::Point;

use crate::distance::Manhattan;
use crate::search::BestFirst;
use crate::traits::Pather;

/// A* search guided by Manhattan distance.
pub type AStar<P> = BestFirst<P, Manhattan>;

impl<P: Pather> BestFirst<P, Manhattan> {
    /// A* search from `start`, stopping once `end` is settled.
    ///
    /// Manhattan distance never overestimates the remaining moves on a
    /// 4-connected unit-cost grid and is consistent, so the path found is a
    /// shortest path by move count. It is not necessarily the same shortest
    /// path Dijkstra would pick.
    pub fn astar(pather: Rc<P>, start: Point, end: Point) -> Self {
        Self::new(pather, Manhattan, start, Some(end))
    }
}
