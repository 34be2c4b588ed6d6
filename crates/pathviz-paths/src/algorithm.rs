//! Algorithm selection and a single stepping interface over all of them.

use std::fmt;
use std::rc::Rc;

use pathviz_core::Point;

use crate::astar::AStar;
use crate::bidijkstra::{Bidirectional, MeetingPolicy};
use crate::dijkstra::Dijkstra;
use crate::reconstruct::Disconnected;
use crate::search::{Progress, Search, SearchEvent};
use crate::traits::Pather;

/// The searches a run can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Dijkstra,
    AStar,
    BidirectionalDijkstra,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::BidirectionalDijkstra,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::BidirectionalDijkstra => "bidirectional",
        }
    }

    /// Parse a name as produced by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One in-progress search of any [`Algorithm`].
pub enum Searcher<P> {
    Dijkstra(Dijkstra<P>),
    AStar(AStar<P>),
    Bidirectional(Bidirectional<P>),
}

impl<P: Pather> Searcher<P> {
    /// Start a search of kind `algorithm`. `policy` only matters for the
    /// bidirectional search.
    pub fn new(
        algorithm: Algorithm,
        pather: Rc<P>,
        start: Point,
        end: Point,
        policy: MeetingPolicy,
    ) -> Self {
        match algorithm {
            Algorithm::Dijkstra => Searcher::Dijkstra(Dijkstra::dijkstra(pather, start, end)),
            Algorithm::AStar => Searcher::AStar(AStar::astar(pather, start, end)),
            Algorithm::BidirectionalDijkstra => {
                Searcher::Bidirectional(Bidirectional::new(pather, start, end, policy))
            }
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Searcher::Dijkstra(_) => Algorithm::Dijkstra,
            Searcher::AStar(_) => Algorithm::AStar,
            Searcher::Bidirectional(_) => Algorithm::BidirectionalDijkstra,
        }
    }
}

impl<P: Pather> Search for Searcher<P> {
    fn step(&mut self, events: &mut Vec<SearchEvent>) -> Result<Progress, Disconnected> {
        match self {
            Searcher::Dijkstra(s) => s.step(events),
            Searcher::AStar(s) => s.step(events),
            Searcher::Bidirectional(s) => s.step(events),
        }
    }

    fn visited_count(&self) -> usize {
        match self {
            Searcher::Dijkstra(s) => s.visited_count(),
            Searcher::AStar(s) => s.visited_count(),
            Searcher::Bidirectional(s) => s.visited_count(),
        }
    }
}
