//! The steppable best-first search core shared by every algorithm.
//!
//! A [`BestFirst`] search expands one node per call to [`Search::step`] and
//! appends what it did to an event buffer, so the caller regains control
//! after every expansion and can render, replay or stop.

use std::rc::Rc;

use pathviz_core::{Point, Range};

use crate::frontier::Frontier;
use crate::reconstruct::{Disconnected, reconstruct};
use crate::traits::{Heuristic, Pather};

/// Sentinel distance for nodes not reached yet.
pub const UNREACHABLE: i32 = i32::MAX;

/// Cost of one move between adjacent walkable cells.
pub const STEP_COST: i32 = 1;

/// A single exploration event, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchEvent {
    /// A node entered the frontier or had its priority improved.
    Frontier { pos: Point, priority: i32 },
    /// A node was popped and settled.
    Visited { pos: Point },
}

/// What a search reports after a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// More steps are needed.
    Running,
    /// Path from Start to End, both inclusive.
    Found(Vec<Point>),
    /// Every reachable node was explored without reaching the goal.
    NotFound,
}

impl Progress {
    #[inline]
    pub fn is_finished(&self) -> bool {
        !matches!(self, Progress::Running)
    }
}

/// A search that advances one expansion at a time.
pub trait Search {
    /// Run one expansion, appending its events to `events`.
    ///
    /// Once a finished [`Progress`] is returned the search must not be
    /// stepped again.
    fn step(&mut self, events: &mut Vec<SearchEvent>) -> Result<Progress, Disconnected>;

    /// Number of nodes settled so far.
    fn visited_count(&self) -> usize;
}

/// Per-cell search state, fresh for every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    /// Best known cost from the root (g-score).
    pub dist: i32,
    pub parent: Option<usize>,
    /// Settled: `dist` is final.
    pub closed: bool,
}

impl Default for SearchNode {
    fn default() -> Self {
        Self {
            dist: UNREACHABLE,
            parent: None,
            closed: false,
        }
    }
}

/// Outcome of a single expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Expansion {
    Settled(usize),
    Exhausted,
}

/// Best-first search from one root, ordered by `g + h`.
///
/// With [`Uniform`](crate::Uniform) this is Dijkstra's algorithm; with
/// [`Manhattan`](crate::Manhattan) it is A*. Among equal `g + h` the node
/// with the smaller `h` is expanded first, then insertion order decides.
///
/// With a target the search stops as soon as the target is settled. Without
/// one it keeps expanding until the frontier is empty, which is how the two
/// halves of a bidirectional search run.
pub struct BestFirst<P, H> {
    pather: Rc<P>,
    heuristic: H,
    bounds: Range,
    root: Option<usize>,
    target: Option<Point>,
    nodes: Vec<SearchNode>,
    frontier: Frontier<usize, (i32, i32)>,
    /// Nodes whose distance improved during the last expansion.
    relaxed: Vec<usize>,
    nbuf: Vec<Point>,
    visited: usize,
}

impl<P: Pather, H: Heuristic> BestFirst<P, H> {
    /// Create a search rooted at `root`. A root outside the pather's bounds
    /// yields a search that is exhausted on its first step.
    pub fn new(pather: Rc<P>, heuristic: H, root: Point, target: Option<Point>) -> Self {
        let bounds = pather.bounds();
        let mut search = Self {
            pather,
            heuristic,
            bounds,
            root: bounds.index(root),
            target,
            nodes: vec![SearchNode::default(); bounds.len()],
            frontier: Frontier::new(),
            relaxed: Vec::new(),
            nbuf: Vec::with_capacity(4),
            visited: 0,
        };
        if let Some(ri) = search.root {
            let h = search.estimate(root);
            search.nodes[ri].dist = 0;
            search.frontier.push(ri, (h, h));
        }
        search
    }

    #[inline]
    fn estimate(&self, p: Point) -> i32 {
        self.target
            .map_or(0, |t| self.heuristic.estimate(p, t))
    }

    /// Pop the best node, settle it, and relax its neighbours unless it is
    /// the target.
    pub(crate) fn expand(&mut self, events: &mut Vec<SearchEvent>) -> Expansion {
        self.relaxed.clear();
        let Some((ci, _)) = self.frontier.pop_min() else {
            return Expansion::Exhausted;
        };

        self.nodes[ci].closed = true;
        self.visited += 1;
        let cp = self.bounds.point(ci);
        events.push(SearchEvent::Visited { pos: cp });
        log::trace!("settled {cp} at distance {}", self.nodes[ci].dist);

        if self.target == Some(cp) {
            return Expansion::Settled(ci);
        }

        let current_g = self.nodes[ci].dist;
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.pather.neighbors(cp, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = self.bounds.index(np) else {
                continue;
            };
            let tentative = current_g + STEP_COST;
            let n = self.nodes[ni];
            if n.closed || tentative >= n.dist {
                continue;
            }

            let h = self.estimate(np);
            let f = tentative + h;
            self.nodes[ni] = SearchNode {
                dist: tentative,
                parent: Some(ci),
                closed: false,
            };
            self.frontier.push(ni, (f, h));
            self.relaxed.push(ni);
            events.push(SearchEvent::Frontier {
                pos: np,
                priority: f,
            });
        }

        self.nbuf = nbuf;
        Expansion::Settled(ci)
    }

    /// Path from the root to node `idx`, following parent links.
    pub fn path_to(&self, idx: usize) -> Result<Vec<Point>, Disconnected> {
        let root = self.root.ok_or(Disconnected {
            terminal: idx,
            steps: 0,
        })?;
        let chain = reconstruct(|i| self.nodes[i].parent, root, idx, self.nodes.len())?;
        Ok(chain.into_iter().map(|i| self.bounds.point(i)).collect())
    }

    /// Best known distance of node `idx`, if it has been reached.
    #[inline]
    pub fn dist(&self, idx: usize) -> Option<i32> {
        self.nodes
            .get(idx)
            .map(|n| n.dist)
            .filter(|&d| d != UNREACHABLE)
    }

    #[inline]
    pub fn is_closed(&self, idx: usize) -> bool {
        self.nodes.get(idx).is_some_and(|n| n.closed)
    }

    /// Lowest priority still waiting in the frontier.
    pub fn min_priority(&mut self) -> Option<i32> {
        self.frontier.peek_priority().map(|(f, _)| f)
    }

    /// Nodes whose distance improved during the last expansion.
    #[inline]
    pub fn relaxed(&self) -> &[usize] {
        &self.relaxed
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Per-cell state, indexed row-major over [`bounds`](Self::bounds).
    #[inline]
    pub fn nodes(&self) -> &[SearchNode] {
        &self.nodes
    }

    /// Distance of `p` if it has been reached.
    pub fn dist_at(&self, p: Point) -> Option<i32> {
        self.bounds.index(p).and_then(|i| self.dist(i))
    }
}

impl<P: Pather, H: Heuristic> Search for BestFirst<P, H> {
    fn step(&mut self, events: &mut Vec<SearchEvent>) -> Result<Progress, Disconnected> {
        match self.expand(events) {
            Expansion::Exhausted => Ok(Progress::NotFound),
            Expansion::Settled(ci) if self.target == Some(self.bounds.point(ci)) => {
                Ok(Progress::Found(self.path_to(ci)?))
            }
            Expansion::Settled(_) => Ok(Progress::Running),
        }
    }

    #[inline]
    fn visited_count(&self) -> usize {
        self.visited
    }
}
