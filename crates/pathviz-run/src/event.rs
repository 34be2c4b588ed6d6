//! Events a run emits, in the order they happen.

use pathviz_core::Point;
use pathviz_paths::SearchEvent;

use crate::state::RunState;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Path from Start to End, both inclusive.
    Found(Vec<Point>),
    NotFound,
    Cancelled,
}

impl Outcome {
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            Outcome::Found(path) => Some(path),
            _ => None,
        }
    }

    /// The state a run is left in by this outcome.
    pub fn state(&self) -> RunState {
        match self {
            Outcome::Found(_) => RunState::Found,
            Outcome::NotFound => RunState::NotFound,
            Outcome::Cancelled => RunState::Cancelled,
        }
    }
}

/// Final report of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    pub outcome: Outcome,
    /// Nodes settled before the run ended. For a bidirectional search this
    /// counts both halves.
    pub visited_count: usize,
}

impl RunResult {
    /// Path length in moves, if a path was found.
    pub fn path_len(&self) -> Option<usize> {
        self.outcome.path().map(|p| p.len().saturating_sub(1))
    }
}

/// One entry of a run's event stream.
///
/// Every stream ends with exactly one [`RunEvent::RunResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunEvent {
    /// A node entered the frontier or had its priority improved.
    NodeFrontier { pos: Point, priority: i32 },
    /// A node was settled.
    NodeVisited { pos: Point },
    RunResult(RunResult),
}

impl RunEvent {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunEvent::RunResult(_))
    }
}

impl From<SearchEvent> for RunEvent {
    fn from(ev: SearchEvent) -> Self {
        match ev {
            SearchEvent::Frontier { pos, priority } => RunEvent::NodeFrontier { pos, priority },
            SearchEvent::Visited { pos } => RunEvent::NodeVisited { pos },
        }
    }
}

impl From<RunResult> for RunEvent {
    fn from(result: RunResult) -> Self {
        RunEvent::RunResult(result)
    }
}
