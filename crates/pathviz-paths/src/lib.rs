//! Steppable shortest-path searches on 4-connected grids.
//!
//! Each search advances one node expansion per [`Search::step`] and reports
//! what it did as [`SearchEvent`]s, so a caller can replay the exploration
//! order exactly:
//!
//! - **Dijkstra** uniform-cost search ([`Dijkstra`])
//! - **A\*** with the Manhattan heuristic ([`AStar`])
//! - **Bidirectional Dijkstra** alternating between both ends ([`Bidirectional`])
//!
//! [`Searcher`] wraps all three behind one type chosen by [`Algorithm`].
//!
//! # Traits
//!
//! | Trait | Role |
//! |---|---|
//! | [`Pather`] | bounds and walkable neighbours |
//! | [`Heuristic`] | remaining-cost estimate for best-first order |
//! | [`Search`] | one expansion per call |

mod algorithm;
mod astar;
mod bidijkstra;
mod dijkstra;
mod distance;
mod frontier;
mod reconstruct;
mod search;
mod traits;

#[cfg(test)]
mod test_support;

pub use algorithm::{Algorithm, Searcher};
pub use astar::AStar;
pub use bidijkstra::{Bidirectional, MeetingPolicy};
pub use dijkstra::Dijkstra;
pub use distance::{Manhattan, Uniform, manhattan};
pub use frontier::Frontier;
pub use reconstruct::{Disconnected, join_meeting, reconstruct};
pub use search::{BestFirst, Progress, STEP_COST, Search, SearchEvent, SearchNode, UNREACHABLE};
pub use traits::{Heuristic, Pather};
