//! Turning parent links into paths.

use std::fmt;

use pathviz_core::Point;

/// Parent links that never reach the search root.
///
/// Searches only ever produce acyclic parent chains ending at their root, so
/// this error means a node table was corrupted. It is an invariant failure,
/// not a reportable search outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disconnected {
    /// Node the walk started from.
    pub terminal: usize,
    /// Links followed before giving up.
    pub steps: usize,
}

impl fmt::Display for Disconnected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parent links from node {} do not reach the root after {} steps",
            self.terminal, self.steps
        )
    }
}

impl std::error::Error for Disconnected {}

/// Walk `parent_of` from `terminal` back to `root` and return the chain in
/// root-to-terminal order.
///
/// `limit` bounds the number of nodes in the chain, normally the cell count
/// of the grid: a longer walk can only come from a cycle.
pub fn reconstruct(
    parent_of: impl Fn(usize) -> Option<usize>,
    root: usize,
    terminal: usize,
    limit: usize,
) -> Result<Vec<usize>, Disconnected> {
    let mut chain = vec![terminal];
    let mut cur = terminal;
    while let Some(parent) = parent_of(cur) {
        if chain.len() >= limit {
            return Err(Disconnected {
                terminal,
                steps: chain.len(),
            });
        }
        chain.push(parent);
        cur = parent;
    }
    if cur != root {
        return Err(Disconnected {
            terminal,
            steps: chain.len() - 1,
        });
    }
    chain.reverse();
    Ok(chain)
}

/// Join the two halves of a bidirectional search at their meeting node.
///
/// `forward` runs from Start to the meeting node and `backward` from End to
/// the meeting node; both include it. The result runs Start to End with the
/// meeting node once.
pub fn join_meeting(mut forward: Vec<Point>, backward: Vec<Point>) -> Vec<Point> {
    debug_assert_eq!(forward.last(), backward.last());
    forward.extend(backward.into_iter().rev().skip(1));
    forward
}
