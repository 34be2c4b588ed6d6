//! Bidirectional Dijkstra: one uniform-cost search from Start, one from End.
//!
//! The two halves take strict turns, forward first, one expansion per
//! [`Search::step`]. Each half keeps its own frontier and node table; they
//! only share the read-only pather.

use std::rc::Rc;

use pathviz_core::Point;

use crate::distance::Uniform;
use crate::reconstruct::{Disconnected, join_meeting};
use crate::search::{BestFirst, Expansion, Progress, Search, SearchEvent};
use crate::traits::Pather;

/// When a bidirectional search stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeetingPolicy {
    /// Stop as soon as one node is settled by both halves.
    ///
    /// On general weighted graphs the path through that node need not be a
    /// shortest one. On a unit-cost 4-connected grid every Start-End walk
    /// has the same length parity, which rules out a longer first meeting.
    FirstMeeting,
    /// Keep going until the two frontiers' minimum distances add up to at
    /// least the best meeting cost seen; the result is a shortest path.
    #[default]
    Exhaustive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Forward,
    Backward,
}

/// Best meeting candidate: a node reached by both halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Meeting {
    node: usize,
    cost: i32,
}

/// Bidirectional Dijkstra search.
pub struct Bidirectional<P> {
    forward: BestFirst<P, Uniform>,
    backward: BestFirst<P, Uniform>,
    policy: MeetingPolicy,
    turn: Side,
    best: Option<Meeting>,
}

impl<P: Pather> Bidirectional<P> {
    pub fn new(pather: Rc<P>, start: Point, end: Point, policy: MeetingPolicy) -> Self {
        Self {
            forward: BestFirst::new(Rc::clone(&pather), Uniform, start, None),
            backward: BestFirst::new(pather, Uniform, end, None),
            policy,
            turn: Side::Forward,
            best: None,
        }
    }

    #[inline]
    pub fn policy(&self) -> MeetingPolicy {
        self.policy
    }

    /// The half searching from Start.
    pub fn forward(&self) -> &BestFirst<P, Uniform> {
        &self.forward
    }

    /// The half searching from End.
    pub fn backward(&self) -> &BestFirst<P, Uniform> {
        &self.backward
    }

    /// Best meeting node found so far and the path cost through it.
    pub fn meeting(&self) -> Option<(Point, i32)> {
        self.best
            .map(|m| (self.forward.bounds().point(m.node), m.cost))
    }

    fn finish(&self, node: usize) -> Result<Progress, Disconnected> {
        let forward = self.forward.path_to(node)?;
        let backward = self.backward.path_to(node)?;
        log::debug!(
            "bidirectional search met at {} after {} expansions",
            self.forward.bounds().point(node),
            self.visited_count()
        );
        Ok(Progress::Found(join_meeting(forward, backward)))
    }

    /// Whether no better meeting can appear: every path not yet seen costs
    /// at least the sum of the two frontier minimums.
    fn settled_best(&mut self) -> Option<usize> {
        let best = self.best?;
        let reach = match (self.forward.min_priority(), self.backward.min_priority()) {
            (Some(f), Some(b)) => f.saturating_add(b),
            _ => i32::MAX,
        };
        (reach >= best.cost).then_some(best.node)
    }
}

/// Record `node` as a meeting candidate if both halves have reached it.
fn consider(
    best: &mut Option<Meeting>,
    a: &BestFirst<impl Pather, Uniform>,
    b: &BestFirst<impl Pather, Uniform>,
    node: usize,
) {
    let (Some(da), Some(db)) = (a.dist(node), b.dist(node)) else {
        return;
    };
    let cost = da + db;
    if best.is_none_or(|m| cost < m.cost) {
        *best = Some(Meeting { node, cost });
    }
}

impl<P: Pather> Search for Bidirectional<P> {
    fn step(&mut self, events: &mut Vec<SearchEvent>) -> Result<Progress, Disconnected> {
        if self.policy == MeetingPolicy::Exhaustive {
            if let Some(node) = self.settled_best() {
                return self.finish(node);
            }
        }

        let Self {
            forward,
            backward,
            policy,
            turn,
            best,
        } = &mut *self;
        let (active, other) = match turn {
            Side::Forward => (forward, &*backward),
            Side::Backward => (backward, &*forward),
        };

        let settled = match active.expand(events) {
            Expansion::Settled(node) => node,
            Expansion::Exhausted => {
                // A half that runs dry has settled its whole component; any
                // meeting already seen is the best one.
                return match self.best {
                    Some(m) => self.finish(m.node),
                    None => Ok(Progress::NotFound),
                };
            }
        };

        let met = match policy {
            MeetingPolicy::FirstMeeting => {
                if other.is_closed(settled) {
                    consider(best, &*active, other, settled);
                    Some(settled)
                } else {
                    None
                }
            }
            MeetingPolicy::Exhaustive => {
                consider(best, &*active, other, settled);
                for &node in active.relaxed() {
                    consider(best, &*active, other, node);
                }
                None
            }
        };
        *turn = match turn {
            Side::Forward => Side::Backward,
            Side::Backward => Side::Forward,
        };

        match met {
            Some(node) => self.finish(node),
            None => Ok(Progress::Running),
        }
    }

    fn visited_count(&self) -> usize {
        self.forward.visited_count() + self.backward.visited_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dijkstra::Dijkstra;
    use crate::test_support::{Finished, assert_valid_path, drive, open_grid, parse, random_grid};
    use pathviz_core::Snapshot;

    fn bidi(text: &str, policy: MeetingPolicy) -> (Finished, Bidirectional<Snapshot>) {
        let (snap, s, e) = parse(text);
        let mut b = Bidirectional::new(snap, s, e, policy);
        let done = drive(&mut b);
        (done, b)
    }

    #[test]
    fn alternates_forward_first() {
        let (s, e) = (Point::at(0, 0), Point::at(4, 4));
        let mut b = Bidirectional::new(open_grid(5, 5, s, e), s, e, MeetingPolicy::FirstMeeting);
        let mut events = Vec::new();
        b.step(&mut events).unwrap();
        assert_eq!(events[0], SearchEvent::Visited { pos: s });
        events.clear();
        b.step(&mut events).unwrap();
        assert_eq!(events[0], SearchEvent::Visited { pos: e });
    }

    #[test]
    fn open_grid_both_policies_are_shortest() {
        for policy in [MeetingPolicy::FirstMeeting, MeetingPolicy::Exhaustive] {
            let (s, e) = (Point::at(0, 0), Point::at(4, 4));
            let snap = open_grid(5, 5, s, e);
            let done = drive(&mut Bidirectional::new(snap.clone(), s, e, policy));
            assert_eq!(done.len(), Some(8), "{policy:?}");
            assert_valid_path(&snap, done.path().unwrap(), s, e);
        }
    }

    #[test]
    fn adjacent_endpoints() {
        let (done, _) = bidi("SE", MeetingPolicy::Exhaustive);
        assert_eq!(done.path(), Some(&[Point::at(0, 0), Point::at(0, 1)][..]));
        let (done, _) = bidi("SE", MeetingPolicy::FirstMeeting);
        assert_eq!(done.path(), Some(&[Point::at(0, 0), Point::at(0, 1)][..]));
    }

    #[test]
    fn disconnected_is_not_found() {
        for policy in [MeetingPolicy::FirstMeeting, MeetingPolicy::Exhaustive] {
            let (done, b) = bidi(
                "\
                S..
                ###
                ..E",
                policy,
            );
            assert_eq!(done.progress, Progress::NotFound);
            assert_eq!(b.meeting(), None);
        }
    }

    #[test]
    fn corridor_meets_in_the_middle() {
        let (first, b) = bidi("S.....E", MeetingPolicy::FirstMeeting);
        assert_eq!(first.len(), Some(6));
        assert_eq!(b.meeting(), Some((Point::at(0, 3), 6)));
        assert_eq!(first.visited, 8);

        // The exhaustive policy sees (0, 3) reached from both sides before
        // either settles it, and stops once the frontiers prove it best.
        let (exhaustive, b) = bidi("S.....E", MeetingPolicy::Exhaustive);
        assert_eq!(exhaustive.len(), Some(6));
        assert_eq!(b.meeting(), Some((Point::at(0, 3), 6)));
        assert_eq!(exhaustive.visited, 6);
        assert_eq!(exhaustive.path(), first.path());
    }

    #[test]
    fn exhaustive_matches_dijkstra() {
        for seed in 0..200 {
            let (snap, s, e) = random_grid(seed);
            let d = drive(&mut Dijkstra::dijkstra(snap.clone(), s, e));
            let b = drive(&mut Bidirectional::new(snap.clone(), s, e, MeetingPolicy::Exhaustive));
            assert_eq!(b.len(), d.len(), "seed {seed}");
            if let Some(path) = b.path() {
                assert_valid_path(&snap, path, s, e);
            }
        }
    }

    #[test]
    fn first_meeting_is_never_shorter_than_dijkstra() {
        for seed in 0..200 {
            let (snap, s, e) = random_grid(seed);
            let d = drive(&mut Dijkstra::dijkstra(snap.clone(), s, e));
            let mut bi = Bidirectional::new(snap.clone(), s, e, MeetingPolicy::FirstMeeting);
            let b = drive(&mut bi);
            assert_eq!(b.len().is_some(), d.len().is_some(), "seed {seed}");
            if let (Some(bl), Some(dl)) = (b.len(), d.len()) {
                assert!(bl >= dl, "seed {seed}");
                let (meet, _) = bi.meeting().unwrap();
                let depths = bi.forward().dist_at(meet).unwrap() + bi.backward().dist_at(meet).unwrap();
                assert!(bl <= depths as usize, "seed {seed}");
                assert_valid_path(&snap, b.path().unwrap(), s, e);
            }
        }
    }
}
