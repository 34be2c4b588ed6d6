use std::fmt;

/// Lifecycle of a [`RunController`](crate::RunController).
///
/// `Idle` moves to `Running` on a successful run command. A run ends in
/// `Found`, `NotFound` or `Cancelled`; reset returns to `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Found,
    NotFound,
    Cancelled,
}

impl RunState {
    #[inline]
    pub fn is_running(self) -> bool {
        self == RunState::Running
    }

    /// Whether a run has ended, for any reason.
    #[inline]
    pub fn is_finished(self) -> bool {
        matches!(
            self,
            RunState::Found | RunState::NotFound | RunState::Cancelled
        )
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Found => "found",
            RunState::NotFound => "not found",
            RunState::Cancelled => "cancelled",
        })
    }
}
