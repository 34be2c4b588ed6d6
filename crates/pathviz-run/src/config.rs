use std::time::Duration;

use pathviz_paths::MeetingPolicy;

/// Settings applied to every run a controller starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Stopping rule for bidirectional searches.
    pub meeting: MeetingPolicy,
    /// Wall-clock budget per run, counted from the run command. When it
    /// elapses the run is cancelled before its next expansion.
    pub deadline: Option<Duration>,
}

impl RunConfig {
    pub fn with_meeting(mut self, meeting: MeetingPolicy) -> Self {
        self.meeting = meeting;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_builders() {
        let c = RunConfig::default();
        assert_eq!(c.meeting, MeetingPolicy::Exhaustive);
        assert_eq!(c.deadline, None);

        let c = c
            .with_meeting(MeetingPolicy::FirstMeeting)
            .with_deadline(Duration::from_millis(250));
        assert_eq!(c.meeting, MeetingPolicy::FirstMeeting);
        assert_eq!(c.deadline, Some(Duration::from_millis(250)));
    }
}
