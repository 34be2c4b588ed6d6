//! The [`RunController`]: grid editing, run lifecycle and the event stream.

use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

use pathviz_core::{CellKind, Grid, Point, Range, Snapshot};
use pathviz_paths::{Algorithm, Progress, Search, SearchEvent, Searcher};
use rand::Rng;

use crate::cancel::CancelToken;
use crate::config::RunConfig;
use crate::error::RunError;
use crate::event::{Outcome, RunEvent, RunResult};
use crate::state::RunState;
use crate::trace::Trace;

/// Search state of the run in progress. Dropped when the run ends.
struct ActiveRun {
    algorithm: Algorithm,
    searcher: Searcher<Snapshot>,
    started: Instant,
    buf: Vec<SearchEvent>,
}

/// Everything a run's consumer has seen so far, kept for [`RunController::record`].
struct Recording {
    algorithm: Algorithm,
    bounds: Range,
    delivered: Vec<RunEvent>,
}

/// Owns the grid and drives at most one search run at a time.
///
/// Edits are rejected with [`RunError::InvalidDuringRun`] while a run is
/// active, and the search itself reads a [`Snapshot`] taken when the run
/// started. A run advances one node expansion at a time, only when the
/// consumer asks for more events with [`next_event`](Self::next_event).
pub struct RunController {
    grid: Grid,
    config: RunConfig,
    state: RunState,
    token: CancelToken,
    run: Option<ActiveRun>,
    pending: VecDeque<RunEvent>,
    recording: Option<Recording>,
}

impl RunController {
    /// A controller with an all-Empty `rows` x `cols` grid.
    pub fn new(rows: i32, cols: i32) -> Self {
        Self::with_grid(Grid::new(rows, cols))
    }

    /// A controller editing an existing grid.
    pub fn with_grid(grid: Grid) -> Self {
        Self {
            grid,
            config: RunConfig::default(),
            state: RunState::Idle,
            token: CancelToken::new(),
            run: None,
            pending: VecDeque::new(),
            recording: None,
        }
    }

    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn config(&self) -> RunConfig {
        self.config
    }

    /// Replace the configuration. The run in progress, if any, keeps the
    /// settings it started with.
    pub fn set_config(&mut self, config: RunConfig) {
        self.config = config;
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The algorithm of the run in progress.
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.run.as_ref().map(|r| r.algorithm)
    }

    /// Nodes settled so far by the run in progress.
    pub fn visited_count(&self) -> usize {
        self.run.as_ref().map_or(0, |r| r.searcher.visited_count())
    }

    /// A handle that cancels the active run.
    ///
    /// Every clone shares one flag for the controller's whole lifetime, so a
    /// driver can keep a single token across runs. Starting a run clears the
    /// flag: a cancel requested while no run is active has no effect.
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    fn ensure_editable(&self, what: &str) -> Result<(), RunError> {
        if self.state.is_running() {
            log::warn!("rejected {what}: a run is in progress");
            return Err(RunError::InvalidDuringRun);
        }
        Ok(())
    }

    /// Discard the grid and start over with new dimensions. An active run is
    /// cancelled first.
    pub fn configure(&mut self, rows: i32, cols: i32) -> Result<(), RunError> {
        if rows < 0 || cols < 0 {
            log::warn!("rejected configure: invalid dimensions {rows}x{cols}");
            return Err(RunError::InvalidDimensions { rows, cols });
        }
        self.cancel();
        self.grid.resize(rows, cols)?;
        self.state = RunState::Idle;
        log::debug!("configured a {} grid", self.grid.bounds());
        Ok(())
    }

    /// Place Start at `p`, moving it if it was already set.
    pub fn set_start(&mut self, p: Point) -> Result<(), RunError> {
        self.ensure_editable("set_start")?;
        self.grid.set_cell_kind(p, CellKind::Start)?;
        Ok(())
    }

    /// Place End at `p`, moving it if it was already set.
    pub fn set_end(&mut self, p: Point) -> Result<(), RunError> {
        self.ensure_editable("set_end")?;
        self.grid.set_cell_kind(p, CellKind::End)?;
        Ok(())
    }

    /// Flip `p` between Empty and Wall and return its new kind. Start and
    /// End are left as they are.
    pub fn toggle_wall(&mut self, p: Point) -> Result<CellKind, RunError> {
        self.ensure_editable("toggle_wall")?;
        Ok(self.grid.toggle_wall(p)?)
    }

    /// Remove every wall. Returns how many were removed.
    pub fn clear_walls(&mut self) -> Result<usize, RunError> {
        self.ensure_editable("clear_walls")?;
        Ok(self.grid.clear_walls())
    }

    /// Turn each Empty cell into a wall with probability `density`.
    /// Returns how many walls were placed.
    pub fn scatter_walls<R: Rng>(&mut self, density: f64, rng: &mut R) -> Result<usize, RunError> {
        self.ensure_editable("scatter_walls")?;
        let placed = self.grid.scatter_walls(density, rng);
        log::debug!("scattered {placed} walls at density {density}");
        Ok(placed)
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Start a run of `algorithm` on the current grid.
    ///
    /// Undelivered events of a previous run are discarded.
    pub fn run(&mut self, algorithm: Algorithm) -> Result<(), RunError> {
        if self.state.is_running() {
            log::warn!("rejected {algorithm} run: a run is already in progress");
            return Err(RunError::PreconditionFailed);
        }
        let (Some(start), Some(end)) = (self.grid.start(), self.grid.end()) else {
            log::warn!("rejected {algorithm} run: start and end must both be set");
            return Err(RunError::MissingEndpoints);
        };
        if start == end {
            return Err(RunError::MissingEndpoints);
        }

        if !self.pending.is_empty() {
            log::debug!("dropping {} undelivered events", self.pending.len());
            self.pending.clear();
        }
        self.token.reset();

        let snapshot = Rc::new(self.grid.snapshot());
        let searcher = Searcher::new(algorithm, snapshot, start, end, self.config.meeting);
        self.run = Some(ActiveRun {
            algorithm,
            searcher,
            started: Instant::now(),
            buf: Vec::new(),
        });
        self.recording = Some(Recording {
            algorithm,
            bounds: self.grid.bounds(),
            delivered: Vec::new(),
        });
        self.state = RunState::Running;
        log::debug!(
            "started {algorithm} run on a {} grid from {start} to {end}",
            self.grid.bounds()
        );
        Ok(())
    }

    /// Next event of the stream, advancing the search by one expansion when
    /// nothing is buffered. Returns `None` once the terminal
    /// [`RunEvent::RunResult`] has been delivered.
    ///
    /// # Panics
    ///
    /// Panics if the search produces parent links that do not lead back to
    /// its root. That can only happen through a bug in the search.
    pub fn next_event(&mut self) -> Option<RunEvent> {
        if self.state.is_running() {
            if self.cancel_requested() {
                self.finish_cancelled();
            } else if self.pending.is_empty() {
                self.advance();
            }
        }
        let event = self.pending.pop_front()?;
        if let Some(rec) = self.recording.as_mut() {
            rec.delivered.push(event.clone());
        }
        Some(event)
    }

    /// Iterate over the remaining events as they are produced.
    pub fn events(&mut self) -> Events<'_> {
        Events { ctl: self }
    }

    /// Drive the current run's stream to its end and return all of it,
    /// including events already delivered through
    /// [`next_event`](Self::next_event).
    ///
    /// Fails with [`RunError::PreconditionFailed`] once the terminal result
    /// has been delivered, or if no run was ever started.
    pub fn record(&mut self) -> Result<Trace, RunError> {
        let unfinished = self.run.is_some() || self.pending.iter().any(RunEvent::is_terminal);
        if !unfinished || self.recording.is_none() {
            log::warn!("rejected record: no unfinished run");
            return Err(RunError::PreconditionFailed);
        }
        while self.next_event().is_some() {}
        let Some(rec) = self.recording.take() else {
            return Err(RunError::PreconditionFailed);
        };
        log::debug!("recorded {} events", rec.delivered.len());
        Ok(Trace::new(rec.algorithm, rec.bounds, rec.delivered))
    }

    /// Start a run and drive it to its end, returning only the result.
    pub fn run_to_completion(&mut self, algorithm: Algorithm) -> Result<RunResult, RunError> {
        self.run(algorithm)?;
        let mut result = None;
        while let Some(ev) = self.next_event() {
            if let RunEvent::RunResult(r) = ev {
                result = Some(r);
            }
        }
        // A started run always ends with a result.
        result.ok_or(RunError::PreconditionFailed)
    }

    /// Cancel the active run. Events of the interrupted step are dropped and
    /// a cancelled [`RunResult`] becomes the next and last event.
    ///
    /// Returns whether a run was cancelled.
    pub fn cancel(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }
        self.finish_cancelled();
        true
    }

    /// Clear the grid to all Empty, keeping its dimensions, and return to
    /// Idle. An active run is cancelled first.
    pub fn reset(&mut self) {
        self.cancel();
        self.run = None;
        self.grid.clear();
        self.state = RunState::Idle;
        log::debug!("reset the {} grid", self.grid.bounds());
    }

    // -----------------------------------------------------------------------
    // Stepping
    // -----------------------------------------------------------------------

    fn cancel_requested(&self) -> bool {
        if self.token.is_cancelled() {
            return true;
        }
        match (&self.run, self.config.deadline) {
            (Some(run), Some(deadline)) if run.started.elapsed() >= deadline => {
                log::debug!("run deadline of {deadline:?} elapsed");
                true
            }
            _ => false,
        }
    }

    fn advance(&mut self) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        run.buf.clear();
        let progress = match run.searcher.step(&mut run.buf) {
            Ok(progress) => progress,
            Err(err) => {
                log::error!("{} search produced a broken path: {err}", run.algorithm);
                panic!("search invariant violated: {err}");
            }
        };
        self.pending.extend(run.buf.drain(..).map(RunEvent::from));

        let outcome = match progress {
            Progress::Running => return,
            Progress::Found(path) => Outcome::Found(path),
            Progress::NotFound => Outcome::NotFound,
        };
        self.finish(outcome);
    }

    fn finish_cancelled(&mut self) {
        self.pending.clear();
        self.finish(Outcome::Cancelled);
    }

    fn finish(&mut self, outcome: Outcome) {
        let visited_count = self.visited_count();
        self.state = outcome.state();
        match &outcome {
            Outcome::Found(path) => log::debug!(
                "run found a path of {} moves after visiting {visited_count} nodes",
                path.len().saturating_sub(1)
            ),
            _ => log::debug!("run ended {} after visiting {visited_count} nodes", self.state),
        }
        self.pending.push_back(RunEvent::RunResult(RunResult {
            outcome,
            visited_count,
        }));
        self.run = None;
    }
}

/// Iterator over a run's events, see [`RunController::events`].
pub struct Events<'a> {
    ctl: &'a mut RunController,
}

impl Iterator for Events<'_> {
    type Item = RunEvent;

    fn next(&mut self) -> Option<RunEvent> {
        self.ctl.next_event()
    }
}
