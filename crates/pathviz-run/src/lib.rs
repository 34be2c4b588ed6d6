//! Run lifecycle for step-by-step grid path search.
//!
//! A [`RunController`] owns the editable grid and at most one search run.
//! Consumers pull the run's [`RunEvent`]s one at a time, so an animation
//! driver can draw between expansions and stop the run whenever it likes:
//!
//! ```
//! use pathviz_core::Point;
//! use pathviz_paths::Algorithm;
//! use pathviz_run::{RunController, RunEvent};
//!
//! let mut ctl = RunController::new(5, 5);
//! ctl.set_start(Point::at(0, 0)).unwrap();
//! ctl.set_end(Point::at(4, 4)).unwrap();
//! ctl.run(Algorithm::AStar).unwrap();
//! for event in ctl.events() {
//!     if let RunEvent::RunResult(result) = event {
//!         assert_eq!(result.path_len(), Some(8));
//!     }
//! }
//! ```

mod cancel;
mod config;
mod controller;
mod error;
mod event;
mod state;
mod trace;

pub use cancel::CancelToken;
pub use config::RunConfig;
pub use controller::{Events, RunController};
pub use error::RunError;
pub use event::{Outcome, RunEvent, RunResult};
pub use state::RunState;
pub use trace::{Trace, TraceDecoder, TraceEncoder};
