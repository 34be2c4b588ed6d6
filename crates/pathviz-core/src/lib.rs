//! **pathviz-core**: grid types for step-by-step path search visualization.
//!
//! This crate holds the state an editor manipulates before a run: geometry
//! primitives, the [`CellKind`] of each cell, and the [`Grid`] itself. A
//! search never touches the `Grid`; it works on a [`Snapshot`].

pub mod cell;
pub mod geom;
pub mod grid;

pub use cell::CellKind;
pub use geom::{Point, Range};
pub use grid::{Grid, GridError, Snapshot};
