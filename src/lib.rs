//! Search for selection paths through a breach-protocol code matrix.
//!
//! A [`Grid`] of codes is searched for a path of fixed length which starts in
//! row 0 and alternates between rows and columns; a [`Solver`] returns the first
//! such path whose values contain every target [`Path`] as a contiguous run.

mod generator;
mod grid;
mod matrix;
mod path;
mod solver;

pub use generator::{Deadline, Interrupt, Never, Paths, Stats, MAX_BUFFER_LEN};
pub use grid::{Grid, Position};
pub use matrix::{Active, Matrix};
pub use path::{is_contiguous_run, Path};
pub use solver::{solve, Solution, Solutions, Solver};

/// Errors raised by each stage, re-exported under distinct names.
pub mod error {
    pub use crate::generator::Error as BufferError;
    pub use crate::grid::Error as ShapeError;
    pub use crate::matrix::Error as SelectionError;
    pub use crate::solver::Error as SolveError;
}
