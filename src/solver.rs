use std::{
    iter::FusedIterator,
    time::{Duration, Instant},
};

use log::{debug, trace, warn};

use crate::{
    generator::{self, Deadline, Interrupt, Never, Paths, Stats, MAX_BUFFER_LEN},
    grid::Grid,
    path::Path,
};

/// Search configuration.
///
/// Each call to [`solve`][Self::solve] or [`solutions`][Self::solutions] is independent;
/// the solver itself holds no search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solver {
    max_buffer: usize,
    deadline: Option<Instant>,
    timeout: Option<Duration>,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_buffer: MAX_BUFFER_LEN,
            deadline: None,
            timeout: None,
        }
    }
}

/// The outcome of a completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution<T> {
    /// The first candidate containing every target, or `None` if there is no such candidate.
    pub path: Option<Path<T>>,
    pub stats: Stats,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower the longest buffer this solver accepts. Values above [`MAX_BUFFER_LEN`] are clamped.
    pub fn max_buffer(mut self, max_buffer: usize) -> Self {
        self.max_buffer = max_buffer.min(MAX_BUFFER_LEN);
        self
    }

    /// Abandon any search still running at `deadline`.
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Abandon any search still running `timeout` after it starts.
    ///
    /// The clock starts separately for each search, so a configured solver may be reused.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The earliest of the fixed deadline and the timeout, measured from `start`.
    fn deadline_from(&self, start: Instant) -> Option<Instant> {
        let timeout = self.timeout.map(|timeout| start + timeout);
        match (self.deadline, timeout) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn check_buffer(&self, buffer: usize) -> Result<(), Error> {
        if buffer > self.max_buffer {
            return Err(generator::Error::BufferTooLong {
                requested: buffer,
                max: self.max_buffer,
            }
            .into());
        }
        Ok(())
    }

    /// Lazily iterate over every path of length `buffer` which contains all `targets`.
    pub fn solutions<'a, T>(
        &self,
        grid: &'a Grid<T>,
        buffer: usize,
        targets: &'a [Path<T>],
    ) -> Result<Solutions<'a, T>, Error> {
        self.solutions_with(grid, buffer, targets, Never)
    }

    /// As [`solutions`][Self::solutions], additionally consulting `interrupt`
    /// once per cell considered.
    pub fn solutions_with<'a, T, I: Interrupt>(
        &self,
        grid: &'a Grid<T>,
        buffer: usize,
        targets: &'a [Path<T>],
        interrupt: I,
    ) -> Result<Solutions<'a, T, I>, Error> {
        self.check_buffer(buffer)?;
        let paths = grid
            .paths(buffer)?
            .with_interrupt((self.deadline_from(Instant::now()).map(Deadline), interrupt));
        Ok(Solutions { paths, targets })
    }

    /// Find the first path of length `buffer` which contains every target as a contiguous run.
    ///
    /// Finding nothing is not an error: the returned [`Solution`] simply has no path.
    pub fn solve<T>(
        &self,
        grid: &Grid<T>,
        buffer: usize,
        targets: &[Path<T>],
    ) -> Result<Solution<T>, Error>
    where
        T: Clone + PartialEq,
    {
        self.solve_with(grid, buffer, targets, Never)
    }

    /// As [`solve`][Self::solve], additionally consulting `interrupt` once per cell considered.
    pub fn solve_with<T, I>(
        &self,
        grid: &Grid<T>,
        buffer: usize,
        targets: &[Path<T>],
        interrupt: I,
    ) -> Result<Solution<T>, Error>
    where
        T: Clone + PartialEq,
        I: Interrupt,
    {
        if targets.is_empty() {
            warn!("solving without targets; the first candidate will be accepted");
        }
        debug!(
            "solving a {side}x{side} grid: buffer {buffer}, {} targets",
            targets.len(),
            side = grid.side(),
        );

        let mut solutions = self.solutions_with(grid, buffer, targets, interrupt)?;
        let path = solutions.next();
        let stats = solutions.stats();

        if path.is_none() && solutions.interrupted() {
            debug!("search interrupted: {stats:?}");
            return Err(Error::Interrupted { stats });
        }
        debug!(
            "search finished ({}): {stats:?}",
            if path.is_some() { "found" } else { "exhausted" },
        );
        Ok(Solution { path, stats })
    }
}

/// Iterator over the paths which contain every target; see [`Solver::solutions`].
#[derive(Debug, Clone)]
pub struct Solutions<'a, T, I = Never> {
    paths: Paths<'a, T, (Option<Deadline>, I)>,
    targets: &'a [Path<T>],
}

impl<'a, T, I> Solutions<'a, T, I> {
    pub fn stats(&self) -> Stats {
        self.paths.stats()
    }

    /// `true` if the underlying search was stopped early by a deadline or interrupt.
    pub fn interrupted(&self) -> bool {
        self.paths.interrupted()
    }
}

impl<'a, T, I> Iterator for Solutions<'a, T, I>
where
    T: Clone + PartialEq,
    I: Interrupt,
{
    type Item = Path<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let targets = self.targets;
        for candidate in self.paths.by_ref() {
            if targets.iter().all(|target| candidate.contains(target)) {
                trace!("candidate {:?} contains every target", candidate.positions());
                return Some(candidate);
            }
        }
        None
    }
}

impl<'a, T, I> FusedIterator for Solutions<'a, T, I>
where
    T: Clone + PartialEq,
    I: Interrupt,
{
}

/// Find the first path of length `buffer` through `grid` which contains every target,
/// using the default [`Solver`] configuration.
pub fn solve<T>(
    grid: &Grid<T>,
    buffer: usize,
    targets: &[Path<T>],
) -> Result<Option<Path<T>>, Error>
where
    T: Clone + PartialEq,
{
    Solver::default()
        .solve(grid, buffer, targets)
        .map(|solution| solution.path)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Buffer(#[from] generator::Error),
    #[error("search interrupted after {} candidates", .stats.candidates)]
    Interrupted { stats: Stats },
}
