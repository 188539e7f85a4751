//! Lazy enumeration of every legal selection path through a [`Grid`].
//!
//! Paths start in row 0 and alternate between picking within the active row and
//! picking within the active column, never revisiting a cell. The search is a
//! depth-first walk over an explicit stack; each frame owns its own copy of the
//! positions chosen so far, so no branch ever observes a sibling's selections.

use std::{
    iter::FusedIterator,
    sync::atomic::{AtomicBool, Ordering},
    time::Instant,
};

use crate::{
    grid::{Grid, Position},
    matrix::Active,
    path::Path,
};

/// Longest buffer the generator will search.
///
/// The number of candidates grows roughly as `side.pow(length)`, so this is kept small.
pub const MAX_BUFFER_LEN: usize = 11;

/// Checked once per cell considered; returning `true` aborts the search.
pub trait Interrupt {
    fn is_interrupted(&mut self) -> bool;
}

/// Never interrupts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl Interrupt for Never {
    fn is_interrupted(&mut self) -> bool {
        false
    }
}

/// Interrupts once the wall clock passes the given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(pub Instant);

impl Interrupt for Deadline {
    fn is_interrupted(&mut self) -> bool {
        Instant::now() >= self.0
    }
}

/// Interrupts once the flag is raised, typically from another thread.
impl Interrupt for &AtomicBool {
    fn is_interrupted(&mut self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<I: Interrupt> Interrupt for Option<I> {
    fn is_interrupted(&mut self) -> bool {
        self.as_mut().is_some_and(|interrupt| interrupt.is_interrupted())
    }
}

impl<A: Interrupt, B: Interrupt> Interrupt for (A, B) {
    fn is_interrupted(&mut self) -> bool {
        self.0.is_interrupted() || self.1.is_interrupted()
    }
}

/// Work done by a search so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Partial paths expanded, including the empty starting path.
    pub expansions: u64,
    /// Cells examined as a possible next selection.
    pub cells_considered: u64,
    /// Complete paths yielded.
    pub candidates: u64,
}

#[derive(Debug, Clone)]
struct Frame {
    positions: Vec<Position>,
    active: Active,
    next: usize,
}

impl Frame {
    fn root() -> Self {
        Self {
            positions: Vec::new(),
            active: Active::default(),
            next: 0,
        }
    }
}

/// Iterator over every legal path of a fixed length; see [`Grid::paths`].
#[derive(Debug, Clone)]
pub struct Paths<'a, T, I = Never> {
    grid: &'a Grid<T>,
    length: usize,
    stack: Vec<Frame>,
    stats: Stats,
    interrupt: I,
    interrupted: bool,
}

impl<T> Grid<T> {
    /// Enumerate every legal selection path of exactly `length` cells.
    ///
    /// Paths are produced in a fixed order: at each step the active line is scanned
    /// from index 0 upwards. A `length` of 0 yields a single empty path.
    pub fn paths(&self, length: usize) -> Result<Paths<'_, T>, Error> {
        if length > MAX_BUFFER_LEN {
            return Err(Error::BufferTooLong {
                requested: length,
                max: MAX_BUFFER_LEN,
            });
        }
        Ok(Paths {
            grid: self,
            length,
            stack: vec![Frame::root()],
            stats: Stats {
                expansions: 1,
                ..Stats::default()
            },
            interrupt: Never,
            interrupted: false,
        })
    }
}

impl<'a, T, I> Paths<'a, T, I> {
    /// Replace the interrupt hook consulted during the search.
    pub fn with_interrupt<J: Interrupt>(self, interrupt: J) -> Paths<'a, T, J> {
        Paths {
            grid: self.grid,
            length: self.length,
            stack: self.stack,
            stats: self.stats,
            interrupt,
            interrupted: self.interrupted,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// `true` if the search was stopped by the interrupt hook rather than exhausted.
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }
}

impl<'a, T, I> Iterator for Paths<'a, T, I>
where
    T: Clone,
    I: Interrupt,
{
    type Item = Path<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let side = self.grid.side();
        while let Some(frame) = self.stack.last_mut() {
            if frame.positions.len() == self.length {
                let positions = std::mem::take(&mut frame.positions);
                self.stack.pop();
                self.stats.candidates += 1;
                let values = positions
                    .iter()
                    .map(|&position| self.grid[position].clone())
                    .collect();
                return Some(Path::new(values, positions));
            }

            if frame.next >= side {
                self.stack.pop();
                continue;
            }

            if self.interrupt.is_interrupted() {
                self.interrupted = true;
                self.stack.clear();
                return None;
            }

            let index = frame.next;
            frame.next += 1;
            self.stats.cells_considered += 1;

            let position = frame.active.position(index);
            if frame.positions.contains(&position) {
                continue;
            }

            let mut positions = Vec::with_capacity(self.length);
            positions.extend_from_slice(&frame.positions);
            positions.push(position);
            let active = frame.active.crossing(index);

            self.stats.expansions += 1;
            self.stack.push(Frame {
                positions,
                active,
                next: 0,
            });
        }
        None
    }
}

impl<'a, T: Clone, I: Interrupt> FusedIterator for Paths<'a, T, I> {}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("buffer length {requested} exceeds the maximum of {max}")]
    BufferTooLong { requested: usize, max: usize },
}
