use crate::{
    grid::{Grid, Position},
    path::Path,
};

/// The line from which the next selection must be made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Active {
    Row(usize),
    Column(usize),
}

impl Default for Active {
    fn default() -> Self {
        Self::Row(0)
    }
}

impl Active {
    /// Return the new active line if the specified point is valid, or `Error::NotActive` otherwise.
    pub fn toggle(self, position: Position) -> Result<Self, Error> {
        match self {
            Active::Row(row) if position.row == row => Ok(Active::Column(position.column)),
            Active::Column(column) if position.column == column => Ok(Active::Row(position.row)),
            active => Err(Error::NotActive { position, active }),
        }
    }

    /// The line perpendicular to this one, passing through `index` along it.
    ///
    /// This is the active line after a selection at `self.position(index)`.
    pub fn crossing(self, index: usize) -> Self {
        match self {
            Active::Row(_) => Active::Column(index),
            Active::Column(_) => Active::Row(index),
        }
    }

    /// The position at `index` along the active line.
    pub fn position(self, index: usize) -> Position {
        match self {
            Active::Row(row) => Position::new(row, index),
            Active::Column(column) => Position::new(index, column),
        }
    }
}

/// Selection state for a code matrix: which cells have been chosen, in what order,
/// and which line the next choice must come from.
#[derive(Debug, Clone)]
pub struct Matrix<'a, T> {
    values: &'a Grid<T>,
    chosen: Vec<bool>,
    selections: Vec<Position>,
    active: Active,
}

impl<'a, T> Matrix<'a, T> {
    pub fn new(values: &'a Grid<T>) -> Self {
        Self {
            values,
            chosen: vec![false; values.side() * values.side()],
            selections: Vec::new(),
            active: Active::default(),
        }
    }

    /// Replay every position of `path` from a fresh matrix, failing at the first illegal selection.
    pub fn replay(values: &'a Grid<T>, path: &Path<T>) -> Result<Self, Error> {
        let mut matrix = Self::new(values);
        for &position in path.positions() {
            matrix.select(position)?;
        }
        Ok(matrix)
    }

    fn check_bounds(&self, position: Position) -> Result<usize, Error> {
        let side = self.values.side();
        if self.values.contains(position) {
            Ok(position.row * side + position.column)
        } else {
            Err(Error::OutOfBounds { position, side })
        }
    }

    /// Select the point at the given coordinates if it is legal to do so.
    pub fn select(&mut self, position: Position) -> Result<(), Error> {
        let idx = self.check_bounds(position)?;
        if self.chosen[idx] {
            return Err(Error::AlreadySelected { position });
        }
        // the following line modifies self, so we can't fail past that point
        self.active = self.active.toggle(position)?;
        self.chosen[idx] = true;

        self.selections.push(position);

        Ok(())
    }

    pub fn active(&self) -> Active {
        self.active
    }

    pub fn selections(&self) -> &[Position] {
        &self.selections
    }

    /// Iterate over the selected values
    pub fn selected_values(&self) -> impl Iterator<Item = &'a T> + '_ {
        let values = self.values;
        self.selections.iter().map(move |&position| &values[position])
    }
}

impl<'a, T: Clone> Matrix<'a, T> {
    /// Materialize the current selections as a path.
    pub fn to_path(&self) -> Path<T> {
        Path::new(self.selected_values().cloned().collect(), self.selections.clone())
    }
}

impl<T: PartialEq> Grid<T> {
    /// Check that `path` could have been selected from this grid: it starts in row 0,
    /// alternates between rows and columns, never reuses a cell, and each value is
    /// the one found at its position.
    pub fn check_path(&self, path: &Path<T>) -> Result<(), Error> {
        if path.positions().len() != path.len() {
            return Err(Error::MissingPositions { len: path.len() });
        }
        let mut matrix = Matrix::new(self);
        for (value, &position) in path.values().iter().zip(path.positions()) {
            matrix.select(position)?;
            if self[position] != *value {
                return Err(Error::ValueMismatch { position });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("the point `{position}` is out of bounds for a grid of side {side}")]
    OutOfBounds { position: Position, side: usize },
    #[error("the point `{position}` is not a member of the active set: {active:?}")]
    NotActive { position: Position, active: Active },
    #[error("the point `{position}` has already been selected")]
    AlreadySelected { position: Position },
    #[error("the value at `{position}` does not match the grid")]
    ValueMismatch { position: Position },
    #[error("a path of {len} values carries no grid positions")]
    MissingPositions { len: usize },
}
