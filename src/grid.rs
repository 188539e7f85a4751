use std::{fmt, ops::Index};

/// A cell coordinate within a [`Grid`].
///
/// `(0, 0)` is the top left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, column): (usize, usize)) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A square 2d grid of code values.
///
/// The grid is immutable once built; every row has exactly [`side`][Self::side] entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    side: usize,
    values: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid from its rows.
    ///
    /// Fails if there are no rows, or if any row's length differs from the number of rows.
    pub fn from_rows<Rows, Row>(rows: Rows) -> Result<Self, Error>
    where
        Rows: IntoIterator<Item = Row>,
        Row: IntoIterator<Item = T>,
    {
        let rows: Vec<Vec<T>> = rows
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect();
        let side = rows.len();
        if side == 0 {
            return Err(Error::Empty);
        }

        let mut values = Vec::with_capacity(side * side);
        for (row, items) in rows.into_iter().enumerate() {
            if items.len() != side {
                return Err(Error::NotSquare {
                    row,
                    expected: side,
                    found: items.len(),
                });
            }
            values.extend(items);
        }

        Ok(Self { side, values })
    }

    /// Length of each edge of the grid.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Get the internal index where the desired value is stored,
    /// or `None` if it is out of bounds.
    fn idx(&self, position: Position) -> Option<usize> {
        (position.row < self.side && position.column < self.side)
            .then_some(position.row * self.side + position.column)
    }

    pub fn contains(&self, position: Position) -> bool {
        self.idx(position).is_some()
    }

    pub fn get(&self, position: Position) -> Option<&T> {
        self.idx(position).map(|idx| &self.values[idx])
    }

    /// Iterate over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.values.chunks(self.side)
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, position: Position) -> &Self::Output {
        match self.get(position) {
            Some(value) => value,
            None => panic!(
                "position {position} is out of bounds for a grid of side {}",
                self.side
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("a grid must have at least one row")]
    Empty,
    #[error("row {row} has {found} entries, expected {expected} for a square grid")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn codes(text: &str) -> Vec<Vec<String>> {
        text.lines()
            .map(|line| line.split_ascii_whitespace().map(str::to_owned).collect())
            .filter(|row: &Vec<String>| !row.is_empty())
            .collect()
    }

    #[test]
    fn builds_square_grid() {
        let grid = Grid::from_rows(codes("1C 55\nBD E9")).unwrap();
        assert_eq!(grid.side(), 2);
        assert_eq!(grid[Position::new(0, 1)], "55");
        assert_eq!(grid[Position::new(1, 0)], "BD");
        assert_eq!(grid.get(Position::new(2, 0)), None);
        assert_eq!(grid.rows().count(), 2);
    }

    #[test]
    fn single_cell_grid() {
        let grid = Grid::from_rows([["7A"]]).unwrap();
        assert_eq!(grid.side(), 1);
        assert!(grid.contains(Position::new(0, 0)));
        assert!(!grid.contains(Position::new(0, 1)));
    }

    #[test]
    fn rejects_empty() {
        let rows: Vec<Vec<String>> = Vec::new();
        assert_eq!(Grid::from_rows(rows), Err(Error::Empty));
    }

    #[rstest]
    #[case::short_row("1C 55\nBD", 1, 1)]
    #[case::long_row("1C 55 E9\nBD 55 1C", 0, 3)]
    #[case::extra_row("1C\n55", 0, 1)]
    fn rejects_non_square(#[case] text: &str, #[case] row: usize, #[case] found: usize) {
        match Grid::from_rows(codes(text)) {
            Err(Error::NotSquare {
                row: bad_row,
                found: bad_found,
                ..
            }) => {
                assert_eq!(bad_row, row);
                assert_eq!(bad_found, found);
            }
            other => panic!("expected a shape error, got {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_out_of_bounds_panics() {
        let grid = Grid::from_rows([["1C"]]).unwrap();
        let _ = &grid[Position::new(0, 1)];
    }
}
