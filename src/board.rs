use crate::error::BoardError;
use crate::player::{EMPTY_GLYPH, Marker};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The smallest board on which the row/column/diagonal rules are meaningful.
pub const MIN_BOARD_SIZE: usize = 3;

/// A `(row, column)` coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    pub row: usize,
    pub column: usize,
}

impl Action {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl From<(usize, usize)> for Action {
    fn from((row, column): (usize, usize)) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// The content of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here yet.
    #[default]
    Empty,
    /// The cell carries a player's marker.
    Occupied(Marker),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the marker in this cell, if any.
    pub fn marker(self) -> Option<Marker> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(marker) => Some(marker),
        }
    }
}

/// An N×N grid of cells stored in row-major order.
///
/// A cell only ever goes from [`Cell::Empty`] to [`Cell::Occupied`]; there is no
/// way to clear it again. Cloning a board yields an independent snapshot, which
/// is what the search uses to explore hypothetical moves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty `size`×`size` board.
    ///
    /// Sizes below [`MIN_BOARD_SIZE`] are representable; the session refuses
    /// to play on them.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Builds a board from one string per row, using `.` for empty cells.
    ///
    /// ```
    /// use tictactoe_minimax::board::{Action, Board};
    ///
    /// let board = Board::from_rows(&["XXX", "O.O", "..."]).unwrap();
    /// assert_eq!(board.size(), 3);
    /// assert!(board.is_empty_cell(Action::new(1, 1)));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        let size = rows.len();
        if size < MIN_BOARD_SIZE {
            return Err(BoardError::TooSmall {
                size,
                min: MIN_BOARD_SIZE,
            });
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, text) in rows.iter().enumerate() {
            let len = text.chars().count();
            if len != size {
                return Err(BoardError::RaggedRow { row, len, size });
            }
            for symbol in text.chars() {
                let cell = match symbol {
                    EMPTY_GLYPH => Cell::Empty,
                    other => Cell::Occupied(Marker::new(other)?),
                };
                cells.push(cell);
            }
        }

        Ok(Self { size, cells })
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells, `size²`.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if `action` lies on the board.
    pub fn contains(&self, action: Action) -> bool {
        action.row < self.size && action.column < self.size
    }

    /// Returns the cell at `action`, or `None` when out of bounds.
    pub fn cell(&self, action: Action) -> Option<Cell> {
        self.index(action).map(|i| self.cells[i])
    }

    /// Returns true if `action` is on the board and its cell is empty.
    pub fn is_empty_cell(&self, action: Action) -> bool {
        self.cell(action).is_some_and(Cell::is_empty)
    }

    /// Places `marker` at `action` if the cell exists and is empty.
    ///
    /// Occupied or out-of-bounds targets are left untouched; callers check
    /// legality through [`rules::legal_actions`](crate::rules::legal_actions)
    /// first. Returns whether the cell was written.
    pub fn mark(&mut self, action: Action, marker: Marker) -> bool {
        match self.index(action) {
            Some(i) if self.cells[i].is_empty() => {
                self.cells[i] = Cell::Occupied(marker);
                true
            }
            _ => false,
        }
    }

    /// Returns an owned copy that later mutations of `self` cannot affect.
    pub fn snapshot(&self) -> Board {
        self.clone()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates over the rows of the board.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.size.max(1))
    }

    /// Iterates over every coordinate paired with its cell, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Action, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (Action::new(i / self.size, i % self.size), *cell))
    }

    fn index(&self, action: Action) -> Option<usize> {
        self.contains(action)
            .then(|| action.row * self.size + action.column)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let symbol = cell.marker().map_or(EMPTY_GLYPH, Marker::symbol);
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}
