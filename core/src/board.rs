// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{BoardError, CellIndex, Mark};

/// Square N×N grid of cell marks
///
/// Rows run top to bottom and columns left to right. The size is fixed at
/// construction. Serialized as a list of rows, each a list of mark strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Mark>>", into = "Vec<Vec<Mark>>")]
pub struct Board {
    /// Number of rows (and columns)
    size: usize,
    /// Cells in row-major order
    cells: Vec<Mark>,
}

impl Board {
    /// Create an empty board with the specified size
    ///
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "board size must be at least 1");
        Self {
            size,
            cells: vec![Mark::Empty; size * size],
        }
    }

    /// Build a board from rows of marks, checking that it is square
    pub fn from_rows(rows: Vec<Vec<Mark>>) -> Result<Self, BoardError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardError::Empty);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, marks) in rows.into_iter().enumerate() {
            if marks.len() != size {
                return Err(BoardError::NotSquare {
                    row,
                    len: marks.len(),
                    expected: size,
                });
            }
            cells.extend(marks);
        }

        Ok(Self { size, cells })
    }

    /// Number of rows (equal to the number of columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the mark at the specified cell
    pub fn get(&self, cell: CellIndex) -> Option<Mark> {
        self.linear_index(cell).map(|idx| self.cells[idx])
    }

    /// Returns true if the cell is on the board and holds no mark
    pub fn is_empty_at(&self, cell: CellIndex) -> bool {
        matches!(self.get(cell), Some(Mark::Empty))
    }

    /// Row-major index of a cell (`row * N + col`)
    pub fn linear_index(&self, cell: CellIndex) -> Option<usize> {
        if !cell.is_valid(self.size) {
            return None;
        }
        Some(cell.row * self.size + cell.col)
    }

    /// Inverse of [`Board::linear_index`]
    pub fn cell_at(&self, index: usize) -> Option<CellIndex> {
        if index >= self.cells.len() {
            return None;
        }
        Some(CellIndex::new(index / self.size, index % self.size))
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[Mark]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Iterate over every cell and its mark in row-major order
    pub fn marks(&self) -> impl Iterator<Item = (CellIndex, Mark)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, mark)| (CellIndex::new(idx / self.size, idx % self.size), *mark))
    }
}

impl TryFrom<Vec<Vec<Mark>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<Mark>>) -> Result<Self, Self::Error> {
        Board::from_rows(rows)
    }
}

impl From<Board> for Vec<Vec<Mark>> {
    fn from(board: Board) -> Self {
        board.rows().map(|row| row.to_vec()).collect()
    }
}

/// Compact text form: one line per row, `.` for an empty cell.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for mark in row {
                write!(f, "{}", mark.symbol().unwrap_or('.'))?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|c| if c == '.' { Mark::Empty } else { Mark::Player(c) })
                    .collect()
            })
            .collect();
        Board::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_empty() {
        let board = Board::new(3);
        assert_eq!(board.size(), 3);
        assert!(board.marks().all(|(_, mark)| mark.is_empty()));
        assert!(board.is_empty_at(CellIndex::new(2, 2)));
        assert!(!board.is_empty_at(CellIndex::new(3, 0)));
    }

    #[test]
    fn rejects_non_square_rows() {
        let rows = vec![vec![Mark::Empty; 3], vec![Mark::Empty; 2], vec![Mark::Empty; 3]];
        assert_eq!(
            Board::from_rows(rows),
            Err(BoardError::NotSquare { row: 1, len: 2, expected: 3 })
        );
        assert_eq!(Board::from_rows(Vec::new()), Err(BoardError::Empty));
    }

    #[test]
    fn linear_index_round_trip() {
        let board = Board::new(4);
        for idx in 0..16 {
            let cell = board.cell_at(idx).unwrap();
            assert_eq!(board.linear_index(cell), Some(idx));
        }
        assert_eq!(board.cell_at(16), None);
        assert_eq!(board.linear_index(CellIndex::new(0, 4)), None);
    }

    #[test]
    fn text_form() {
        let board: Board = "X.O\n.X.\n..O".parse().unwrap();
        assert_eq!(board.get(CellIndex::new(0, 0)), Some(Mark::Player('X')));
        assert_eq!(board.get(CellIndex::new(0, 1)), Some(Mark::Empty));
        assert_eq!(board.get(CellIndex::new(2, 2)), Some(Mark::Player('O')));
        assert_eq!(board.to_string(), "X.O\n.X.\n..O");
    }

    #[test]
    fn wire_form() {
        let board: Board = serde_json::from_str(r#"[["X","",""],["","O",""],["","",""]]"#).unwrap();
        assert_eq!(board.get(CellIndex::new(1, 1)), Some(Mark::Player('O')));
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"[["X","",""],["","O",""],["","",""]]"#);

        assert!(serde_json::from_str::<Board>(r#"[["X",""],[""]]"#).is_err());
        assert!(serde_json::from_str::<Board>(r#"[["XX"]]"#).is_err());
    }
}
