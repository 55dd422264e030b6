use serde::{Deserialize, Serialize};

use crate::InvalidGridError;

use super::shape::{PieceKind, Shape};

/// A single cell of the board.
///
/// The move search only ever reads the occupancy bit; the piece kind is
/// retained so callers can render locked pieces or serialize boards without
/// losing identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Occupied cell without piece identity (test fixtures, simulations).
    Garbage,
    /// Cell occupied by a locked piece of a specific kind.
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Garbage => '#',
            Cell::Piece(kind) => kind.as_char(),
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            '#' => Some(Cell::Garbage),
            _ => match PieceKind::from_char(c) {
                Some(kind) => Some(Cell::Piece(kind)),
                None => None,
            },
        }
    }
}

/// The occupancy grid of the playfield.
///
/// A `width`x`height` rectangular grid of [`Cell`]s stored row-major with
/// row 0 at the top. The grid is only ever mutated by locking a landed shape
/// ([`Self::fill_shape`]) or clearing completed rows ([`Self::clear_lines`]);
/// all placement queries are read-only, so evaluation code can simulate
/// placements on a clone without touching the caller's board.
///
/// # Example
///
/// ```
/// use tetromind_engine::{Board, PieceKind};
///
/// let board = Board::standard();
/// let shape = PieceKind::I.spawn_shape();
///
/// // A horizontal I-piece dropped in column 0 lands on the floor.
/// assert_eq!(board.drop_row(&shape, 0, 0), Some(19));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub const STANDARD_WIDTH: usize = 10;
    pub const STANDARD_HEIGHT: usize = 20;

    /// Creates an empty board with the given dimensions.
    pub fn new(width: usize, height: usize) -> Result<Self, InvalidGridError> {
        if width == 0 || height == 0 {
            return Err(InvalidGridError::ZeroDimension);
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        })
    }

    /// Creates an empty board with the canonical 10x20 dimensions.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            width: Self::STANDARD_WIDTH,
            height: Self::STANDARD_HEIGHT,
            cells: vec![Cell::Empty; Self::STANDARD_WIDTH * Self::STANDARD_HEIGHT],
        }
    }

    /// Creates a board from explicit rows, top to bottom.
    ///
    /// Fails fast if the grid is empty or any row differs in width.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Result<Self, InvalidGridError> {
        let Some(first) = rows.first() else {
            return Err(InvalidGridError::ZeroDimension);
        };
        let width = first.len();
        if width == 0 {
            return Err(InvalidGridError::ZeroDimension);
        }
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(InvalidGridError::RaggedRow {
                    row: y,
                    expected: width,
                    actual: row.len(),
                });
            }
        }
        let cells = rows.iter().flat_map(|row| row.iter().copied()).collect();
        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    /// Creates a board from ASCII art for testing.
    /// '#' represents an occupied cell, '.' represents an empty cell, and
    /// piece letters (I, O, S, Z, J, L, T) represent locked pieces.
    /// Rows are specified from top to bottom.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let rows: Vec<Vec<Cell>> = art
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                line.chars()
                    .filter_map(Cell::from_char)
                    .collect::<Vec<Cell>>()
            })
            .collect();
        Self::from_rows(&rows).expect("invalid ASCII board")
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        assert!(x < self.width && y < self.height);
        self.cells[y * self.width + x]
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width)
    }

    /// Checks whether the shape can occupy the placement anchored at
    /// `(col, row)` (the matrix top-left corner).
    ///
    /// A placement is legal iff every occupied cell of the shape maps to an
    /// in-bounds, empty board cell. Because shapes are trimmed to their
    /// occupied bounding box, the bounds check reduces to the matrix extent.
    #[must_use]
    pub fn can_place(&self, shape: &Shape, col: usize, row: usize) -> bool {
        if col + shape.width() > self.width || row + shape.height() > self.height {
            return false;
        }
        shape
            .occupied_cells()
            .all(|(px, py)| self.cell(col + px, row + py).is_empty())
    }

    /// Returns the landing row for the shape dropped in `col` from
    /// `start_row` under simulated gravity.
    ///
    /// The result is the maximal row at which the placement is still legal;
    /// one row lower is blocked by the floor or by occupied cells. Returns
    /// `None` when the shape cannot occupy `(col, start_row)` at all, i.e.
    /// the drop is blocked before it begins.
    #[must_use]
    pub fn drop_row(&self, shape: &Shape, col: usize, start_row: usize) -> Option<usize> {
        if !self.can_place(shape, col, start_row) {
            return None;
        }
        let mut row = start_row;
        while self.can_place(shape, col, row + 1) {
            row += 1;
        }
        Some(row)
    }

    /// Locks a shape onto the board by filling its occupied cells with
    /// `cell`.
    ///
    /// This is called when a piece has reached its final position and should
    /// become part of the static board state.
    pub fn fill_shape(&mut self, shape: &Shape, col: usize, row: usize, cell: Cell) {
        debug_assert!(self.can_place(shape, col, row));
        for (px, py) in shape.occupied_cells() {
            let idx = (row + py) * self.width + (col + px);
            self.cells[idx] = cell;
        }
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Rows above a cleared line shift down; the vacated top rows become
    /// empty.
    pub fn clear_lines(&mut self) -> usize {
        let width = self.width;
        let mut cleared = 0;
        for y in (0..self.height).rev() {
            let start = y * width;
            if self.cells[start..start + width]
                .iter()
                .all(|cell| cell.is_occupied())
            {
                cleared += 1;
                continue;
            }
            if cleared > 0 {
                self.cells.copy_within(start..start + width, start + cleared * width);
            }
        }
        self.cells[..cleared * width].fill(Cell::Empty);
        cleared
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: one string per row, e.g. ["..........", "...II.....", ...]
        serializer.collect_seq(
            self.rows()
                .map(|row| row.iter().map(|cell| cell.as_char()).collect::<String>()),
        )
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let lines = Vec::<String>::deserialize(deserializer)?;
        let mut rows = Vec::with_capacity(lines.len());
        for (y, line) in lines.iter().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for c in line.chars() {
                let cell = Cell::from_char(c).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid cell '{c}' in row {y}"))
                })?;
                row.push(cell);
            }
            rows.push(row);
        }
        Board::from_rows(&rows).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(matches!(
            Board::new(0, 20),
            Err(InvalidGridError::ZeroDimension)
        ));
        assert!(matches!(
            Board::new(10, 0),
            Err(InvalidGridError::ZeroDimension)
        ));
        assert!(Board::new(10, 20).is_ok());
    }

    #[test]
    fn test_from_rows_rejects_ragged_grid() {
        let rows = vec![
            vec![Cell::Empty, Cell::Empty],
            vec![Cell::Empty],
        ];
        assert!(matches!(
            Board::from_rows(&rows),
            Err(InvalidGridError::RaggedRow {
                row: 1,
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_standard_board_is_empty() {
        let board = Board::standard();
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 20);
        assert!(board.rows().flatten().all(|cell| cell.is_empty()));
    }

    #[test]
    fn test_can_place_respects_walls_and_floor() {
        let board = Board::standard();
        let shape = PieceKind::O.spawn_shape();

        assert!(board.can_place(&shape, 0, 0));
        assert!(board.can_place(&shape, 8, 18));
        // past the right wall
        assert!(!board.can_place(&shape, 9, 0));
        // past the floor
        assert!(!board.can_place(&shape, 0, 19));
    }

    #[test]
    fn test_can_place_respects_occupied_cells() {
        let board = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ....##....
            ....##....
            ",
        );
        let shape = PieceKind::O.spawn_shape();

        assert!(!board.can_place(&shape, 4, 18));
        // one column to the side is free
        assert!(board.can_place(&shape, 2, 18));
        // resting on top of the stack is fine
        assert!(board.can_place(&shape, 4, 16));
    }

    #[test]
    fn test_no_placement_is_legal_past_a_wall_or_floor() {
        let board = Board::standard();
        let shape = PieceKind::O.spawn_shape();

        // once a column is past the right wall, no row makes it legal
        for row in 0..board.height() {
            assert!(!board.can_place(&shape, 9, row));
            assert!(!board.can_place(&shape, 42, row));
        }
        // once a row is past the floor, no column makes it legal
        for col in 0..board.width() {
            assert!(!board.can_place(&shape, col, 19));
            assert!(!board.can_place(&shape, col, 42));
        }
    }

    #[test]
    fn test_drop_row_on_empty_board() {
        let board = Board::standard();

        let horizontal = PieceKind::I.spawn_shape();
        assert_eq!(board.drop_row(&horizontal, 0, 0), Some(19));
        assert_eq!(board.drop_row(&horizontal, 6, 0), Some(19));

        let vertical = horizontal.rotated();
        assert_eq!(board.drop_row(&vertical, 0, 0), Some(16));
        assert_eq!(board.drop_row(&vertical, 9, 0), Some(16));
    }

    #[test]
    fn test_drop_row_lands_on_stack() {
        let board = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ####......
            ",
        );
        let shape = PieceKind::I.spawn_shape();
        assert_eq!(board.drop_row(&shape, 0, 0), Some(18));
        assert_eq!(board.drop_row(&shape, 4, 0), Some(19));
    }

    #[test]
    fn test_drop_row_is_deterministic() {
        let board = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..#.......
            ..#.......
            ..#.......
            ",
        );
        let shape = PieceKind::T.spawn_shape();
        for col in 0..=7 {
            let first = board.drop_row(&shape, col, 0);
            let second = board.drop_row(&shape, col, 0);
            assert_eq!(first, second, "col {col}");
        }
    }

    #[test]
    fn test_drop_row_none_when_spawn_blocked() {
        let board = Board::from_ascii(
            "
            ##........
            ##........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ",
        );
        let shape = PieceKind::O.spawn_shape();
        assert_eq!(board.drop_row(&shape, 0, 0), None);
        assert!(board.drop_row(&shape, 2, 0).is_some());
    }

    #[test]
    fn test_fill_shape_locks_piece_cells() {
        let mut board = Board::standard();
        let shape = PieceKind::O.spawn_shape();
        board.fill_shape(&shape, 4, 18, Cell::Piece(PieceKind::O));

        assert_eq!(board.cell(4, 18), Cell::Piece(PieceKind::O));
        assert_eq!(board.cell(5, 19), Cell::Piece(PieceKind::O));
        assert!(board.cell(3, 18).is_empty());
        assert!(board.cell(6, 19).is_empty());
    }

    #[test]
    fn test_clear_lines_single() {
        let mut board = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            #.........
            ##########
            ",
        );
        assert_eq!(board.clear_lines(), 1);
        // the partial row above shifts down onto the floor
        assert!(board.cell(0, 19).is_occupied());
        assert!(board.cell(1, 19).is_empty());
        assert!(board.rows().take(19).flatten().all(|cell| cell.is_empty()));
    }

    #[test]
    fn test_clear_lines_multiple_with_gap() {
        let mut board = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ##########
            .#........
            ##########
            ..#.......
            ",
        );
        assert_eq!(board.clear_lines(), 2);
        // surviving partial rows compact toward the floor, keeping order
        assert!(board.cell(1, 18).is_occupied());
        assert!(board.cell(2, 19).is_occupied());
        assert_eq!(
            board.rows().flatten().filter(|c| c.is_occupied()).count(),
            2
        );
    }

    #[test]
    fn test_clear_lines_none() {
        let mut board = Board::from_ascii(
            "
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            ..........
            #########.
            ",
        );
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(
            board.rows().flatten().filter(|c| c.is_occupied()).count(),
            9
        );
    }

    #[test]
    fn test_board_serialization_round_trip() {
        let mut board = Board::standard();
        board.fill_shape(&PieceKind::T.spawn_shape(), 3, 18, Cell::Piece(PieceKind::T));
        board.fill_shape(&PieceKind::O.spawn_shape(), 7, 18, Cell::Garbage);

        let serialized = serde_json::to_string(&board).unwrap();
        assert!(serialized.contains("...TTT.##."));

        let deserialized: Board = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, board);
    }

    #[test]
    fn test_board_deserialization_rejects_bad_input() {
        assert!(serde_json::from_str::<Board>("[\"..x.......\"]").is_err());
        assert!(serde_json::from_str::<Board>("[\"..\", \"...\"]").is_err());
        assert!(serde_json::from_str::<Board>("[]").is_err());
    }
}
