use arrayvec::ArrayVec;

use crate::InvalidShapeError;

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// J-piece.
    J = 4,
    /// L-piece.
    L = 5,
    /// T-piece.
    T = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds, in canonical order.
    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Returns the spawn-orientation shape of this piece kind.
    ///
    /// Shapes are stored trimmed to their occupied bounding box, so the
    /// matrix width and height equal the piece's occupied extent.
    #[must_use]
    pub fn spawn_shape(self) -> Shape {
        const C: bool = true;
        const E: bool = false;
        let rows: &[&[bool]] = match self {
            PieceKind::I => &[&[C, C, C, C]],
            PieceKind::O => &[&[C, C], &[C, C]],
            PieceKind::S => &[&[E, C, C], &[C, C, E]],
            PieceKind::Z => &[&[C, C, E], &[E, C, C]],
            PieceKind::J => &[&[C, E, E], &[C, C, C]],
            PieceKind::L => &[&[E, E, C], &[C, C, C]],
            PieceKind::T => &[&[E, C, E], &[C, C, C]],
        };
        Shape::from_trimmed_rows(rows)
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetromind_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::T => 'T',
        }
    }

    /// Parses a piece kind from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }
}

/// A piece shape as a binary occupancy matrix.
///
/// The matrix is always trimmed to the occupied bounding box: there are no
/// empty border rows or columns, so `width()` and `height()` equal the
/// occupied extent of the shape. This makes column enumeration during move
/// search exact (`0..=board_width - shape_width`) and lets the landing row
/// refer directly to the topmost occupied row of the piece.
///
/// Shapes are immutable. Rotation returns a new `Shape`, and rotating a
/// trimmed shape yields a trimmed shape, so four quarter turns reproduce the
/// original matrix bit for bit.
///
/// # Example
///
/// ```
/// use tetromind_engine::PieceKind;
///
/// let shape = PieceKind::I.spawn_shape();
/// assert_eq!((shape.width(), shape.height()), (4, 1));
///
/// let vertical = shape.rotated();
/// assert_eq!((vertical.width(), vertical.height()), (1, 4));
/// assert_eq!(shape.rotated_by(4), shape);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Shape {
    /// Creates a shape from a binary occupancy matrix.
    ///
    /// The matrix must be rectangular and contain at least one occupied
    /// cell. Empty border rows and columns are trimmed away, so callers may
    /// pass padded matrices (e.g. a 4x4 grid with a single filled row).
    pub fn from_matrix(rows: &[Vec<bool>]) -> Result<Self, InvalidShapeError> {
        let Some(first) = rows.first() else {
            return Err(InvalidShapeError::Empty);
        };
        let width = first.len();
        if width == 0 {
            return Err(InvalidShapeError::Empty);
        }
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(InvalidShapeError::RaggedRow {
                    row: y,
                    expected: width,
                    actual: row.len(),
                });
            }
        }

        let occupied = rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, cell)| **cell)
                    .map(move |(x, _)| (x, y))
            })
            .collect::<Vec<_>>();
        if occupied.is_empty() {
            return Err(InvalidShapeError::NoOccupiedCells);
        }

        let min_x = occupied.iter().map(|(x, _)| *x).min().unwrap_or(0);
        let max_x = occupied.iter().map(|(x, _)| *x).max().unwrap_or(0);
        let min_y = occupied.iter().map(|(_, y)| *y).min().unwrap_or(0);
        let max_y = occupied.iter().map(|(_, y)| *y).max().unwrap_or(0);

        let width = max_x - min_x + 1;
        let height = max_y - min_y + 1;
        let mut cells = vec![false; width * height];
        for (x, y) in occupied {
            cells[(y - min_y) * width + (x - min_x)] = true;
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Creates a shape from ASCII art for testing.
    /// '#' represents an occupied cell, '.' represents an empty cell.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let rows: Vec<Vec<bool>> = art
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                line.chars()
                    .filter(|c| *c == '#' || *c == '.')
                    .map(|c| c == '#')
                    .collect()
            })
            .collect();
        Self::from_matrix(&rows).expect("invalid ASCII shape")
    }

    /// Internal constructor for matrices known to be rectangular and trimmed.
    pub(crate) fn from_trimmed_rows(rows: &[&[bool]]) -> Self {
        let width = rows[0].len();
        let cells = rows.iter().flat_map(|row| row.iter().copied()).collect();
        Self {
            width,
            height: rows.len(),
            cells,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Checks whether the cell at `(x, y)` within the matrix is occupied.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    /// Returns an iterator of `(x, y)` offsets of all occupied cells.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .map(|(i, _)| (i % self.width, i / self.width))
    }

    /// Returns the number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|occupied| **occupied).count()
    }

    /// Returns the shape rotated by 90 degrees clockwise.
    ///
    /// Pure: `self` is left untouched. Cell `(x, y)` of a `w`x`h` matrix maps
    /// to `(h - 1 - y, x)` of the resulting `h`x`w` matrix.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let (w, h) = (self.width, self.height);
        let mut cells = vec![false; w * h];
        for y in 0..h {
            for x in 0..w {
                if self.cells[y * w + x] {
                    cells[x * h + (h - 1 - y)] = true;
                }
            }
        }
        Self {
            width: h,
            height: w,
            cells,
        }
    }

    /// Returns the shape rotated by `steps` quarter turns clockwise.
    ///
    /// Rotation by 4 steps returns the original matrix exactly.
    #[must_use]
    pub fn rotated_by(&self, steps: u8) -> Self {
        let mut shape = self.clone();
        for _ in 0..steps % 4 {
            shape = shape.rotated();
        }
        shape
    }

    /// Returns the distinct rotation states of this shape.
    ///
    /// Rotations that reproduce an earlier matrix are skipped so the move
    /// search never evaluates the same placement twice (the O-piece has one
    /// distinct rotation, I/S/Z have two, J/L/T have four). Each entry pairs
    /// the rotation index with the rotated shape; indices are ascending.
    #[must_use]
    pub fn distinct_rotations(&self) -> ArrayVec<(u8, Shape), 4> {
        let mut rotations: ArrayVec<(u8, Shape), 4> = ArrayVec::new();
        let mut shape = self.clone();
        for r in 0..4u8 {
            if rotations.iter().all(|(_, seen)| *seen != shape) {
                rotations.push((r, shape.clone()));
            }
            shape = shape.rotated();
        }
        rotations
    }
}
