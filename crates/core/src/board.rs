//! Board module - manages the game grid
//!
//! The board is a 10x22 grid (two hidden buffer rows on top of a 20-row
//! visible field). Each cell is empty or holds a [`Cell`] record.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..21
//! (top to bottom). Rows above the board (y < 0) are legal for a falling
//! piece but are never stored.
//!
//! Operations that change the grid (`merge`, `sweep_lines`) return a new
//! board and leave the source untouched.

use arrayvec::ArrayVec;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::piece::ActivePiece;
use crate::pieces::Matrix;
use crate::types::{PieceKind, BOARD_COLS, BOARD_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = BOARD_COLS * BOARD_ROWS;

/// Row indices removed by a sweep, pre-sweep positions, ascending
pub type ClearedRows = ArrayVec<usize, BOARD_ROWS>;

/// A locked block
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Cell {
    pub kind: PieceKind,
    /// Unique within the lifetime of a board lineage
    pub id: u64,
    /// Glow intensity, 1.0 when freshly locked
    pub glow: f32,
    /// Clock timestamp (ms) of the lock
    pub locked_at: u64,
}

impl Cell {
    pub fn new(kind: PieceKind, id: u64, locked_at: u64) -> Self {
        Self {
            kind,
            id,
            glow: 1.0,
            locked_at,
        }
    }
}

/// Result of [`Board::sweep_lines`]
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    pub board: Board,
    pub cleared: ClearedRows,
}

/// The game board - 10 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * COLS + x)
    cells: [Option<Cell>; BOARD_SIZE],
    /// Id handed to the next merged cell
    next_cell_id: u64,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
            next_cell_id: 1,
        }
    }

    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= BOARD_COLS as i32 || y < 0 || y >= BOARD_ROWS as i32 {
            return None;
        }
        Some((y as usize) * BOARD_COLS + (x as usize))
    }

    pub fn width(&self) -> usize {
        BOARD_COLS
    }

    pub fn height(&self) -> usize {
        BOARD_ROWS
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Option<Cell>> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Option<Cell>) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Fill a cell with a fresh block of `kind` (setup helper for hosts and tests)
    pub fn fill(&mut self, x: i32, y: i32, kind: PieceKind) -> bool {
        let id = self.next_cell_id;
        if self.set(x, y, Some(Cell::new(kind, id, 0))) {
            self.next_cell_id += 1;
            true
        } else {
            false
        }
    }

    /// Within bounds and occupied
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether `matrix` fits with its top-left corner at (x, y)
    ///
    /// Every occupied cell must be inside the side walls and not below the
    /// floor. Cells above the top edge are always allowed; cells inside the
    /// board must be empty.
    pub fn can_place(&self, matrix: &Matrix, x: i32, y: i32) -> bool {
        matrix.minos().all(|(dx, dy)| {
            let bx = x + dx;
            let by = y + dy;
            if bx < 0 || bx >= BOARD_COLS as i32 || by >= BOARD_ROWS as i32 {
                return false;
            }
            by < 0 || !self.is_occupied(bx, by)
        })
    }

    /// Return a copy of the board with `piece` written into it
    ///
    /// Minos above the top edge are dropped.
    pub fn merge(&self, piece: &ActivePiece, timestamp: u64) -> Board {
        let mut next = self.clone();
        for (dx, dy) in piece.matrix.minos() {
            let bx = piece.x + dx;
            let by = piece.y + dy;
            if let Some(idx) = Self::index(bx, by) {
                next.cells[idx] = Some(Cell::new(piece.kind, next.next_cell_id, timestamp));
                next.next_cell_id += 1;
            }
        }
        next
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_ROWS {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Remove full rows, shift the rest down, pad the top with empty rows
    ///
    /// The cleared list holds the pre-sweep row indices in ascending order.
    pub fn sweep_lines(&self) -> Sweep {
        let mut cleared = ClearedRows::new();
        let mut next = Board {
            cells: [None; BOARD_SIZE],
            next_cell_id: self.next_cell_id,
        };

        // Scan from bottom to top, copying surviving rows down.
        let mut write_y = BOARD_ROWS;
        for read_y in (0..BOARD_ROWS).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
            } else {
                write_y -= 1;
                let src = read_y * BOARD_COLS;
                let dst = write_y * BOARD_COLS;
                next.cells[dst..dst + BOARD_COLS].copy_from_slice(&self.cells[src..src + BOARD_COLS]);
            }
        }

        cleared.reverse();
        Sweep {
            board: next,
            cleared,
        }
    }

    /// Cells of one row
    pub fn row(&self, y: usize) -> &[Option<Cell>] {
        let start = y * BOARD_COLS;
        &self.cells[start..start + BOARD_COLS]
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Cell>]> {
        self.cells.chunks(BOARD_COLS)
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn cells(&self) -> &[Option<Cell>] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(BOARD_ROWS))?;
        for row in self.rows() {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}
