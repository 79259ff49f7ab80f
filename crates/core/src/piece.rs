//! Active piece controller - spawning, translation, rotation with wall kicks
//! and ghost projection.
//!
//! All operations return new pieces; legality is always decided by
//! [`Board::can_place`].

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::board::Board;
use crate::pieces::{shape, Matrix};
use crate::types::{PieceKind, RotateDir, BOARD_COLS, KICK_OFFSETS};

/// The currently falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Index into the kind's rotation list
    pub rotation: usize,
    /// Column of the matrix's left edge
    pub x: i32,
    /// Row of the matrix's top edge (negative while above the board)
    pub y: i32,
    /// Matrix for `rotation`
    pub matrix: &'static Matrix,
}

impl ActivePiece {
    /// Create a piece at rotation 0, horizontally centered on the top row
    pub fn spawn(kind: PieceKind) -> Self {
        let matrix = shape(kind).matrix(0);
        Self {
            kind,
            rotation: 0,
            x: ((BOARD_COLS - matrix.size()) / 2) as i32,
            y: 0,
            matrix,
        }
    }

    /// Whether the piece is legal where it stands
    pub fn fits(&self, board: &Board) -> bool {
        board.can_place(self.matrix, self.x, self.y)
    }

    /// Candidate shifted by (dx, dy); legality is not checked
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Candidate with the next/previous rotation state at the same position
    pub fn rotated(&self, dir: RotateDir) -> Self {
        let def = shape(self.kind);
        let rotation = dir.apply(self.rotation, def.rotation_count());
        Self {
            rotation,
            matrix: def.matrix(rotation),
            ..*self
        }
    }

    /// Rotate with the horizontal wall-kick search
    ///
    /// Offsets from [`KICK_OFFSETS`] are tried in order relative to the
    /// naively rotated position; the first legal placement wins.
    pub fn try_rotate(&self, board: &Board, dir: RotateDir) -> Option<Self> {
        let rotated = self.rotated(dir);
        KICK_OFFSETS
            .iter()
            .map(|&dx| rotated.translated(dx, 0))
            .find(|candidate| candidate.fits(board))
    }

    /// Candidate shifted by (dx, dy) if it is legal
    pub fn try_translate(&self, board: &Board, dx: i32, dy: i32) -> Option<Self> {
        let candidate = self.translated(dx, dy);
        candidate.fits(board).then_some(candidate)
    }

    /// Lowest row reachable by stepping straight down from the current row
    pub fn ghost_y(&self, board: &Board) -> i32 {
        let mut y = self.y;
        while board.can_place(self.matrix, self.x, y + 1) {
            y += 1;
        }
        y
    }

    /// Board coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.matrix
            .minos()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

impl Serialize for ActivePiece {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ActivePiece", 4)?;
        s.serialize_field("kind", &self.kind)?;
        s.serialize_field("rotation", &self.rotation)?;
        s.serialize_field("x", &self.x)?;
        s.serialize_field("y", &self.y)?;
        s.end()
    }
}
