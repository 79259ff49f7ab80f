//! Pieces module - static catalog of the seven piece shapes
//!
//! Every kind owns an ordered list of rotation states. Each state is a square
//! 0/1 occupancy matrix; all states of one kind share the same size. O has a
//! single state, I/S/Z have two and J/L/T have four.

use crate::types::{PieceKind, Rgb};

/// Square occupancy matrix (up to 4x4), row-major, `[row][col]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    size: usize,
    cells: [[u8; 4]; 4],
}

impl Matrix {
    const fn new(size: usize, cells: [[u8; 4]; 4]) -> Self {
        Self { size, cells }
    }

    /// Side length of the matrix
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the cell at (`col`, `row`) is occupied
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        col < self.size && row < self.size && self.cells[row][col] != 0
    }

    /// Occupied cells as `(dx, dy)` offsets from the top-left corner
    pub fn minos(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.size).flat_map(move |row| {
            (0..self.size)
                .filter(move |&col| self.cells[row][col] != 0)
                .map(move |col| (col as i32, row as i32))
        })
    }
}

/// Immutable per-kind definition
#[derive(Debug, PartialEq, Eq)]
pub struct PieceShape {
    pub kind: PieceKind,
    pub rotations: &'static [Matrix],
    pub color: Rgb,
    pub glow: Rgb,
}

impl PieceShape {
    pub fn rotation_count(&self) -> usize {
        self.rotations.len()
    }

    /// Matrix for a rotation index (wrapped into range)
    pub fn matrix(&self, rotation: usize) -> &'static Matrix {
        &self.rotations[rotation % self.rotations.len()]
    }
}

/// Look up the shape definition for a piece kind
pub fn shape(kind: PieceKind) -> &'static PieceShape {
    &CATALOG[kind.index()]
}

const I_ROTATIONS: [Matrix; 2] = [
    Matrix::new(4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Matrix::new(4, [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]]),
];

const J_ROTATIONS: [Matrix; 4] = [
    Matrix::new(3, [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0; 4]]),
    Matrix::new(3, [[0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0; 4]]),
    Matrix::new(3, [[0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0], [0; 4]]),
    Matrix::new(3, [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0; 4]]),
];

const L_ROTATIONS: [Matrix; 4] = [
    Matrix::new(3, [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0; 4]]),
    Matrix::new(3, [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0; 4]]),
    Matrix::new(3, [[0, 0, 0, 0], [1, 1, 1, 0], [1, 0, 0, 0], [0; 4]]),
    Matrix::new(3, [[1, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0; 4]]),
];

const O_ROTATIONS: [Matrix; 1] = [Matrix::new(2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]])];

const S_ROTATIONS: [Matrix; 2] = [
    Matrix::new(3, [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0; 4]]),
    Matrix::new(3, [[0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0; 4]]),
];

const T_ROTATIONS: [Matrix; 4] = [
    Matrix::new(3, [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0; 4]]),
    Matrix::new(3, [[0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0; 4]]),
    Matrix::new(3, [[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0; 4]]),
    Matrix::new(3, [[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0; 4]]),
];

const Z_ROTATIONS: [Matrix; 2] = [
    Matrix::new(3, [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0; 4]]),
    Matrix::new(3, [[0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0; 4]]),
];

/// Indexed by `PieceKind::index()`
static CATALOG: [PieceShape; 7] = [
    PieceShape {
        kind: PieceKind::I,
        rotations: &I_ROTATIONS,
        color: Rgb::hex(0x34d8ff),
        glow: Rgb::hex(0x78f3ff),
    },
    PieceShape {
        kind: PieceKind::J,
        rotations: &J_ROTATIONS,
        color: Rgb::hex(0x4da3ff),
        glow: Rgb::hex(0x86b9ff),
    },
    PieceShape {
        kind: PieceKind::L,
        rotations: &L_ROTATIONS,
        color: Rgb::hex(0xffa44d),
        glow: Rgb::hex(0xffc886),
    },
    PieceShape {
        kind: PieceKind::O,
        rotations: &O_ROTATIONS,
        color: Rgb::hex(0xffd94d),
        glow: Rgb::hex(0xfff299),
    },
    PieceShape {
        kind: PieceKind::S,
        rotations: &S_ROTATIONS,
        color: Rgb::hex(0x6cffb3),
        glow: Rgb::hex(0x9dffd1),
    },
    PieceShape {
        kind: PieceKind::T,
        rotations: &T_ROTATIONS,
        color: Rgb::hex(0xc184ff),
        glow: Rgb::hex(0xddb5ff),
    },
    PieceShape {
        kind: PieceKind::Z,
        rotations: &Z_ROTATIONS,
        color: Rgb::hex(0xff6c99),
        glow: Rgb::hex(0xff9cbb),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_indexed_by_kind() {
        for kind in PieceKind::ALL {
            assert_eq!(shape(kind).kind, kind);
        }
    }

    #[test]
    fn rotation_counts() {
        assert_eq!(shape(PieceKind::O).rotation_count(), 1);
        for kind in [PieceKind::I, PieceKind::S, PieceKind::Z] {
            assert_eq!(shape(kind).rotation_count(), 2, "{:?}", kind);
        }
        for kind in [PieceKind::J, PieceKind::L, PieceKind::T] {
            assert_eq!(shape(kind).rotation_count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn every_rotation_has_four_minos_and_uniform_size() {
        for kind in PieceKind::ALL {
            let def = shape(kind);
            let size = def.rotations[0].size();
            for m in def.rotations {
                assert_eq!(m.size(), size);
                assert_eq!(m.minos().count(), 4, "{:?}", kind);
            }
        }
    }

    #[test]
    fn padding_outside_size_is_empty() {
        for kind in PieceKind::ALL {
            for m in shape(kind).rotations {
                for row in 0..4 {
                    for col in 0..4 {
                        if row >= m.size() || col >= m.size() {
                            assert_eq!(m.cells[row][col], 0);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn minos_are_row_major_offsets() {
        let t = shape(PieceKind::T).matrix(0);
        let minos: Vec<_> = t.minos().collect();
        assert_eq!(minos, vec![(1, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn colors_come_from_hex() {
        assert_eq!(shape(PieceKind::I).color, Rgb::new(0x34, 0xd8, 0xff));
    }
}
