//! RNG module - 7-bag piece generation
//!
//! Each bag is a uniformly random permutation of all seven kinds, so every
//! kind appears exactly once per bag. The upcoming-piece queue is seeded with
//! two bags and appends a fresh bag before any draw that would leave fewer
//! than [`QUEUE_PREVIEW`] pieces visible.
//!
//! The generator is a seeded `StdRng`, so a seed reproduces a whole game.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::types::{PieceKind, BAG_SIZE, QUEUE_PREVIEW};

/// Shuffle a fresh bag (Fisher-Yates via `SliceRandom::shuffle`)
pub fn pick_bag<R: Rng + ?Sized>(rng: &mut R) -> [PieceKind; BAG_SIZE] {
    let mut bag = PieceKind::ALL;
    bag.shuffle(rng);
    bag
}

/// Upcoming piece queue fed by shuffled bags
#[derive(Debug, Clone)]
pub struct PieceQueue {
    queue: VecDeque<PieceKind>,
    rng: StdRng,
    seed: u64,
}

impl PieceQueue {
    /// Create a queue seeded with two bags
    pub fn new(seed: u64) -> Self {
        Self::with_opening(seed, &[])
    }

    /// Create a queue that deals `opening` before the first bag
    pub fn with_opening(seed: u64, opening: &[PieceKind]) -> Self {
        let mut queue = Self {
            queue: VecDeque::with_capacity(opening.len() + BAG_SIZE * 3),
            rng: StdRng::seed_from_u64(seed),
            seed,
        };
        queue.queue.extend(opening.iter().copied());
        queue.push_bag();
        queue.push_bag();
        queue
    }

    fn push_bag(&mut self) {
        let bag = pick_bag(&mut self.rng);
        self.queue.extend(bag);
    }

    /// Draw the next piece, topping the queue up first when it runs low
    pub fn draw(&mut self) -> PieceKind {
        if self.queue.len() <= QUEUE_PREVIEW {
            self.push_bag();
        }
        // The top-up above guarantees at least one bag is queued.
        self.queue.pop_front().unwrap_or(PieceKind::I)
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> Option<PieceKind> {
        self.queue.front().copied()
    }

    /// The next [`QUEUE_PREVIEW`] pieces
    ///
    /// Stack-only; the queue always holds at least this many entries.
    pub fn preview(&self) -> [PieceKind; QUEUE_PREVIEW] {
        let mut out = [PieceKind::I; QUEUE_PREVIEW];
        for (slot, kind) in out.iter_mut().zip(self.queue.iter()) {
            *slot = *kind;
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = &PieceKind> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Seed this queue was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
