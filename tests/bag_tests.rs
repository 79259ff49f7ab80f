//! Bag generator tests - permutation and queue invariants over many seeds

use neon_tetris::core::{pick_bag, PieceQueue};
use neon_tetris::types::{PieceKind, BAG_SIZE, QUEUE_PREVIEW};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn sorted(kinds: &[PieceKind]) -> Vec<PieceKind> {
    let mut v = kinds.to_vec();
    v.sort();
    v
}

#[test]
fn test_every_bag_is_a_permutation() {
    let mut seeds = StdRng::seed_from_u64(2024);
    for _ in 0..50 {
        let mut rng = StdRng::seed_from_u64(seeds.random());
        let bag = pick_bag(&mut rng);
        assert_eq!(sorted(&bag), PieceKind::ALL.to_vec());
    }
}

#[test]
fn test_bags_are_not_all_identical() {
    let mut rng = StdRng::seed_from_u64(5);
    let first = pick_bag(&mut rng);
    assert!((0..20).any(|_| pick_bag(&mut rng) != first));
}

#[test]
fn test_queue_draws_in_bag_aligned_groups() {
    let mut seeds = StdRng::seed_from_u64(99);
    for _ in 0..20 {
        let mut queue = PieceQueue::new(seeds.random());
        for _ in 0..10 {
            let group: Vec<_> = (0..BAG_SIZE).map(|_| queue.draw()).collect();
            assert_eq!(sorted(&group), PieceKind::ALL.to_vec());
            assert!(queue.len() >= QUEUE_PREVIEW);
        }
    }
}

#[test]
fn test_each_kind_appears_within_any_thirteen_draws() {
    let mut queue = PieceQueue::new(31337);
    let drawn: Vec<_> = (0..200).map(|_| queue.draw()).collect();
    for window in drawn.windows(2 * BAG_SIZE - 1) {
        for kind in PieceKind::ALL {
            assert!(window.contains(&kind), "{:?} missing from window", kind);
        }
    }
}

#[test]
fn test_same_seed_same_sequence() {
    let a: Vec<_> = {
        let mut q = PieceQueue::new(8);
        (0..40).map(|_| q.draw()).collect()
    };
    let b: Vec<_> = {
        let mut q = PieceQueue::new(8);
        (0..40).map(|_| q.draw()).collect()
    };
    assert_eq!(a, b);
}
