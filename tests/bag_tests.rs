//! Bag randomizer tests - fairness over full cycles and within a cycle

use std::collections::HashMap;

use blockfall::core::{Bag, RandomSource, ScriptedRng, SimpleRng};
use blockfall::types::PieceKind;
use proptest::prelude::*;

fn counts_after<R: RandomSource>(bag: &mut Bag<R>, draws: usize) -> HashMap<PieceKind, usize> {
    let mut counts: HashMap<PieceKind, usize> = PieceKind::ALL.iter().map(|&k| (k, 0)).collect();
    for _ in 0..draws {
        *counts.entry(bag.draw()).or_default() += 1;
    }
    counts
}

fn spread(counts: &HashMap<PieceKind, usize>) -> usize {
    let max = counts.values().copied().max().unwrap_or(0);
    let min = counts.values().copied().min().unwrap_or(0);
    max - min
}

#[test]
fn test_perfect_counts_after_full_bags() {
    let n = 500;
    let mut bag = Bag::with_seed(12345);
    let counts = counts_after(&mut bag, 7 * n);
    for kind in PieceKind::ALL {
        assert_eq!(counts[&kind], n, "{kind:?}");
    }
}

#[test]
fn test_never_differs_by_more_than_one_mid_bag() {
    let mut bag = Bag::with_seed(777);
    let counts = counts_after(&mut bag, 7 * 50 + 3);
    assert!(spread(&counts) <= 1);
}

#[test]
fn test_each_window_of_seven_at_bag_boundary_is_a_permutation() {
    let mut bag = Bag::with_seed(31);
    for _ in 0..100 {
        let mut window: Vec<_> = (0..7).map(|_| bag.draw()).collect();
        window.sort();
        assert_eq!(window, PieceKind::ALL.to_vec());
    }
}

#[test]
fn test_remaining_plus_dealt_is_one_of_each() {
    let mut bag = Bag::with_seed(8);
    let mut dealt = Vec::new();
    for _ in 0..7 {
        dealt.push(bag.draw());
        let mut all: Vec<_> = dealt.iter().chain(bag.remaining()).copied().collect();
        all.sort();
        assert_eq!(all, PieceKind::ALL.to_vec());
    }
}

#[test]
fn test_same_seed_same_sequence() {
    let mut a = Bag::with_seed(2024);
    let mut b = Bag::new(SimpleRng::new(2024));
    for _ in 0..70 {
        assert_eq!(a.draw(), b.draw());
    }
}

#[test]
fn test_bags_are_actually_shuffled() {
    // With a real random source, 20 bags in catalog order would be absurd
    let mut bag = Bag::with_seed(4242);
    let orders: Vec<Vec<PieceKind>> = (0..20)
        .map(|_| (0..7).map(|_| bag.draw()).collect())
        .collect();
    assert!(orders.windows(2).any(|w| w[0] != w[1]));
}

#[test]
fn test_scripted_rng_reproduces_known_order() {
    let mut bag = Bag::new(ScriptedRng::first(PieceKind::O));
    let drawn: Vec<_> = (0..7).map(|_| bag.draw()).collect();
    assert_eq!(
        drawn,
        vec![
            PieceKind::O,
            PieceKind::J,
            PieceKind::Z,
            PieceKind::S,
            PieceKind::T,
            PieceKind::I,
            PieceKind::L,
        ]
    );
}

proptest! {
    #[test]
    fn prop_full_cycles_are_exact(seed in any::<u32>(), bags in 1usize..40) {
        let mut bag = Bag::with_seed(seed);
        let counts = counts_after(&mut bag, 7 * bags);
        for kind in PieceKind::ALL {
            prop_assert_eq!(counts[&kind], bags);
        }
    }

    #[test]
    fn prop_spread_at_most_one_after_any_prefix(seed in any::<u32>(), draws in 0usize..200) {
        let mut bag = Bag::with_seed(seed);
        let counts = counts_after(&mut bag, draws);
        prop_assert!(spread(&counts) <= 1);
    }
}
