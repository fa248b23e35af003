//! Generic weighted random choice.
//!
//! Ball-carrier selection and similar picks all go through this single
//! primitive instead of ad hoc cumulative-weight loops.

use rand::Rng;

/// Pick one item from `(item, weight)` pairs with probability proportional
/// to weight. Zero-weight items are never picked. Returns `None` for an
/// empty slice or an all-zero weight sum.
pub fn weighted_choice<'a, T>(rng: &mut impl Rng, items: &'a [(T, u32)]) -> Option<&'a T> {
    let total: u32 = items.iter().map(|(_, w)| w).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.gen_range(0..total);
    for (item, weight) in items {
        if roll < *weight {
            return Some(item);
        }
        roll -= weight;
    }
    // Unreachable: roll < total and the weights sum to total.
    items.last().map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_empty_and_zero_weights_yield_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let empty: [(u8, u32); 0] = [];
        assert_eq!(weighted_choice(&mut rng, &empty), None);
        assert_eq!(weighted_choice(&mut rng, &[("a", 0), ("b", 0)]), None);
    }

    #[test]
    fn test_single_item_always_chosen() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..20 {
            assert_eq!(weighted_choice(&mut rng, &[("only", 7)]), Some(&"only"));
        }
    }

    #[test]
    fn test_zero_weight_item_never_chosen() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            let pick = weighted_choice(&mut rng, &[("never", 0), ("always", 5)]);
            assert_eq!(pick, Some(&"always"));
        }
    }

    #[test]
    fn test_distribution_tracks_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let items = [("heavy", 80u32), ("light", 20u32)];
        let mut heavy = 0;
        let trials = 2000;
        for _ in 0..trials {
            if weighted_choice(&mut rng, &items) == Some(&"heavy") {
                heavy += 1;
            }
        }
        let ratio = heavy as f64 / trials as f64;
        assert!((0.72..0.88).contains(&ratio), "heavy ratio {} far from 0.8", ratio);
    }
}
