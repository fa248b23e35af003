//! Stateless probability math.
//!
//! Two independent formulas drive every contest in the game: the
//! attacker-vs-defender percentage formula (shots, passes, steals) and the
//! d20 threshold formula (dribble-vs-steal contests). Both are pure; the
//! only randomness lives in the draw helpers.

use rand::Rng;

/// Success percentage for an attacker skill `attack` against a defender
/// skill `defense`, both on the same 1-99 scale.
///
/// Piecewise: `100 - (2B - A)/2` when ahead, `(2A - B)/2` when behind,
/// 50 on equal skill, clamped to `[0, 100]`.
pub fn success_percentage(attack: f64, defense: f64) -> f64 {
    let percent = if attack > defense {
        100.0 - (2.0 * defense - attack) / 2.0
    } else if attack < defense {
        (2.0 * attack - defense) / 2.0
    } else {
        50.0
    };
    percent.clamp(0.0, 100.0)
}

/// One uniform draw in `[0, 100)`; succeeds strictly below `percent`.
pub fn roll_success(rng: &mut impl Rng, percent: f64) -> bool {
    rng.gen_range(0.0..100.0) < percent
}

/// d20 roll needed for the ball handler to keep possession, from dribble
/// skill `dribble` and contest skill `steal` on the 1-20 scale.
///
/// Clamped to `[1, 21]`: 21 cannot be beaten (the defender always wins),
/// 1 always succeeds.
pub fn dribble_threshold(dribble: i32, steal: i32) -> i32 {
    (20 - (dribble - steal)).clamp(1, 21)
}

/// Equivalent success chance of a threshold, as a percentage.
pub fn threshold_success_percentage(threshold: i32) -> f64 {
    ((21 - threshold) as f64 / 20.0 * 100.0).clamp(0.0, 100.0)
}

/// Roll a d20 against a threshold. `roll >= threshold` keeps the ball.
pub fn roll_d20(rng: &mut impl Rng) -> i32 {
    rng.gen_range(1..=20)
}

/// Map a 1-99 attribute onto the 1-20 contest scale used by the d20
/// formula.
pub fn contest_scale(attribute: u8) -> i32 {
    (attribute as i32 / 5).clamp(1, 20)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_percentage_formula_exact_values() {
        assert_eq!(success_percentage(99.0, 51.0), 98.5);
        assert_eq!(success_percentage(51.0, 99.0), 1.5);
        assert_eq!(success_percentage(75.0, 75.0), 50.0);
        assert_eq!(success_percentage(85.0, 70.0), 72.5);
        assert_eq!(success_percentage(99.0, 99.0), 50.0);
        assert_eq!(success_percentage(1.0, 1.0), 50.0);
    }

    #[test]
    fn test_percentage_clamps_extremes() {
        assert_eq!(success_percentage(1.0, 99.0), 0.0);
        assert_eq!(success_percentage(99.0, 1.0), 100.0);
    }

    #[test]
    fn test_threshold_values_from_rulebook() {
        assert_eq!(dribble_threshold(16, 2), 6);
        assert_eq!(threshold_success_percentage(6), 75.0);
        assert_eq!(dribble_threshold(10, 10), 20);
        assert_eq!(threshold_success_percentage(20), 5.0);
        assert_eq!(dribble_threshold(2, 18), 21);
        assert_eq!(threshold_success_percentage(21), 0.0);
        assert_eq!(dribble_threshold(20, 5), 5);
        assert_eq!(threshold_success_percentage(5), 80.0);
    }

    #[test]
    fn test_threshold_one_always_beatable() {
        assert_eq!(dribble_threshold(20, 1), 1);
        assert_eq!(threshold_success_percentage(1), 100.0);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..100 {
            assert!(roll_d20(&mut rng) >= 1);
        }
    }

    #[test]
    fn test_roll_success_boundary_percents() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..100 {
            assert!(!roll_success(&mut rng, 0.0));
            assert!(roll_success(&mut rng, 100.0));
        }
    }

    #[test]
    fn test_contest_scale_mapping() {
        assert_eq!(contest_scale(1), 1);
        assert_eq!(contest_scale(60), 12);
        assert_eq!(contest_scale(99), 19);
        assert_eq!(contest_scale(4), 1); // floor to 0, clamped up
    }

    proptest! {
        #[test]
        fn prop_percentage_always_in_range(attack in 1u8..=99, defense in 1u8..=99) {
            let percent = success_percentage(attack as f64, defense as f64);
            prop_assert!((0.0..=100.0).contains(&percent));
        }

        #[test]
        fn prop_percentage_is_idempotent(attack in 1u8..=99, defense in 1u8..=99) {
            let first = success_percentage(attack as f64, defense as f64);
            let second = success_percentage(attack as f64, defense as f64);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_threshold_always_clamped(dribble in 1i32..=20, steal in 1i32..=20) {
            let threshold = dribble_threshold(dribble, steal);
            prop_assert!((1..=21).contains(&threshold));
            let chance = threshold_success_percentage(threshold);
            prop_assert!((0.0..=100.0).contains(&chance));
        }

        #[test]
        fn prop_better_dribbler_never_has_lower_chance(
            dribble in 1i32..=19, steal in 1i32..=20
        ) {
            let lower = threshold_success_percentage(dribble_threshold(dribble, steal));
            let higher = threshold_success_percentage(dribble_threshold(dribble + 1, steal));
            prop_assert!(higher >= lower);
        }
    }
}
