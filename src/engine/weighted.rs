use rand::Rng;

use crate::world::{ExploreEvent, LootEntry};

/// An entry in a weighted outcome table.
pub trait Weighted {
    fn weight(&self) -> f64;
}

impl Weighted for LootEntry {
    fn weight(&self) -> f64 {
        self.chance
    }
}

impl Weighted for ExploreEvent {
    fn weight(&self) -> f64 {
        self.chance
    }
}

impl<T> Weighted for (T, f64) {
    fn weight(&self) -> f64 {
        self.1
    }
}

/// Picks one entry with probability proportional to its weight.
///
/// Draws `r` in `[0, total)` and subtracts weights in order until `r <= 0`.
/// If no entry is selected (all weights zero, a non-finite total, or rounding
/// leaves a positive remainder) the first entry is returned. `None` only for
/// an empty slice.
pub fn weighted_pick<'a, T, R>(entries: &'a [T], rng: &mut R) -> Option<&'a T>
where
    T: Weighted,
    R: Rng + ?Sized,
{
    let first = entries.first()?;

    let total: f64 = entries.iter().map(|e| e.weight()).sum();
    if !(total > 0.0 && total.is_finite()) {
        return Some(first);
    }

    let mut remainder = rng.gen_range(0.0..total);
    for entry in entries {
        remainder -= entry.weight();
        if remainder <= 0.0 {
            return Some(entry);
        }
    }

    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn empty_table_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let table: Vec<(&str, f64)> = Vec::new();
        assert!(weighted_pick(&table, &mut rng).is_none());
    }

    #[test]
    fn all_zero_weights_fall_back_to_first() {
        let mut rng = StdRng::seed_from_u64(2);
        let table = [("a", 0.0), ("b", 0.0), ("c", 0.0)];
        for _ in 0..50 {
            assert_eq!(weighted_pick(&table, &mut rng).unwrap().0, "a");
        }
    }

    #[test]
    fn non_finite_total_falls_back_to_first() {
        let mut rng = StdRng::seed_from_u64(4);
        let table = [("a", 1.0), ("b", f64::INFINITY)];
        assert_eq!(weighted_pick(&table, &mut rng).unwrap().0, "a");
        let table = [("a", f64::MAX), ("b", f64::MAX)];
        assert_eq!(weighted_pick(&table, &mut rng).unwrap().0, "a");
    }

    #[test]
    fn zero_weight_entries_are_never_chosen_when_others_are_positive() {
        let mut rng = StdRng::seed_from_u64(3);
        let table = [("never", 0.0), ("always", 1.0)];
        for _ in 0..500 {
            assert_eq!(weighted_pick(&table, &mut rng).unwrap().0, "always");
        }
    }

    #[test]
    fn frequencies_converge_to_weights() {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let table = [("enemy", 0.4), ("treasure", 0.3), ("nothing", 0.2), ("shrine", 0.1)];
        let draws = 100_000;
        let mut counts = [0usize; 4];
        for _ in 0..draws {
            let pick = weighted_pick(&table, &mut rng).unwrap();
            let idx = table.iter().position(|e| e.0 == pick.0).unwrap();
            counts[idx] += 1;
        }
        for (i, (_, w)) in table.iter().enumerate() {
            let freq = counts[i] as f64 / draws as f64;
            assert!((freq - w).abs() < 0.01, "entry {i}: {freq} vs {w}");
        }
    }

    proptest! {
        #[test]
        fn always_returns_an_entry_with_positive_weight_or_the_first(
            weights in prop::collection::vec(0.0f64..10.0, 1..12),
            seed: u64,
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let table: Vec<(usize, f64)> = weights.iter().copied().enumerate().collect();
            let pick = weighted_pick(&table, &mut rng).unwrap();
            prop_assert!(pick.1 > 0.0 || pick.0 == 0);
        }
    }
}
