//! Seedable randomness and weighted lookup tables.
//!
//! Both engines own a `SmallRng`. Browser builds seed it from `getrandom`
//! (through `rand`'s entropy source); tests seed it explicitly so spawns are
//! reproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// RNG seeded from the platform entropy source.
pub fn entropy_rng() -> SmallRng {
    SmallRng::from_entropy()
}

/// RNG with a fixed seed.
pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Uniform sample in `[min, max)`. Degenerate ranges return `min`.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max > min { rng.gen_range(min..max) } else { min }
}

/// Cumulative-probability table: each entry owns the slice of `[0, total)`
/// that follows the previous entry.
#[derive(Clone, Debug)]
pub struct WeightedTable<T> {
    entries: Vec<(f64, T)>, // (cumulative upper bound, value)
    total: f64,
}

impl<T> WeightedTable<T> {
    /// Build from `(weight, value)` pairs. Non-positive weights are skipped.
    pub fn new(weighted: impl IntoIterator<Item = (f64, T)>) -> Self {
        let mut entries = Vec::new();
        let mut total = 0.0;
        for (w, value) in weighted {
            if w > 0.0 && w.is_finite() {
                total += w;
                entries.push((total, value));
            }
        }
        Self { entries, total }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Look up the entry owning `roll`, where `roll` is a fraction in `[0, 1)`.
    pub fn lookup(&self, roll: f64) -> Option<&T> {
        let target = roll.clamp(0.0, 1.0) * self.total;
        self.entries
            .iter()
            .find(|(upper, _)| target < *upper)
            .or_else(|| self.entries.last())
            .map(|(_, v)| v)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        self.lookup(rng.gen_range(0.0..1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_follows_cumulative_ranges() {
        let table = WeightedTable::new([(0.1, 'a'), (0.1, 'b'), (0.3, 'c'), (0.5, 'd')]);
        assert_eq!(table.lookup(0.0), Some(&'a'));
        assert_eq!(table.lookup(0.09), Some(&'a'));
        assert_eq!(table.lookup(0.15), Some(&'b'));
        assert_eq!(table.lookup(0.45), Some(&'c'));
        assert_eq!(table.lookup(0.5), Some(&'d'));
        assert_eq!(table.lookup(1.0), Some(&'d'));
    }

    #[test]
    fn zero_weights_are_never_selected() {
        let table = WeightedTable::new([(0.0, 1), (2.0, 2), (-1.0, 3)]);
        assert_eq!(table.total(), 2.0);
        for i in 0..10 {
            assert_eq!(table.lookup(i as f64 / 10.0), Some(&2));
        }
    }

    #[test]
    fn empty_table_yields_none() {
        let table: WeightedTable<u8> = WeightedTable::new([]);
        assert!(table.is_empty());
        assert_eq!(table.lookup(0.3), None);
    }

    #[test]
    fn seeded_rngs_repeat() {
        let mut a = seeded_rng(7);
        let mut b = seeded_rng(7);
        for _ in 0..16 {
            assert_eq!(uniform(&mut a, 0.0, 10.0), uniform(&mut b, 0.0, 10.0));
        }
    }
}
