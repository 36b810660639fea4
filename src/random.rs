//! Seedable random sources for the optimizers.
//!
//! Every optimizer takes its generator as an argument, so a run is
//! reproducible whenever the caller fixes the seed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Creates a deterministic generator from `seed`.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Returns `0..n` in a uniformly random order.
pub fn shuffled_tour<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut tour: Vec<usize> = (0..n).collect();
    tour.shuffle(rng);
    tour
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        for _ in 0..10 {
            assert_eq!(a.random_range(0..1000), b.random_range(0..1000));
        }
    }

    #[test]
    fn test_shuffled_tour_is_permutation() {
        let mut rng = create_rng(42);
        let mut tour = shuffled_tour(25, &mut rng);
        tour.sort_unstable();
        assert_eq!(tour, (0..25).collect::<Vec<_>>());
    }
}
