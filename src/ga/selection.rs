//! Parent selection.

use rand::Rng;

use super::types::Candidate;

/// Tournament selection: draw `min(k, len)` candidates with replacement and
/// return the index of the fittest; the earliest draw wins ties.
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng>(population: &[Candidate], k: usize, rng: &mut R) -> usize {
    assert!(!population.is_empty(), "cannot select from empty population");

    let n = population.len();
    let k = k.clamp(1, n);

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness > population[best_idx].fitness {
            best_idx = idx;
        }
    }
    best_idx
}
