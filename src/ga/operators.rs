//! Permutation crossover and mutation.
//!
//! # Crossover
//!
//! - [`order_crossover`] (OX): keeps a slice of each parent in place and
//!   fills the rest in the other parent's order
//!
//! # Mutation
//!
//! - [`swap_mutation`]: exchange two random positions, O(1)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

use rand::Rng;

/// Order Crossover (OX) for permutations.
///
/// 1. Pick a slice `[start, end]`: `start` uniform in `0..n`, `end` uniform
///    in `start..n`
/// 2. Each child copies its own parent's slice at the same positions
/// 3. The remaining positions are filled left to right with the other
///    parent's values in their original order, skipping values already
///    present
///
/// Both children are permutations whenever both parents are.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn order_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let (start, end) = forward_segment(n, rng);
    (
        ox_build_child(parent1, parent2, start, end),
        ox_build_child(parent2, parent1, start, end),
    )
}

/// Build one OX child: copy segment from `template`, fill from `donor`.
fn ox_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    let mut child: Vec<Option<usize>> = vec![None; n];
    let mut used = vec![false; n];

    for i in start..=end {
        child[i] = Some(template[i]);
        used[template[i]] = true;
    }

    let mut donor_values = donor.iter().copied();
    for slot in child.iter_mut().filter(|slot| slot.is_none()) {
        if let Some(value) = donor_values.by_ref().find(|&v| !used[v]) {
            used[value] = true;
            *slot = Some(value);
        }
    }

    child.into_iter().flatten().collect()
}

/// Swap mutation: exchange two random positions.
///
/// The positions may coincide, in which case the tour is unchanged.
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    perm.swap(i, j);
}

/// Segment `[start, end]` with `start` uniform in `0..n` and `end` uniform
/// in `start..n`.
fn forward_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let start = rng.random_range(0..n);
    let end = start + rng.random_range(0..n - start);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::tour::is_permutation;

    #[test]
    fn test_ox_produces_valid_permutations() {
        let mut rng = create_rng(42);
        let p1 = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let p2 = vec![7, 6, 5, 4, 3, 2, 1, 0];

        for _ in 0..100 {
            let (c1, c2) = order_crossover(&p1, &p2, &mut rng);
            assert!(is_permutation(&c1, 8), "OX child1 not valid: {c1:?}");
            assert!(is_permutation(&c2, 8), "OX child2 not valid: {c2:?}");
        }
    }

    #[test]
    fn test_ox_fill_scans_donor_from_start() {
        // slice [1, 2] of template, rest in donor order
        let child = ox_build_child(&[0, 1, 2, 3, 4], &[4, 3, 2, 1, 0], 1, 2);
        assert_eq!(child, vec![4, 1, 2, 3, 0]);

        let child = ox_build_child(&[4, 3, 2, 1, 0], &[0, 1, 2, 3, 4], 1, 2);
        assert_eq!(child, vec![0, 3, 2, 1, 4]);
    }

    #[test]
    fn test_ox_full_slice_copies_template() {
        let child = ox_build_child(&[2, 0, 1], &[0, 1, 2], 0, 2);
        assert_eq!(child, vec![2, 0, 1]);
    }

    #[test]
    fn test_ox_single_element() {
        let mut rng = create_rng(42);
        let (c1, c2) = order_crossover(&[0], &[0], &mut rng);
        assert_eq!(c1, vec![0]);
        assert_eq!(c2, vec![0]);
    }

    #[test]
    fn test_forward_segment_bounds() {
        let mut rng = create_rng(7);
        for _ in 0..200 {
            let (start, end) = forward_segment(6, &mut rng);
            assert!(start <= end && end < 6, "bad segment [{start}, {end}]");
        }
    }

    #[test]
    fn test_swap_mutation_keeps_permutation() {
        let mut rng = create_rng(42);
        let mut perm: Vec<usize> = (0..10).collect();
        for _ in 0..100 {
            swap_mutation(&mut perm, &mut rng);
            assert!(is_permutation(&perm, 10));
        }
    }
}
