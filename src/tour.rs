//! Tour (stop permutation) helpers.

use crate::error::OptimizeError;

/// `0..n` in order.
pub fn natural_order(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// Returns `true` if `tour` contains every index in `0..n` exactly once.
pub fn is_permutation(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &v in tour {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

/// Checks that `tour` is a permutation of `0..n`.
pub fn validate(tour: &[usize], n: usize) -> Result<(), OptimizeError> {
    if is_permutation(tour, n) {
        Ok(())
    } else {
        Err(OptimizeError::BrokenTour {
            expected_len: n,
            tour: tour.to_vec(),
        })
    }
}

/// Reverses the positions `i..=j` in place (a 2-opt move).
pub fn reverse_segment(tour: &mut [usize], i: usize, j: usize) {
    let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
    tour[lo..=hi].reverse();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(is_permutation(&[], 0));
        assert!(!is_permutation(&[0, 0, 1], 3));
        assert!(!is_permutation(&[0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
    }

    #[test]
    fn test_validate_reports_tour() {
        let err = validate(&[1, 1], 2).unwrap_err();
        assert_eq!(
            err,
            OptimizeError::BrokenTour {
                expected_len: 2,
                tour: vec![1, 1]
            }
        );
    }

    #[test]
    fn test_reverse_segment() {
        let mut tour = vec![0, 1, 2, 3, 4];
        reverse_segment(&mut tour, 1, 3);
        assert_eq!(tour, vec![0, 3, 2, 1, 4]);
        reverse_segment(&mut tour, 3, 1);
        assert_eq!(tour, natural_order(5));
        reverse_segment(&mut tour, 2, 2);
        assert_eq!(tour, natural_order(5));
    }
}
