//! Dense pairwise matrices with per-entry fallback.

/// A dense n×n matrix stored in row-major order.
///
/// Entries that were never set, and lookups outside `0..size`, yield the
/// matrix's `fallback` value instead of failing. The diagonal always reads
/// as `T::default()` (zero for the numeric types used here).
///
/// # Examples
///
/// ```
/// use lastmile_routing::matrix::DistanceMatrix;
///
/// let mut dm = DistanceMatrix::new(3, 5.0);
/// dm.set(0, 1, 2.5);
/// assert_eq!(dm.get(0, 1), 2.5);
/// assert_eq!(dm.get(1, 2), 5.0); // never set
/// assert_eq!(dm.get(2, 2), 0.0); // diagonal
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    cells: Vec<Option<T>>,
    size: usize,
    fallback: T,
}

/// Kilometers between stops.
pub type DistanceMatrix = Matrix<f64>;

/// Whole minutes between stops.
pub type TimeMatrix = Matrix<u32>;

impl<T: Copy + Default> Matrix<T> {
    /// Creates an `size`×`size` matrix with no entries set.
    pub fn new(size: usize, fallback: T) -> Self {
        Self {
            cells: vec![None; size * size],
            size,
            fallback,
        }
    }

    /// Creates a matrix whose off-diagonal entries all equal `value`.
    pub fn filled(size: usize, value: T) -> Self {
        Self::from_fn(size, value, |_, _| value)
    }

    /// Builds a matrix by evaluating `f(i, j)` for every off-diagonal pair.
    pub fn from_fn<F>(size: usize, fallback: T, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut matrix = Self::new(size, fallback);
        for i in 0..size {
            for j in 0..size {
                if i != j {
                    matrix.set(i, j, f(i, j));
                }
            }
        }
        matrix
    }

    /// Returns the entry for `(from, to)`, or the fallback if it is missing.
    pub fn get(&self, from: usize, to: usize) -> T {
        if from == to {
            return T::default();
        }
        if from >= self.size || to >= self.size {
            return self.fallback;
        }
        self.cells[from * self.size + to].unwrap_or(self.fallback)
    }

    /// Replaces the value returned for missing entries.
    pub fn with_fallback(mut self, fallback: T) -> Self {
        self.fallback = fallback;
        self
    }

    /// Sets `(from, to)`. Diagonal and out-of-range writes are ignored.
    pub fn set(&mut self, from: usize, to: usize, value: T) {
        if from == to || from >= self.size || to >= self.size {
            return;
        }
        self.cells[from * self.size + to] = Some(value);
    }

    /// Number of locations covered.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if every off-diagonal entry has been set.
    pub fn is_complete(&self) -> bool {
        (0..self.size)
            .all(|i| (0..self.size).all(|j| i == j || self.cells[i * self.size + j].is_some()))
    }
}

impl DistanceMatrix {
    /// Returns `true` if the matrix is symmetric within `tol`.
    #[cfg(test)]
    pub(crate) fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Nearest of `candidates` from `from`; the first candidate wins ties.
    ///
    /// Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor<I>(&self, from: usize, candidates: I) -> Option<usize>
    where
        I: IntoIterator<Item = usize>,
    {
        candidates
            .into_iter()
            .min_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)))
    }
}
