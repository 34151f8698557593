//! Matrix inversion.

use crate::{
    errors::MatrixError,
    matrix::{RealMatrix, SquareMatrix},
};
use tracing::{debug, trace};

/// Entries with an absolute value at or below this are not used as pivots.
pub const PIVOT_EPSILON: f64 = 1e-10;

/// The `[A | I]` working matrix of a Gauss-Jordan elimination, `size x 2*size`.
struct AugmentedMatrix {
    data: Vec<f64>,
    size: usize,
}

impl AugmentedMatrix {
    fn new(matrix: &SquareMatrix) -> Self {
        let size = matrix.size();
        let mut data = Vec::with_capacity(matrix.data().len().saturating_mul(2));
        for (i, row) in matrix.rows().enumerate() {
            data.extend(row.iter().map(|entry| *entry as f64));
            data.extend((0..size).map(|j| if i == j { 1.0 } else { 0.0 }));
        }
        AugmentedMatrix { data, size }
    }

    fn width(&self) -> usize {
        self.size * 2
    }

    fn entry(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        let entries = self.data.chunks_exact(self.width()).nth(row).ok_or(MatrixError::IndexNotFound)?;
        entries.get(col).copied().ok_or(MatrixError::IndexNotFound)
    }

    fn row_mut(&mut self, row: usize) -> Result<&mut [f64], MatrixError> {
        let width = self.width();
        self.data.chunks_exact_mut(width).nth(row).ok_or(MatrixError::IndexNotFound)
    }

    /// Two distinct rows, borrowed mutably at the same time.
    fn row_pair_mut(&mut self, first: usize, second: usize) -> Result<(&mut [f64], &mut [f64]), MatrixError> {
        if first == second || first >= self.size || second >= self.size {
            return Err(MatrixError::IndexNotFound);
        }
        let width = self.width();
        let (low, high) = if first < second { (first, second) } else { (second, first) };
        let (head, tail) = self.data.split_at_mut(high * width);
        let low_row = head.chunks_exact_mut(width).nth(low).ok_or(MatrixError::IndexNotFound)?;
        let high_row = tail.get_mut(..width).ok_or(MatrixError::IndexNotFound)?;
        if first < second {
            Ok((low_row, high_row))
        } else {
            Ok((high_row, low_row))
        }
    }

    /// First row at or below `column` with a usable entry in that column.
    fn find_pivot(&self, column: usize) -> Result<Option<usize>, MatrixError> {
        for row in column..self.size {
            if self.entry(row, column)?.abs() > PIVOT_EPSILON {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    /// Swaps two whole rows, both halves.
    fn swap_rows(&mut self, first: usize, second: usize) -> Result<(), MatrixError> {
        let (first, second) = self.row_pair_mut(first, second)?;
        first.swap_with_slice(second);
        Ok(())
    }

    /// Divides the pivot row by its diagonal entry. Columns left of the pivot are already zero.
    fn normalize(&mut self, pivot: usize) -> Result<(), MatrixError> {
        let factor = self.entry(pivot, pivot)?;
        for entry in self.row_mut(pivot)?.iter_mut().skip(pivot) {
            *entry /= factor;
        }
        Ok(())
    }

    /// Subtracts the multiple of the (normalized) pivot row that zeroes `target` in the pivot column.
    fn eliminate(&mut self, target: usize, pivot: usize) -> Result<(), MatrixError> {
        let (target_row, pivot_row) = self.row_pair_mut(target, pivot)?;
        let factor = target_row.get(pivot).copied().ok_or(MatrixError::IndexNotFound)?;
        if factor == 0.0 {
            return Ok(());
        }
        for (entry, pivot_entry) in target_row.iter_mut().zip(pivot_row.iter()).skip(pivot) {
            *entry -= factor * pivot_entry;
        }
        Ok(())
    }

    /// The right half, which holds the inverse once the left half is the identity.
    fn into_inverse(self) -> Result<RealMatrix, MatrixError> {
        let size = self.size;
        // Adding zero turns negative zeros into positive ones.
        let data =
            self.data.chunks_exact(self.width()).flat_map(|row| row.iter().skip(size).map(|v| v + 0.0)).collect();
        RealMatrix::new(data, size)
    }
}

impl SquareMatrix {
    /// Inverse using Gauss-Jordan elimination with partial pivoting, O(N^3).
    ///
    /// When a diagonal entry is zero, the first row below it with a non-zero entry in that column
    /// is swapped in. If there is none the matrix is singular and [`MatrixError::NonInvertible`] is
    /// returned.
    pub fn real_inverse(&self) -> Result<RealMatrix, MatrixError> {
        let size = self.size();
        debug!(size, "inverting matrix");
        let mut augmented = AugmentedMatrix::new(self);

        for pivot in 0..size {
            let Some(candidate) = augmented.find_pivot(pivot)? else {
                debug!(column = pivot, "no pivot found, matrix is singular");
                return Err(MatrixError::NonInvertible);
            };
            if candidate != pivot {
                trace!(pivot, candidate, "swapping rows");
                augmented.swap_rows(pivot, candidate)?;
            }
            augmented.normalize(pivot)?;
            for row in pivot + 1..size {
                augmented.eliminate(row, pivot)?;
            }
        }

        for pivot in (0..size).rev() {
            for row in 0..pivot {
                augmented.eliminate(row, pivot)?;
            }
        }

        augmented.into_inverse()
    }

    /// Integer inverse, see [`SquareMatrix::real_inverse`].
    ///
    /// The entries go through [`RealMatrix::truncate`]: roundoff within
    /// [`INTEGER_TOLERANCE`](crate::matrix::real::INTEGER_TOLERANCE) of an integer is snapped to
    /// it, and real fractions are truncated toward zero. So a unimodular matrix gets its exact
    /// integer inverse, while the inverse of `[[2, 0], [0, 2]]` comes out as the zero matrix.
    pub fn inverse(&self) -> Result<SquareMatrix, MatrixError> {
        self.real_inverse()?.truncate()
    }
}
