//! Floating-point square matrix.

use crate::{
    errors::MatrixError,
    matrix::{
        matrix::{grid_len, write_grid},
        SquareMatrix,
    },
};
use std::{fmt, ops::Mul};

/// Entries this close to an integer are rounded to it by [`RealMatrix::truncate`].
pub const INTEGER_TOLERANCE: f64 = 1e-9;

/// Square matrix of `f64`, stored row-major.
///
/// This is what [`SquareMatrix::real_inverse`] produces. Going back to integers is the explicit
/// [`RealMatrix::truncate`] step.
#[derive(Clone, Debug, PartialEq)]
pub struct RealMatrix {
    /// Entries.
    data: Vec<f64>,

    /// Number of rows and columns.
    size: usize,
}

impl RealMatrix {
    /// New matrix from row-major data.
    pub fn new(data: Vec<f64>, size: usize) -> Result<RealMatrix, MatrixError> {
        let n = grid_len(size)?;
        if n != data.len() {
            return Err(MatrixError::Build(data.len(), n));
        }
        Ok(RealMatrix { data, size })
    }

    /// Returns the reference to data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Number of rows, which is also the number of columns.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the matrix entry `M[row,col]`.
    pub fn entry(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        if row >= self.size || col >= self.size {
            return Err(MatrixError::IndexNotFound);
        }
        let row = self.data.chunks_exact(self.size).nth(row).ok_or(MatrixError::IndexNotFound)?;
        row.get(col).copied().ok_or(MatrixError::IndexNotFound)
    }

    /// Whether both matrices have the same size and every pair of entries differs by at most
    /// `tolerance`.
    pub fn approx_eq(&self, other: &RealMatrix, tolerance: f64) -> bool {
        self.size == other.size
            && self.data.iter().zip(other.data.iter()).all(|(left, right)| (left - right).abs() <= tolerance)
    }

    /// Converts to integers, truncating every entry toward zero.
    ///
    /// Entries within [`INTEGER_TOLERANCE`] of an integer are first snapped to it, so elimination
    /// roundoff such as `6.999999999999997` gives `7`. Other fractional parts are discarded, so
    /// `0.5` and `-0.5` both become `0`. Entries that are not finite or do not fit in an `i64`
    /// fail with [`MatrixError::Overflow`].
    pub fn truncate(&self) -> Result<SquareMatrix, MatrixError> {
        let data = self.data.iter().map(|entry| truncate_entry(*entry)).collect::<Result<Vec<_>, _>>()?;
        SquareMatrix::new(data, self.size)
    }
}

// i64::MIN is exactly representable, i64::MAX rounds up to 2^63.
fn truncate_entry(entry: f64) -> Result<i64, MatrixError> {
    let nearest = entry.round();
    let truncated = if (entry - nearest).abs() <= INTEGER_TOLERANCE { nearest } else { entry.trunc() };
    if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(MatrixError::Overflow);
    }
    Ok(truncated as i64)
}

impl From<&SquareMatrix> for RealMatrix {
    fn from(matrix: &SquareMatrix) -> Self {
        let data = matrix.data().iter().map(|entry| *entry as f64).collect();
        RealMatrix { data, size: matrix.size() }
    }
}

impl Mul for &RealMatrix {
    type Output = Result<RealMatrix, MatrixError>;

    /// Naive matrix multiplication, O(N^3).
    fn mul(self, other: &RealMatrix) -> Result<RealMatrix, MatrixError> {
        if self.size != other.size {
            return Err(MatrixError::IncompatibleDimensions(self.size, other.size));
        }
        let mut data = Vec::with_capacity(self.data.len());
        for row in 0..self.size {
            for col in 0..self.size {
                let mut sum = 0.0;
                for i in 0..self.size {
                    sum += self.entry(row, i)? * other.entry(i, col)?;
                }
                data.push(sum);
            }
        }
        RealMatrix::new(data, self.size)
    }
}

impl fmt::Display for RealMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, &self.data, self.size)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.5, 0)]
    #[case(-0.5, 0)]
    #[case(1.9999, 1)]
    #[case(0.9999999999999996, 1)]
    #[case(6.999999999999997, 7)]
    #[case(-2.9999999999999987, -3)]
    #[case(-1e-15, 0)]
    #[case(-2.75, -2)]
    #[case(3.0, 3)]
    fn truncation(#[case] value: f64, #[case] expected: i64) {
        let matrix = RealMatrix::new(vec![value], 1).unwrap();
        assert_eq!(matrix.truncate().unwrap().data(), &[expected]);
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(1e19)]
    #[case(-1e19)]
    fn truncation_out_of_range(#[case] value: f64) {
        let matrix = RealMatrix::new(vec![value], 1).unwrap();
        assert_eq!(matrix.truncate(), Err(MatrixError::Overflow));
    }

    #[test]
    fn from_integers() {
        let matrix = SquareMatrix::new(vec![1, -2, 3, 4], 2).unwrap();
        let real = RealMatrix::from(&matrix);
        assert_eq!(real.data(), &[1.0, -2.0, 3.0, 4.0]);
        assert_eq!(real.truncate().unwrap(), matrix);
    }

    #[test]
    fn approx_eq() {
        let left = RealMatrix::new(vec![1.0, 0.0, 0.0, 1.0], 2).unwrap();
        let right = RealMatrix::new(vec![1.0 + 1e-12, 0.0, -1e-12, 1.0], 2).unwrap();
        assert!(left.approx_eq(&right, 1e-9));
        assert!(!left.approx_eq(&right, 0.0));
        let other_size = RealMatrix::new(vec![1.0], 1).unwrap();
        assert!(!left.approx_eq(&other_size, 1.0));
    }

    #[test]
    fn multiplication() {
        let left = RealMatrix::new(vec![0.5, 0.0, 0.0, 0.5], 2).unwrap();
        let right = RealMatrix::new(vec![2.0, 0.0, 0.0, 2.0], 2).unwrap();
        let result = (&left * &right).unwrap();
        assert_eq!(result.data(), &[1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn display() {
        let matrix = RealMatrix::new(vec![0.5, 0.0, -1.25, 2.0], 2).unwrap();
        assert_eq!(matrix.to_string(), "0.5 0\n-1.25 2");
    }
}
