//! Matrix Operations

use crate::{errors::MatrixError, matrix::SquareMatrix};
use std::ops::{Add, Mul};

/// The common size of two operands.
fn common_size(left: &SquareMatrix, right: &SquareMatrix) -> Result<usize, MatrixError> {
    if left.size() != right.size() {
        return Err(MatrixError::IncompatibleDimensions(left.size(), right.size()));
    }
    Ok(left.size())
}

impl Add for &SquareMatrix {
    type Output = Result<SquareMatrix, MatrixError>;

    /// Elementwise sum, O(N^2).
    fn add(self, other: &SquareMatrix) -> Result<SquareMatrix, MatrixError> {
        let size = common_size(self, other)?;
        let data = self
            .data()
            .iter()
            .zip(other.data())
            .map(|(left, right)| left.checked_add(*right).ok_or(MatrixError::Overflow))
            .collect::<Result<Vec<_>, _>>()?;
        SquareMatrix::new(data, size)
    }
}

impl Add<&SquareMatrix> for SquareMatrix {
    type Output = Result<SquareMatrix, MatrixError>;

    fn add(self, other: &SquareMatrix) -> Result<SquareMatrix, MatrixError> {
        (&self).add(other)
    }
}

impl Add for SquareMatrix {
    type Output = Result<SquareMatrix, MatrixError>;

    fn add(self, other: SquareMatrix) -> Result<SquareMatrix, MatrixError> {
        (&self).add(&other)
    }
}

impl Mul for &SquareMatrix {
    type Output = Result<SquareMatrix, MatrixError>;

    /// Naive matrix multiplication, A: NxN * B: NxN -> C: NxN, O(N^3).
    fn mul(self, other: &SquareMatrix) -> Result<SquareMatrix, MatrixError> {
        let size = common_size(self, other)?;
        let mut out = SquareMatrix::zero(size)?;
        for row in 0..size {
            for col in 0..size {
                let mut sum = 0i64;
                for i in 0..size {
                    let left = *self.entry(row, i)?;
                    let right = *other.entry(i, col)?;
                    let product = left.checked_mul(right).ok_or(MatrixError::Overflow)?;
                    sum = sum.checked_add(product).ok_or(MatrixError::Overflow)?;
                }
                out.set(row, col, sum)?;
            }
        }
        Ok(out)
    }
}

impl Mul<&SquareMatrix> for SquareMatrix {
    type Output = Result<SquareMatrix, MatrixError>;

    fn mul(self, other: &SquareMatrix) -> Result<SquareMatrix, MatrixError> {
        (&self).mul(other)
    }
}

impl Mul for SquareMatrix {
    type Output = Result<SquareMatrix, MatrixError>;

    fn mul(self, other: SquareMatrix) -> Result<SquareMatrix, MatrixError> {
        (&self).mul(&other)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    fn make_matrix(n: usize, values: &[i64]) -> SquareMatrix {
        SquareMatrix::new(values.to_vec(), n).unwrap()
    }

    #[test]
    fn addition() {
        let left = make_matrix(2, &[1, 2, 3, 4]);
        let right = make_matrix(2, &[5, 6, 7, 8]);
        let result = (&left + &right).unwrap();
        assert_eq!(result, make_matrix(2, &[6, 8, 10, 12]));
        assert_eq!(left, make_matrix(2, &[1, 2, 3, 4]));
        assert_eq!(right, make_matrix(2, &[5, 6, 7, 8]));
    }

    #[test]
    fn multiplication() {
        let left = make_matrix(2, &[1, 2, 3, 4]);
        let right = make_matrix(2, &[5, 6, 7, 8]);
        let result = (left.clone() * &right).unwrap();
        assert_eq!(result, make_matrix(2, &[19, 22, 43, 50]));
        assert_eq!(left, make_matrix(2, &[1, 2, 3, 4]));
    }

    #[test]
    fn multiplication_3x3() {
        let left = make_matrix(3, &[1, 0, 2, -1, 3, 1, 0, 5, -2]);
        let right = make_matrix(3, &[2, 1, 0, 1, 0, 1, 4, -1, 3]);
        let result = (&left * &right).unwrap();
        let expected = make_matrix(3, &[10, -1, 6, 5, -2, 6, -3, 2, -1]);
        assert_eq!(result, expected);
    }

    #[test]
    fn multiply_by_itself() {
        let matrix = make_matrix(2, &[0, 1, 1, 0]);
        let result = (&matrix * &matrix).unwrap();
        assert_eq!(result, SquareMatrix::identity(2).unwrap());
    }

    #[test]
    fn owned_operands() {
        let left = make_matrix(2, &[1, 2, 3, 4]);
        let right = make_matrix(2, &[5, 6, 7, 8]);
        let sum = (left.clone() + right.clone()).unwrap();
        assert_eq!(sum, make_matrix(2, &[6, 8, 10, 12]));
        let product = (left.clone() * right.clone()).unwrap();
        assert_eq!(product, make_matrix(2, &[19, 22, 43, 50]));
        assert_eq!((left.clone() * &right).unwrap(), product);
        assert_eq!(make_matrix(1, &[1]) + left, Err(MatrixError::IncompatibleDimensions(1, 2)));
    }

    #[rstest]
    #[case::add(true)]
    #[case::mul(false)]
    fn incompatible(#[case] add: bool) {
        let left = SquareMatrix::zero(2).unwrap();
        let right = SquareMatrix::zero(3).unwrap();
        let result = if add { &left + &right } else { &left * &right };
        assert_eq!(result, Err(MatrixError::IncompatibleDimensions(2, 3)));
    }

    #[test]
    fn addition_overflow() {
        let left = make_matrix(1, &[i64::MAX]);
        let right = make_matrix(1, &[1]);
        assert_eq!(left + &right, Err(MatrixError::Overflow));
    }

    #[test]
    fn multiplication_overflow() {
        let matrix = make_matrix(1, &[i64::MAX]);
        assert_eq!(&matrix * &matrix, Err(MatrixError::Overflow));
    }
}
