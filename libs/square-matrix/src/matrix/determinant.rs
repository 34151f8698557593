//! Determinant by cofactor expansion.

use crate::{errors::MatrixError, matrix::SquareMatrix};

impl SquareMatrix {
    /// The `(N-1)x(N-1)` submatrix obtained by deleting `row` and `col`.
    pub fn minor(&self, row: usize, col: usize) -> Result<SquareMatrix, MatrixError> {
        let size = self.size();
        if size == 1 {
            return Err(MatrixError::InvalidDimension);
        }
        if row >= size || col >= size {
            return Err(MatrixError::IndexNotFound);
        }
        let data = self
            .rows()
            .enumerate()
            .filter(|(i, _)| *i != row)
            .flat_map(|(_, entries)| {
                entries.iter().enumerate().filter(move |(j, _)| *j != col).map(|(_, entry)| *entry)
            })
            .collect();
        SquareMatrix::new(data, size - 1)
    }

    /// Matrix determinant using Laplace expansion along the first row, O(N!).
    ///
    /// The result is exact. Only intended for the small sizes this crate targets; the running
    /// time grows factorially with the size and no cap is enforced.
    pub fn determinant(&self) -> Result<i64, MatrixError> {
        if self.size() == 1 {
            return self.entry(0, 0).copied();
        }
        let mut determinant = 0i64;
        let mut sign = 1i64;
        for (col, entry) in self.row(0)?.iter().enumerate() {
            let cofactor = self.minor(0, col)?.determinant()?;
            let term = sign
                .checked_mul(*entry)
                .and_then(|signed| signed.checked_mul(cofactor))
                .ok_or(MatrixError::Overflow)?;
            determinant = determinant.checked_add(term).ok_or(MatrixError::Overflow)?;
            sign = -sign;
        }
        Ok(determinant)
    }
}
