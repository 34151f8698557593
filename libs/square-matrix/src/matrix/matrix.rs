//! Square Matrix.

use crate::errors::MatrixError;
use rand::Rng;
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

/// Square matrix of integers, stored row-major.
///
/// Every value owns its entries: cloning copies the whole grid and the arithmetic operators always
/// allocate a new result, so two matrices never share storage.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Vec<i64>>", into = "Vec<Vec<i64>>"))]
pub struct SquareMatrix {
    /// Entries.
    data: Vec<i64>,

    /// Number of rows and columns.
    size: usize,
}

impl SquareMatrix {
    /// New matrix from row-major data.
    pub fn new(data: Vec<i64>, size: usize) -> Result<SquareMatrix, MatrixError> {
        let n = grid_len(size)?;
        if n != data.len() {
            return Err(MatrixError::Build(data.len(), n));
        }
        Ok(SquareMatrix { data, size })
    }

    /// Zero matrix.
    pub fn zero(size: usize) -> Result<SquareMatrix, MatrixError> {
        let data = vec![0; grid_len(size)?];
        Ok(SquareMatrix { data, size })
    }

    /// Identity matrix.
    pub fn identity(size: usize) -> Result<SquareMatrix, MatrixError> {
        let mut m = SquareMatrix::zero(size)?;
        for i in 0..size {
            m.set(i, i, 1)?;
        }
        Ok(m)
    }

    /// Generates a matrix with entries drawn uniformly from `[min, max)`.
    pub fn gen_random(size: usize, min: i64, max: i64) -> Result<SquareMatrix, MatrixError> {
        let mut rng = rand::thread_rng();
        Self::gen_random_with_rng(&mut rng, size, min, max)
    }

    /// Generates a random matrix using the provided RNG.
    pub fn gen_random_with_rng<R: Rng + ?Sized>(
        rng: &mut R,
        size: usize,
        min: i64,
        max: i64,
    ) -> Result<SquareMatrix, MatrixError> {
        let n = grid_len(size)?;
        if min >= max {
            return Err(MatrixError::InvalidRange(min, max));
        }
        let data = (0..n).map(|_| rng.gen_range(min..max)).collect();
        Ok(SquareMatrix { data, size })
    }

    /// Returns the reference to data.
    pub fn data(&self) -> &[i64] {
        &self.data
    }

    /// Returns the data as a Vec consuming the matrix.
    pub fn to_vec(self) -> Vec<i64> {
        self.data
    }

    /// Number of rows, which is also the number of columns.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the matrix entry `M[row,col]`.
    pub fn entry(&self, row: usize, col: usize) -> Result<&i64, MatrixError> {
        let index = self.index(row, col)?;
        self.data.get(index).ok_or(MatrixError::IndexNotFound)
    }

    /// Get the matrix entry `M[row,col]`.
    pub fn entry_mut(&mut self, row: usize, col: usize) -> Result<&mut i64, MatrixError> {
        let index = self.index(row, col)?;
        self.data.get_mut(index).ok_or(MatrixError::IndexNotFound)
    }

    /// Set the matrix entry `M[row,col]`.
    pub fn set(&mut self, row: usize, col: usize, value: i64) -> Result<(), MatrixError> {
        *self.entry_mut(row, col)? = value;
        Ok(())
    }

    /// The entries of a row.
    pub fn row(&self, row: usize) -> Result<&[i64], MatrixError> {
        self.rows().nth(row).ok_or(MatrixError::IndexNotFound)
    }

    /// Iterates over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[i64]> {
        self.data.chunks_exact(self.size)
    }

    /// Polynomial hash of the entries in row-major order.
    ///
    /// Equal matrices have equal hash codes. Matrices of different size may collide.
    pub fn hash_code(&self) -> i64 {
        self.data.iter().fold(17i64, |hash, entry| hash.wrapping_mul(31).wrapping_add(*entry))
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, MatrixError> {
        if row >= self.size || col >= self.size {
            return Err(MatrixError::IndexNotFound);
        }
        row.checked_mul(self.size).and_then(|start| start.checked_add(col)).ok_or(MatrixError::Overflow)
    }
}

/// Number of entries in a `size x size` grid.
pub(crate) fn grid_len(size: usize) -> Result<usize, MatrixError> {
    if size == 0 {
        return Err(MatrixError::InvalidDimension);
    }
    size.checked_mul(size).ok_or(MatrixError::Overflow)
}

/// Writes a row-major grid one row per line, entries separated by a space.
pub(crate) fn write_grid<T: fmt::Display>(f: &mut fmt::Formatter<'_>, data: &[T], size: usize) -> fmt::Result {
    for (i, row) in data.chunks(size.max(1)).enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        for (j, entry) in row.iter().enumerate() {
            if j > 0 {
                write!(f, " ")?;
            }
            write!(f, "{entry}")?;
        }
    }
    Ok(())
}

impl TryFrom<Vec<Vec<i64>>> for SquareMatrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self, Self::Error> {
        let size = rows.len();
        let mut data = Vec::with_capacity(grid_len(size)?);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(MatrixError::NotSquare(index, row.len(), size));
            }
            data.extend(row);
        }
        Ok(SquareMatrix { data, size })
    }
}

impl From<SquareMatrix> for Vec<Vec<i64>> {
    fn from(matrix: SquareMatrix) -> Self {
        matrix.rows().map(<[i64]>::to_vec).collect()
    }
}

impl PartialOrd for SquareMatrix {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SquareMatrix {
    /// Smaller matrices come first; equal sizes compare entries in row-major order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.size.cmp(&other.size).then_with(|| {
            self.data
                .iter()
                .zip(other.data.iter())
                .map(|(left, right)| left.cmp(right))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        })
    }
}

impl Hash for SquareMatrix {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i64(self.hash_code());
    }
}

impl fmt::Display for SquareMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, &self.data, self.size)
    }
}
