//! Crate errors.

use thiserror::Error;

/// Matrix Error.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum MatrixError {
    /// The requested size is not positive.
    #[error("matrix size must be positive")]
    InvalidDimension,

    /// Random fill bounds are not a half-open interval.
    #[error("invalid range [{0}, {1}), min must be lower than max")]
    InvalidRange(i64, i64),

    /// The operands of a binary operation have different sizes.
    #[error("incompatible dimensions: {0}x{0} and {1}x{1}")]
    IncompatibleDimensions(usize, usize),

    /// Non-invertible, singular matrix.
    #[error("singular matrix can't be inverted")]
    NonInvertible,

    /// Error building matrix.
    #[error("error building matrix, given data has {0} entries which does not match size x size = {1}")]
    Build(usize, usize),

    /// A row of nested input has the wrong length.
    #[error("row {0} has {1} entries, expected {2}")]
    NotSquare(usize, usize, usize),

    /// Index not found error.
    #[error("index not found")]
    IndexNotFound,

    /// Integer overflow or underflow.
    #[error("integer overflow/underflow")]
    Overflow,
}
