//! Matrix operations.

pub mod determinant;
pub mod inverse;
pub mod matrix;
pub mod ops;
pub mod real;

pub use inverse::PIVOT_EPSILON;
pub use matrix::SquareMatrix;
pub use real::{RealMatrix, INTEGER_TOLERANCE};
