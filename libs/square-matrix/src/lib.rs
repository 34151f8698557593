//! Square integer matrices with exact determinants and Gauss-Jordan inversion.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::iterator_step_by_zero,
    clippy::invalid_regex,
    clippy::string_slice,
    clippy::unimplemented,
    clippy::todo
)]
#![allow(clippy::module_inception)]

pub mod errors;
pub mod matrix;

pub use errors::MatrixError;
pub use matrix::{RealMatrix, SquareMatrix};
