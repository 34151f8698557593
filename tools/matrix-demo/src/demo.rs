//! The demo run over two matrices.

use square_matrix::{MatrixError, SquareMatrix};
use std::{fmt::Display, io::Write};
use tracing::debug;

/// Writes a titled block, or the error that prevented computing it.
fn section<W, T>(out: &mut W, title: &str, value: Result<T, MatrixError>) -> std::io::Result<()>
where
    W: Write,
    T: Display,
{
    match value {
        Ok(value) => writeln!(out, "{title}:\n{value}\n"),
        Err(e) => {
            debug!("{title} failed: {e}");
            writeln!(out, "{title}: {e}\n")
        }
    }
}

/// Prints both matrices and every operation on them.
pub fn run<W: Write>(left: &SquareMatrix, right: &SquareMatrix, out: &mut W) -> std::io::Result<()> {
    section(out, "First matrix", Ok(left))?;
    section(out, "Second matrix", Ok(right))?;
    section(out, "Sum", left + right)?;
    section(out, "Product", left * right)?;
    section(out, "Inverse of first matrix", left.inverse())?;
    section(out, "Exact inverse of first matrix", left.real_inverse())?;
    section(out, "Inverse of second matrix", right.inverse())?;
    section(out, "Exact inverse of second matrix", right.real_inverse())?;

    writeln!(out, "Matrices are equal: {}", left == right)?;
    writeln!(out, "First matrix is less than second: {}", left < right)?;
    writeln!(out, "First matrix is greater than second: {}", left > right)?;
    writeln!(out, "First matrix is less than or equal to second: {}", left <= right)?;
    writeln!(out, "First matrix is greater than or equal to second: {}\n", left >= right)?;

    section(out, "Determinant of first matrix", left.determinant())?;
    section(out, "Determinant of second matrix", right.determinant())?;
    Ok(())
}
