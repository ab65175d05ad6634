//! Human-readable matrix dumps.

use simplemat_core::{DenseMatrix, Element};
use std::io::Write;

/// Writes a dimension header followed by one line per row.
///
/// Values use scientific notation with `precision` fractional digits and
/// are right-aligned in equal-width columns, so identical input always
/// renders identically.
pub fn print<T, W>(out: &mut W, a: &DenseMatrix<T>, precision: usize) -> std::io::Result<()>
where
    T: Element,
    W: Write + ?Sized,
{
    writeln!(
        out,
        "Type = {} , rows = {} , cols = {}",
        a.matrix_type(),
        a.rows(),
        a.cols()
    )?;

    // sign, leading digit, point, 'e', sign and up to three exponent digits
    let width = precision + 8;
    for i in 0..a.rows() {
        let mut line = String::with_capacity(a.cols() * (width + 1));
        for (j, v) in a.row(i).iter().enumerate() {
            if j > 0 {
                line.push(' ');
            }
            line.push_str(&format!("{v:>width$.precision$e}"));
        }
        writeln!(out, "{line}")?;
    }
    Ok(())
}
