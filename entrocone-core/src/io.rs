//! Line-oriented textual matrix format.
//!
//! Every non-empty, non-comment line is one row: `[` followed by
//! whitespace-separated integers followed by `]`. A `#` starts a comment to
//! end of line; blank lines are skipped. All rows in one input must share a
//! width. The conventionally unused leading column is preserved on both
//! consumption and emission.

use std::io::{self, BufRead, Write};

use crate::error::{CoreError, Result};
use crate::system::{Matrix, matrix_num_cols};
use crate::vector::Vector;

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse a single `[ … ]` row.
pub fn parse_vector(line: &str) -> Result<Vector> {
    let line = line.trim();
    let Some(inner) = line.strip_prefix('[') else {
        return Err(CoreError::Parse {
            message: "expecting '['",
            line: line.to_string(),
        });
    };
    let Some(inner) = inner.strip_suffix(']') else {
        return Err(CoreError::Parse {
            message: "expecting ']'",
            line: line.to_string(),
        });
    };
    let mut values = Vec::new();
    for token in inner.split_whitespace() {
        let value: i64 = token.parse().map_err(|_| CoreError::Parse {
            message: "expecting an integer token",
            line: line.to_string(),
        })?;
        values.push(value);
    }
    Ok(Vector::from(values))
}

/// Parse a whole matrix from pre-split lines, enforcing a shared width.
pub fn parse_lines<I, S>(lines: I) -> Result<Matrix>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut matrix = Matrix::new();
    for line in lines {
        let line = strip_comment(line.as_ref());
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        matrix.push(parse_vector(line)?);
    }
    if !matrix.is_empty() {
        matrix_num_cols(&matrix)?;
    }
    Ok(matrix)
}

/// Parse a matrix from a buffered reader (a file or stdin).
pub fn parse_matrix<R: BufRead>(reader: R) -> Result<Matrix> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|err| CoreError::Parse {
            message: "read failure",
            line: err.to_string(),
        })?;
        lines.push(line);
    }
    parse_lines(lines)
}

/// Parse a matrix from an in-memory string.
pub fn parse_str(input: &str) -> Result<Matrix> {
    parse_lines(input.lines())
}

/// Emit a matrix, one bracketed row per line.
pub fn write_matrix<W: Write>(writer: &mut W, matrix: &Matrix) -> io::Result<()> {
    for row in matrix {
        writeln!(writer, "{row}")?;
    }
    Ok(())
}
