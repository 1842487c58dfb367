//! Error kinds for parsing and shape validation.

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while reading or validating inequality matrices.
///
/// Size mismatches on binary vector operations and elimination on a zero
/// pivot coefficient are programmer errors and panic instead; only
/// conditions a caller can recover from are represented here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Malformed textual matrix input.
    #[error("parse error: {message}: {line:?}")]
    Parse {
        /// What was wrong with the line.
        message: &'static str,
        /// The offending input line (comment stripped, trimmed).
        line: String,
    },

    /// A row's width differs from the rest of the matrix.
    #[error("size error: expected {expected} columns, got {got}")]
    WidthMismatch {
        /// Column count established by the first row.
        expected: usize,
        /// Column count of the offending row.
        got: usize,
    },

    /// The column count does not define an entropy space.
    #[error("size error: {num_cols} columns is not a power of two")]
    NotPowerOfTwo {
        /// The rejected column count.
        num_cols: usize,
    },

    /// The matrix has no rows, so its shape is undefined.
    #[error("size error: matrix is empty")]
    EmptyMatrix,
}
