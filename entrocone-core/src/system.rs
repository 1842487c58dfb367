//! Ordered inequality systems over a shared column count.

use std::fmt;

use crate::bits::{int_log2, is_power_of_two};
use crate::error::{CoreError, Result};
use crate::vector::Vector;

/// A bare list of rows, the interchange format between tools.
pub type Matrix = Vec<Vector>;

/// An ordered collection of inequality rows `row(x) >= 0` sharing one
/// column count.
///
/// Equalities have no separate representation: adding an equality appends
/// the row and its negation, which lets elimination treat every row
/// uniformly. Row order is a property of the system; elimination is
/// deterministic given the order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct System {
    num_cols: usize,
    ineqs: Vec<Vector>,
}

impl System {
    /// Create an empty system with the given column count, reserving
    /// capacity for `expected_rows`.
    pub fn new(num_cols: usize, expected_rows: usize) -> Self {
        Self {
            num_cols,
            ineqs: Vec::with_capacity(expected_rows),
        }
    }

    /// Wrap a parsed matrix as a system, validating that every row shares
    /// one width.
    pub fn from_matrix(matrix: Matrix) -> Result<Self> {
        let num_cols = matrix_num_cols(&matrix)?;
        Ok(Self {
            num_cols,
            ineqs: matrix,
        })
    }

    /// Shared column count of all rows.
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.ineqs.len()
    }

    /// Whether the system has no rows.
    pub fn is_empty(&self) -> bool {
        self.ineqs.is_empty()
    }

    /// The rows in order.
    pub fn rows(&self) -> &[Vector] {
        &self.ineqs
    }

    /// Consume the system, returning its rows.
    pub fn into_rows(self) -> Matrix {
        self.ineqs
    }

    /// Append an inequality row. All-zero rows are silently dropped.
    pub fn add_inequality(&mut self, vector: Vector) {
        assert_eq!(
            vector.len(),
            self.num_cols,
            "row width must match the system"
        );
        if vector.is_zero() {
            return;
        }
        self.ineqs.push(vector);
    }

    /// Append an equality row as the pair `v >= 0`, `-v >= 0`. All-zero
    /// rows are silently dropped.
    pub fn add_equality(&mut self, vector: Vector) {
        assert_eq!(
            vector.len(),
            self.num_cols,
            "row width must match the system"
        );
        if vector.is_zero() {
            return;
        }
        let mut negated = vector.clone();
        negated.negate();
        self.ineqs.push(vector);
        self.ineqs.push(negated);
    }

    /// Remove and return the row at `index`, preserving the order of the
    /// remaining rows.
    pub fn remove_row(&mut self, index: usize) -> Vector {
        self.ineqs.remove(index)
    }

    /// Counts of rows with positive and negative coefficient at `col`.
    pub fn sign_counts(&self, col: usize) -> (usize, usize) {
        let mut pos = 0;
        let mut neg = 0;
        for row in &self.ineqs {
            let value = row.get(col);
            if value > 0 {
                pos += 1;
            } else if value < 0 {
                neg += 1;
            }
        }
        (pos, neg)
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.ineqs {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Shared width of the matrix rows.
///
/// Errors with [`CoreError::EmptyMatrix`] on an empty matrix and
/// [`CoreError::WidthMismatch`] when any row disagrees with the first.
pub fn matrix_num_cols(matrix: &Matrix) -> Result<usize> {
    let Some(first) = matrix.first() else {
        return Err(CoreError::EmptyMatrix);
    };
    let expected = first.len();
    for row in matrix {
        if row.len() != expected {
            return Err(CoreError::WidthMismatch {
                expected,
                got: row.len(),
            });
        }
    }
    Ok(expected)
}

/// Number of random variables of the entropy space a matrix lives in.
///
/// Requires the shared column count to be a power of two (the unused
/// padding column at index 0 plus `2^N - 1` entropy coordinates).
pub fn matrix_num_vars(matrix: &Matrix) -> Result<usize> {
    let num_cols = matrix_num_cols(matrix)?;
    if !is_power_of_two(num_cols) {
        return Err(CoreError::NotPowerOfTwo { num_cols });
    }
    Ok(int_log2(num_cols))
}
