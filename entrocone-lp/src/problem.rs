//! The redundancy oracle.
//!
//! A [`Problem`] holds the rows of a homogeneous system in insertion order
//! and answers whether a further inequality is implied by them. Rows can be
//! deleted (and re-added) through the handle returned on insertion, which
//! is what the minimization pass needs to probe each row against the rest.

use entrocone_core::{System, Vector};
use num_rational::BigRational;

use crate::error::Result;
use crate::simplex::{MultiplierRow, MultiplierSolver, SimplexStatus};

/// Stable reference to a row added to a [`Problem`].
///
/// Handles are never reused: deleting a row retires its slot and re-adding
/// the row yields a fresh handle at the end of the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHandle(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Inequality,
    Equality,
}

#[derive(Debug, Clone)]
struct LpRow {
    kind: RowKind,
    coeffs: Vec<i64>,
}

/// A standard-form minimization problem over the cone of the added rows:
/// each inequality row contributes `row·x >= 0`, each equality row
/// `row·x = 0`, with all primal variables unconstrained.
///
/// Column 0 of every vector is the conventionally unused padding column and
/// is ignored by the oracle.
#[derive(Debug, Clone)]
pub struct Problem {
    num_cols: usize,
    rows: Vec<Option<LpRow>>,
}

impl Problem {
    /// Create an oracle over `num_cols` columns (column 0 unused). With a
    /// single column there are no real coordinates left and everything is
    /// trivially implied.
    pub fn new(num_cols: usize) -> Self {
        assert!(num_cols >= 1, "an oracle needs the padding column");
        Self {
            num_cols,
            rows: Vec::new(),
        }
    }

    /// Build an oracle whose row order matches the system's row order.
    pub fn from_system(system: &System) -> Self {
        let mut problem = Self::new(system.num_cols());
        for row in system.rows() {
            problem.add_inequality(row);
        }
        problem
    }

    /// Column count, including the unused padding column.
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Number of live (non-deleted) rows.
    pub fn num_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.is_some()).count()
    }

    fn push(&mut self, kind: RowKind, vector: &Vector) -> RowHandle {
        assert_eq!(
            vector.len(),
            self.num_cols,
            "row width must match the oracle"
        );
        let handle = RowHandle(self.rows.len());
        self.rows.push(Some(LpRow {
            kind,
            coeffs: vector.as_slice().to_vec(),
        }));
        handle
    }

    /// Append `row·x >= 0`.
    pub fn add_inequality(&mut self, vector: &Vector) -> RowHandle {
        self.push(RowKind::Inequality, vector)
    }

    /// Append `row·x = 0`.
    pub fn add_equality(&mut self, vector: &Vector) -> RowHandle {
        self.push(RowKind::Equality, vector)
    }

    /// Delete the row behind `handle`. Deleting twice is a programmer
    /// error.
    pub fn del_row(&mut self, handle: RowHandle) {
        let slot = self
            .rows
            .get_mut(handle.0)
            .expect("row handle out of range");
        assert!(slot.is_some(), "row was already deleted");
        *slot = None;
    }

    fn live_rows(&self) -> Vec<MultiplierRow<'_>> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(slot, row)| {
                row.as_ref().map(|row| MultiplierRow {
                    slot,
                    free: row.kind == RowKind::Equality,
                    coeffs: &row.coeffs,
                })
            })
            .collect()
    }

    /// Whether `vector·x >= 0` is implied by the current rows.
    ///
    /// Implied means `min { vector·x : rows }` is bounded (at zero), i.e.
    /// the simplex reports an optimum; an unbounded objective means the
    /// inequality cuts the cone and must be kept.
    pub fn is_redundant(&self, vector: &Vector) -> Result<bool> {
        assert_eq!(
            vector.len(),
            self.num_cols,
            "objective width must match the oracle"
        );
        let rows = self.live_rows();
        let mut solver = MultiplierSolver::new(self.num_cols, &rows, vector.as_slice());
        Ok(solver.solve()? == SimplexStatus::Optimal)
    }

    /// Row multipliers certifying an implied inequality.
    ///
    /// Returns one value per row slot ever added (zero for deleted rows),
    /// or `None` when the inequality is not implied. The combination
    /// `Σ y_i·row_i` over the returned values reproduces `vector`.
    pub fn dual(&self, vector: &Vector) -> Result<Option<Vec<BigRational>>> {
        assert_eq!(
            vector.len(),
            self.num_cols,
            "objective width must match the oracle"
        );
        let rows = self.live_rows();
        let mut solver = MultiplierSolver::new(self.num_cols, &rows, vector.as_slice());
        Ok(match solver.solve()? {
            SimplexStatus::Optimal => Some(solver.multipliers(self.rows.len())),
            SimplexStatus::Unbounded => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use num_traits::Zero;

    fn vec3(values: [i64; 3]) -> Vector {
        Vector::from(values.to_vec())
    }

    #[test]
    fn sum_of_two_rows_is_redundant() {
        let mut lp = Problem::new(3);
        let h0 = lp.add_inequality(&vec3([0, 1, 0]));
        lp.add_inequality(&vec3([0, 0, 1]));
        let third = lp.add_inequality(&vec3([0, 1, 1]));

        assert!(lp.is_redundant(&vec3([0, 1, 1])).unwrap());

        // still implied after removing the literal copy
        lp.del_row(third);
        assert!(lp.is_redundant(&vec3([0, 1, 1])).unwrap());

        // and not once a needed generator is gone
        lp.del_row(h0);
        assert!(!lp.is_redundant(&vec3([0, 1, 1])).unwrap());
    }

    #[test]
    fn opposite_direction_is_not_redundant() {
        let mut lp = Problem::new(3);
        lp.add_inequality(&vec3([0, 1, 0]));
        lp.add_inequality(&vec3([0, 0, 1]));
        assert!(!lp.is_redundant(&vec3([0, -1, 0])).unwrap());
    }

    #[test]
    fn equality_rows_imply_both_signs() {
        let mut lp = Problem::new(3);
        lp.add_equality(&vec3([0, 1, -1]));
        assert!(lp.is_redundant(&vec3([0, 1, -1])).unwrap());
        assert!(lp.is_redundant(&vec3([0, -1, 1])).unwrap());
        assert!(!lp.is_redundant(&vec3([0, 1, 0])).unwrap());
    }

    #[test]
    fn deleted_then_readded_rows_count_again() {
        let mut lp = Problem::new(3);
        let h = lp.add_inequality(&vec3([0, 1, 0]));
        lp.del_row(h);
        assert!(!lp.is_redundant(&vec3([0, 1, 0])).unwrap());
        lp.add_inequality(&vec3([0, 1, 0]));
        assert!(lp.is_redundant(&vec3([0, 1, 0])).unwrap());
    }

    #[test]
    fn dual_returns_the_combination_weights() {
        let mut lp = Problem::new(3);
        lp.add_inequality(&vec3([0, 1, 0]));
        lp.add_inequality(&vec3([0, 0, 1]));

        let duals = lp.dual(&vec3([0, 2, 3])).unwrap().unwrap();
        assert_eq!(duals.len(), 2);
        assert_eq!(duals[0], BigRational::from_integer(BigInt::from(2)));
        assert_eq!(duals[1], BigRational::from_integer(BigInt::from(3)));

        assert!(lp.dual(&vec3([0, -1, 0])).unwrap().is_none());
    }

    #[test]
    fn dual_reports_zero_for_deleted_slots() {
        let mut lp = Problem::new(3);
        let h = lp.add_inequality(&vec3([0, 1, 1]));
        lp.add_inequality(&vec3([0, 1, 0]));
        lp.del_row(h);
        let duals = lp.dual(&vec3([0, 1, 0])).unwrap().unwrap();
        assert_eq!(duals.len(), 2);
        assert!(duals[0].is_zero());
    }

    #[test]
    fn zero_vector_is_always_redundant() {
        let lp = Problem::new(4);
        assert!(lp.is_redundant(&Vector::new(4)).unwrap());
    }

    #[test]
    fn from_system_preserves_row_order() {
        let mut system = System::new(3, 2);
        system.add_inequality(vec3([0, 1, 0]));
        system.add_equality(vec3([0, 0, 1]));
        let lp = Problem::from_system(&system);
        assert_eq!(lp.num_rows(), 3);
        // equality pairs arrive as two inequalities; both signs implied
        assert!(lp.is_redundant(&vec3([0, 0, -1])).unwrap());
    }
}
