//! System comparison and verification utilities.
//!
//! These build directly on the redundancy oracle: implication diffs
//! between two systems, consistency checks for a finished elimination run,
//! filtering of rows already implied by the elemental inequalities, and
//! the cyclic shift symmetry expected of periodic two-layer networks.

use entrocone_core::{Matrix, Vector, matrix_num_cols, matrix_num_vars, shannon};
use entrocone_lp::Problem;
use rustc_hash::FxHashMap;

use crate::error::Result;

fn problem_over(rows: &Matrix, num_cols: usize) -> Problem {
    let mut lp = Problem::new(num_cols);
    for row in rows {
        lp.add_inequality(row);
    }
    lp
}

/// Rows of `b` that `a` does not imply.
///
/// Both matrices must live in the same entropy space; one of them may be
/// empty (an empty `a` implies nothing, an empty `b` leaves nothing to
/// check).
pub fn unimplied(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if b.is_empty() {
        return Ok(Matrix::new());
    }
    let num_vars_b = matrix_num_vars(b)?;
    if !a.is_empty() {
        let num_vars_a = matrix_num_vars(a)?;
        if num_vars_a != num_vars_b {
            return Err(entrocone_core::CoreError::WidthMismatch {
                expected: 1 << num_vars_a,
                got: 1 << num_vars_b,
            }
            .into());
        }
    }
    let lp = problem_over(a, 1 << num_vars_b);
    let mut missing = Matrix::new();
    for row in b {
        if !lp.is_redundant(row)? {
            missing.push(row.clone());
        }
    }
    Ok(missing)
}

/// Outcome of [`verify_elimination`].
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    /// Surviving rows that the original system does not imply: the
    /// elimination fabricated a constraint.
    pub false_positives: Matrix,
    /// Elemental inequalities of the reduced space that the survivors do
    /// not imply: the elimination lost part of the projection.
    pub undiscovered: Matrix,
}

impl VerifyReport {
    /// Whether both checks passed.
    pub fn is_consistent(&self) -> bool {
        self.false_positives.is_empty() && self.undiscovered.is_empty()
    }
}

/// Consistency-check a finished elimination run.
///
/// Every surviving row, zero-padded back into the original column space,
/// must be implied by the original system; and every elemental inequality
/// of the reduced space must be implied by the survivors (the projection
/// of an entropy cone stays inside the reduced Shannon cone).
pub fn verify_elimination(original: &Matrix, reduced: &Matrix) -> Result<VerifyReport> {
    let orig_cols = matrix_num_cols(original)?;
    let reduced_vars = matrix_num_vars(reduced)?;

    let original_lp = problem_over(original, orig_cols);
    let mut report = VerifyReport::default();
    for row in reduced {
        if !original_lp.is_redundant(&row.injection(orig_cols, 0))? {
            report.false_positives.push(row.clone());
        }
    }

    // A reduced space below two variables has no elemental inequalities.
    if reduced_vars >= 2 {
        let target = shannon::elemental_inequalities(reduced_vars);
        let reduced_lp = problem_over(reduced, 1 << reduced_vars);
        for row in target.rows() {
            if !reduced_lp.is_redundant(row)? {
                report.undiscovered.push(row.clone());
            }
        }
    }
    Ok(report)
}

/// Keep only the rows that the elemental inequalities of their own space
/// fail to imply.
///
/// Accepted rows join the oracle, so later rows implied by earlier
/// non-trivial findings are filtered too.
pub fn filter_nontrivial(matrix: &Matrix) -> Result<Matrix> {
    let num_vars = matrix_num_vars(matrix)?;
    let target = shannon::elemental_inequalities(num_vars);
    let mut lp = Problem::from_system(&target);
    let mut nontrivial = Matrix::new();
    for row in matrix {
        if !lp.is_redundant(row)? {
            lp.add_inequality(row);
            nontrivial.push(row.clone());
        }
    }
    Ok(nontrivial)
}

/// Map an entropy coordinate of a two-layer periodic network (each layer
/// `width` cells wide) under a cyclic cell shift by `shift`.
fn shift_subset(index: usize, width: usize, shift: usize) -> usize {
    let mut out = 0;
    for cell in 0..width {
        if index & (1 << cell) != 0 {
            out |= 1 << ((cell + shift) % width);
        }
        if index & (1 << (width + cell)) != 0 {
            out |= 1 << (width + (cell + shift) % width);
        }
    }
    out
}

/// Permute a vector's coordinates under a cyclic cell shift of both
/// layers.
pub fn shift_variables(vector: &Vector, width: usize, shift: usize) -> Vector {
    assert_eq!(
        vector.len(),
        1 << (2 * width),
        "vector must span the two-layer entropy space"
    );
    let mut out = Vector::new(vector.len());
    for (index, &value) in vector.iter().enumerate() {
        if value != 0 {
            out.set(shift_subset(index, width, shift), value);
        }
    }
    out
}

/// Outcome of [`check_shift_invariance`].
#[derive(Debug, Clone, Default)]
pub struct ShiftReport {
    /// Rows with the shifts under which their image is neither present in
    /// the system nor implied by it.
    pub violations: Vec<(Vector, Vec<usize>)>,
}

impl ShiftReport {
    /// Whether the system is shift invariant.
    pub fn is_invariant(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check that a two-layer system is invariant under cyclic cell shifts.
///
/// For every row and every non-trivial shift, the shifted row must appear
/// in the system verbatim or, since minimized generating sets are not
/// unique, at least be implied by it.
pub fn check_shift_invariance(matrix: &Matrix) -> Result<ShiftReport> {
    let num_vars = matrix_num_vars(matrix)?;
    let width = num_vars / 2;

    let mut positions: FxHashMap<&[i64], Vec<usize>> = FxHashMap::default();
    for (index, row) in matrix.iter().enumerate() {
        positions.entry(row.as_slice()).or_default().push(index);
    }

    let lp = problem_over(matrix, 1 << num_vars);
    let mut checked = vec![false; matrix.len()];
    let mut report = ShiftReport::default();

    for (index, row) in matrix.iter().enumerate() {
        if checked[index] {
            continue;
        }
        checked[index] = true;

        let mut missing = Vec::new();
        for shift in 1..width {
            let shifted = shift_variables(row, width, shift);
            if &shifted == row {
                continue;
            }
            if let Some(matches) = positions.get(shifted.as_slice()) {
                for &m in matches {
                    checked[m] = true;
                }
                continue;
            }
            if !lp.is_redundant(&shifted)? {
                missing.push(shift);
            }
        }
        if !missing.is_empty() {
            report.violations.push((row.clone(), missing));
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_of(rows: &[&[i64]]) -> Matrix {
        rows.iter().map(|r| Vector::from(r.to_vec())).collect()
    }

    #[test]
    fn unimplied_finds_the_gap() {
        let a = matrix_of(&[&[0, 1, 0, 0], &[0, 0, 1, 0]]);
        let b = matrix_of(&[&[0, 1, 1, 0], &[0, 0, 0, 1]]);
        let missing = unimplied(&a, &b).unwrap();
        assert_eq!(missing, matrix_of(&[&[0, 0, 0, 1]]));
    }

    #[test]
    fn unimplied_of_equal_systems_is_empty() {
        let a = matrix_of(&[&[0, 1, 0, 0], &[0, 0, 1, 0]]);
        assert!(unimplied(&a, &a).unwrap().is_empty());
    }

    #[test]
    fn empty_a_implies_nothing() {
        let b = matrix_of(&[&[0, 1, 0, 0]]);
        assert_eq!(unimplied(&Matrix::new(), &b).unwrap(), b);
        assert!(unimplied(&b, &Matrix::new()).unwrap().is_empty());
    }

    #[test]
    fn shift_subset_rotates_both_layers() {
        // width 2: final cells at bits 0..2, initial cells at bits 2..4
        assert_eq!(shift_subset(0b0001, 2, 1), 0b0010);
        assert_eq!(shift_subset(0b0010, 2, 1), 0b0001);
        assert_eq!(shift_subset(0b0100, 2, 1), 0b1000);
        assert_eq!(shift_subset(0b0101, 2, 1), 0b1010);
        assert_eq!(shift_subset(0b1111, 2, 1), 0b1111);
    }

    #[test]
    fn shift_by_width_is_identity() {
        for index in 0..16 {
            assert_eq!(shift_subset(index, 2, 2), index);
        }
    }

    #[test]
    fn elemental_systems_are_shift_invariant() {
        let system = shannon::elemental_inequalities(4);
        let report = check_shift_invariance(&system.rows().to_vec()).unwrap();
        assert!(report.is_invariant());
    }

    #[test]
    fn shift_violations_are_reported() {
        // H(final cell 0) >= 0 alone: its shift H(final cell 1) is neither
        // present nor implied
        let mut v = Vector::new(16);
        v.set(0b0001, 1);
        let report = check_shift_invariance(&vec![v]).unwrap();
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].1, vec![1]);
    }

    #[test]
    fn verify_elimination_accepts_a_correct_projection() {
        // the 3-variable Shannon cone projects onto the 2-variable one
        let original = shannon::elemental_inequalities(3).into_rows();
        let reduced = shannon::elemental_inequalities(2).into_rows();
        let report = verify_elimination(&original, &reduced).unwrap();
        assert!(report.is_consistent());
    }

    #[test]
    fn verify_elimination_flags_fabricated_rows() {
        let original = shannon::elemental_inequalities(2).into_rows();
        // -H(X0) >= 0 is not implied by the Shannon cone
        let reduced = matrix_of(&[&[0, -1]]);
        let report = verify_elimination(&original, &reduced).unwrap();
        assert_eq!(report.false_positives.len(), 1);
        assert!(!report.is_consistent());
    }

    #[test]
    fn filter_nontrivial_drops_elemental_consequences() {
        let mut rows = shannon::elemental_inequalities(2).into_rows();
        assert!(filter_nontrivial(&rows).unwrap().is_empty());

        // Ingleton-flavoured extra row: not a Shannon consequence
        rows.push(Vector::from(vec![0, 1, 1, -2]));
        let nontrivial = filter_nontrivial(&rows).unwrap();
        assert_eq!(nontrivial, matrix_of(&[&[0, 1, 1, -2]]));
    }
}
