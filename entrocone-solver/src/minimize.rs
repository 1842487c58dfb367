//! Greedy minimization of an inequality system.

use entrocone_core::{Matrix, System};
use entrocone_lp::Problem;

use crate::error::{Result, SolveError};
use crate::status::{Directive, StatusObserver};

/// Drop every row that the remaining rows imply.
///
/// The oracle starts with all rows; iterating from the last row to the
/// first, each row is deleted from the oracle, probed against the rest and
/// either discarded (implied) or re-added. The pass terminates with a
/// minimal generating set: no surviving row is implied by the others, and
/// the cone is unchanged.
pub fn minimize(system: &mut System, observer: &mut dyn StatusObserver) -> Result<()> {
    let num_orig = system.len();
    let mut oracle = Problem::new(system.num_cols());
    let mut handles: Vec<_> = system
        .rows()
        .iter()
        .map(|row| oracle.add_inequality(row))
        .collect();

    // Descending order keeps indices below the probe position stable, so
    // original row indices keep addressing the same rows throughout.
    for index in (0..num_orig).rev() {
        if observer.start_minimize_round(index, system.len()) == Directive::Cancel {
            return Err(SolveError::Cancelled);
        }
        oracle.del_row(handles[index]);
        let row = system.rows()[index].clone();
        if oracle.is_redundant(&row)? {
            system.remove_row(index);
        } else {
            handles[index] = oracle.add_inequality(&row);
        }
    }

    tracing::debug!(from = num_orig, to = system.len(), "minimized system");
    Ok(())
}

/// Minimize a bare matrix, validating its shape first.
pub fn minimize_matrix(matrix: &Matrix, observer: &mut dyn StatusObserver) -> Result<Matrix> {
    let mut system = System::from_matrix(matrix.clone())?;
    minimize(&mut system, observer)?;
    Ok(system.into_rows())
}
