//! One Fourier-Motzkin elimination step with LP pruning.

use std::cmp::Ordering;

use entrocone_core::System;
use entrocone_lp::Problem;

use crate::error::{Result, SolveError};
use crate::minimize::minimize;
use crate::solve::SolveOptions;
use crate::status::{Directive, StatusObserver};

/// Eliminate column `col` from the system in place.
///
/// Rows are partitioned by the sign of their coefficient at `col`. Zero
/// rows survive with the column removed; every ordered pair of a positive
/// and a negative row contributes the positive combination that cancels
/// the column, and a candidate is committed only when the oracle over the
/// rows accepted so far fails to imply it. Without this pruning the row
/// count grows as `pos * neg` per step and later steps become unreachable.
///
/// All-zero candidates are dropped. If either side of the partition is
/// empty the column was unbounded in one direction and only the zero rows
/// survive.
///
/// Cancellation mid-step leaves a well-formed system over the reduced
/// column space containing the rows committed so far (a relaxation of the
/// projection).
pub fn eliminate(
    system: &mut System,
    col: usize,
    options: &SolveOptions,
    observer: &mut dyn StatusObserver,
) -> Result<()> {
    assert!(col < system.num_cols(), "column out of range");

    let num_orig = system.len();
    let reduced = System::new(system.num_cols() - 1, num_orig);
    let old = std::mem::replace(system, reduced);

    let mut pos = Vec::new();
    let mut neg = Vec::new();
    for mut row in old.into_rows() {
        match row.get(col).cmp(&0) {
            Ordering::Greater => pos.push(row),
            Ordering::Less => neg.push(row),
            Ordering::Equal => {
                row.remove(col);
                system.add_inequality(row);
            }
        }
    }

    let mut pending_minimize = false;
    match observer.start_eliminate(col, pos.len(), neg.len(), system.len()) {
        Directive::Cancel => return Err(SolveError::Cancelled),
        Directive::Minimize => pending_minimize = true,
        Directive::Continue => {}
    }

    let mut oracle = Problem::from_system(system);
    let total = pos.len() * neg.len();
    let mut index = 0;
    for p in &pos {
        for n in &neg {
            match observer.start_check(index, total, system.len()) {
                Directive::Cancel => return Err(SolveError::Cancelled),
                Directive::Minimize => pending_minimize = true,
                Directive::Continue => {}
            }
            index += 1;

            let candidate = p.eliminate(n, col);
            if candidate.is_zero() {
                continue;
            }
            if !oracle.is_redundant(&candidate)? {
                oracle.add_inequality(&candidate);
                system.add_inequality(candidate);
            }
        }
    }

    let grew = options
        .auto_minimize_growth
        .is_some_and(|growth| system.len() > num_orig + growth);
    if pending_minimize || grew {
        minimize(system, observer)?;
    }
    Ok(())
}
