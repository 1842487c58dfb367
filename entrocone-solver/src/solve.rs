//! The elimination driver.

use entrocone_core::System;

use crate::eliminate::eliminate;
use crate::error::{Result, SolveError};
use crate::minimize::minimize;
use crate::status::{Directive, StatusObserver};

/// Knobs for the elimination driver and step.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Run a minimization pass whenever a single step grows the system by
    /// more than this many rows. `None` disables the guard.
    pub auto_minimize_growth: Option<usize>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            auto_minimize_growth: Some(10),
        }
    }
}

/// Estimated cost of eliminating `col` next: the number of pairwise
/// combinations generated minus the rows that disappear.
///
/// Minimizing this picks the cheapest column; a column nobody bounds from
/// one side scores negative (it only sheds rows).
pub fn chernikov_rank(system: &System, col: usize) -> i64 {
    let (pos, neg) = system.sign_counts(col);
    (pos as i64) * (neg as i64) - (pos as i64 + neg as i64)
}

/// Eliminate columns until at most `target` remain, picking each column by
/// minimal [`chernikov_rank`] (the first minimum in ascending index order
/// wins ties, so runs are reproducible).
///
/// Candidate columns are `target..num_cols`: the surviving low coordinates
/// are never touched. Each chosen column is appended to `record` when
/// provided, so callers can report the elimination order.
pub fn solve_to(
    system: &mut System,
    target: usize,
    options: &SolveOptions,
    observer: &mut dyn StatusObserver,
    mut record: Option<&mut Vec<usize>>,
) -> Result<()> {
    assert!(target >= 1, "cannot eliminate every column");
    observer.enter_solver(system.num_cols(), target);
    tracing::debug!(
        from = system.num_cols(),
        to = target,
        rows = system.len(),
        "eliminating columns"
    );

    let mut step = 0;
    while system.num_cols() > target {
        match observer.start_step(step, system.num_cols(), system.len()) {
            Directive::Cancel => return Err(SolveError::Cancelled),
            Directive::Minimize => minimize(system, observer)?,
            Directive::Continue => {}
        }

        let mut best_col = target;
        let mut best_rank = chernikov_rank(system, target);
        for col in target + 1..system.num_cols() {
            let rank = chernikov_rank(system, col);
            if rank < best_rank {
                best_col = col;
                best_rank = rank;
            }
        }

        if let Some(recorded) = record.as_deref_mut() {
            recorded.push(best_col);
        }
        tracing::debug!(
            step,
            col = best_col,
            rank = best_rank,
            rows = system.len(),
            "eliminate column"
        );
        eliminate(system, best_col, options, observer)?;
        step += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::NullObserver;
    use entrocone_core::Vector;

    fn system_of(rows: &[&[i64]]) -> System {
        let mut system = System::new(rows[0].len(), rows.len());
        for row in rows {
            system.add_inequality(Vector::from(row.to_vec()));
        }
        system
    }

    #[test]
    fn rank_counts_products_minus_disappearing_rows() {
        let system = system_of(&[&[0, 1, 2], &[0, 0, -1], &[0, 1, 3], &[0, 1, 0]]);
        // column 2: pos = 2, neg = 1 -> 2*1 - 3 = -1
        assert_eq!(chernikov_rank(&system, 2), -1);
        // column 1: pos = 3, neg = 0 -> 0 - 3 = -3
        assert_eq!(chernikov_rank(&system, 1), -3);
    }

    #[test]
    fn solve_to_records_the_chosen_order() {
        let mut system = system_of(&[
            &[0, 1, 0, -1],
            &[0, -1, 1, 0],
            &[0, 0, -1, 1],
            &[0, 1, 1, 0],
        ]);
        let mut order = Vec::new();
        solve_to(
            &mut system,
            1,
            &SolveOptions::default(),
            &mut NullObserver,
            Some(&mut order),
        )
        .unwrap();
        assert_eq!(system.num_cols(), 1);
        assert_eq!(order.len(), 3);
        for col in &order {
            assert!((1..4).contains(col));
        }
    }

    #[test]
    fn one_sided_columns_are_preferred() {
        // column 3 is bounded from one side only, so its rank is the most
        // negative and it must be eliminated first
        let mut system = system_of(&[
            &[0, 1, -1, 1],
            &[0, -1, 1, 1],
            &[0, 1, 1, 1],
        ]);
        let mut order = Vec::new();
        solve_to(
            &mut system,
            2,
            &SolveOptions::default(),
            &mut NullObserver,
            Some(&mut order),
        )
        .unwrap();
        // the one-sided column goes first; the emptied system then sheds
        // its remaining candidate column trivially
        assert_eq!(order, vec![3, 2]);
        assert!(system.is_empty());
    }
}
