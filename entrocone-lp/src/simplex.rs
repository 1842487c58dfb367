//! Phase-I simplex over exact rationals.
//!
//! The oracle question "is `c` a non-negative combination of the rows?" is
//! solved in its Farkas form: find multipliers `y` with `Σ y_i·row_i = c`,
//! `y_i >= 0` on inequality rows and free on equality rows. Free
//! multipliers are split into differences of non-negative pairs, artificial
//! variables complete the initial identity basis, and the phase-I objective
//! (the sum of the artificials) decides feasibility.
//!
//! Bland's smallest-index rule is used for both the entering and the
//! leaving choice, so the solver is deterministic and cannot cycle; the
//! iteration cap is a failsafe, not an anticycling device.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::error::{LpError, Result};

/// Upper bound on pivot steps before the solver reports failure.
const MAX_ITERATIONS: usize = 100_000;

/// Outcome of minimizing `c·x` over the cone `{x : Ax >= 0}`.
///
/// `Optimal` means the minimum is attained (necessarily at zero), i.e. the
/// multiplier problem is feasible and `c` is implied. `Unbounded` means the
/// objective decreases without bound, i.e. `c` is not implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimplexStatus {
    /// The minimum exists; `c` is a non-negative combination of the rows.
    Optimal,
    /// The objective is unbounded below; `c` is not implied.
    Unbounded,
}

/// Pivot counters for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct SimplexStats {
    /// Simplex iterations performed.
    pub iterations: usize,
    /// Pivot operations performed.
    pub pivots: usize,
}

/// Where a tableau column's value flows back to.
#[derive(Debug, Clone, Copy)]
enum ColOrigin {
    /// Part of the multiplier of a row slot, with the given sign.
    Multiplier { slot: usize, sign: i64 },
    /// Phase-I artificial.
    Artificial,
}

/// One constraint row of the multiplier problem, in solver-ready form.
#[derive(Debug, Clone, Copy)]
pub struct MultiplierRow<'a> {
    /// Stable slot index in the owning [`Problem`](crate::Problem).
    pub slot: usize,
    /// Whether the multiplier is free (equality row) or non-negative.
    pub free: bool,
    /// The row coefficients, full primal width (column 0 ignored).
    pub coeffs: &'a [i64],
}

fn rational(value: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(value))
}

/// Dense phase-I tableau for one feasibility query.
pub struct MultiplierSolver {
    /// `m x (n + 1)` tableau, last column is the right-hand side.
    tableau: Vec<Vec<BigRational>>,
    /// Reduced-cost row, last entry is the negated objective value.
    cost: Vec<BigRational>,
    /// Basic column of each tableau row.
    basis: Vec<usize>,
    origins: Vec<ColOrigin>,
    num_cols: usize,
    stats: SimplexStats,
}

impl MultiplierSolver {
    /// Build the phase-I tableau for `Σ y_i·row_i = objective` over primal
    /// columns `1..num_primal_cols`.
    pub fn new(
        num_primal_cols: usize,
        rows: &[MultiplierRow<'_>],
        objective: &[i64],
    ) -> Self {
        debug_assert_eq!(objective.len(), num_primal_cols);
        let m = num_primal_cols - 1;

        let mut origins = Vec::new();
        for row in rows {
            debug_assert_eq!(row.coeffs.len(), num_primal_cols);
            origins.push(ColOrigin::Multiplier {
                slot: row.slot,
                sign: 1,
            });
            if row.free {
                origins.push(ColOrigin::Multiplier {
                    slot: row.slot,
                    sign: -1,
                });
            }
        }
        let num_struct = origins.len();
        let num_cols = num_struct + m;
        origins.resize(num_cols, ColOrigin::Artificial);

        // Integer staging: one equation per primal column, negated where
        // needed so every right-hand side is non-negative.
        let mut tableau = Vec::with_capacity(m);
        let mut basis = Vec::with_capacity(m);
        for eq in 0..m {
            let primal_col = eq + 1;
            let flip = objective[primal_col] < 0;
            let fix = |value: i64| if flip { -value } else { value };

            let mut row = Vec::with_capacity(num_cols + 1);
            for source in rows {
                row.push(rational(fix(source.coeffs[primal_col])));
                if source.free {
                    row.push(rational(fix(-source.coeffs[primal_col])));
                }
            }
            for art in 0..m {
                row.push(rational(i64::from(art == eq)));
            }
            row.push(rational(fix(objective[primal_col])));
            tableau.push(row);
            basis.push(num_struct + eq);
        }

        // Phase-I reduced costs with the artificial identity basis: the
        // structural entries are the negated column sums, the artificials
        // start at zero, and the last entry holds the negated objective
        // value (the negated sum of the right-hand sides).
        let mut cost = vec![BigRational::zero(); num_cols + 1];
        for row in &tableau {
            for (c, value) in cost.iter_mut().zip(row.iter()) {
                *c -= value;
            }
        }
        for c in cost.iter_mut().skip(num_struct).take(m) {
            *c = BigRational::zero();
        }

        Self {
            tableau,
            cost,
            basis,
            origins,
            num_cols,
            stats: SimplexStats::default(),
        }
    }

    /// Run to optimality and report the cone-minimization status.
    pub fn solve(&mut self) -> Result<SimplexStatus> {
        for _ in 0..MAX_ITERATIONS {
            self.stats.iterations += 1;

            let Some(entering) = self.select_entering() else {
                // All reduced costs non-negative: phase-I optimum reached.
                // Feasible iff no artificial infeasibility remains.
                let objective = -self.cost[self.num_cols].clone();
                return Ok(if objective.is_zero() {
                    SimplexStatus::Optimal
                } else {
                    SimplexStatus::Unbounded
                });
            };

            let Some(leaving) = self.select_leaving(entering) else {
                // The phase-I objective is bounded below by zero, so an
                // unbounded ray cannot exist.
                return Err(LpError::Internal {
                    message: "phase-I column without positive entries",
                });
            };

            self.pivot(leaving, entering);
            self.stats.pivots += 1;
        }
        Err(LpError::IterationLimit {
            iterations: MAX_ITERATIONS,
        })
    }

    /// Bland entering choice: the lowest-index column with negative
    /// reduced cost.
    fn select_entering(&self) -> Option<usize> {
        self.cost[..self.num_cols]
            .iter()
            .position(|c| c < &BigRational::zero())
    }

    /// Bland leaving choice: minimum ratio, ties broken by the smallest
    /// basic column index.
    fn select_leaving(&self, entering: usize) -> Option<usize> {
        let mut best: Option<(BigRational, usize, usize)> = None;
        for (p, row) in self.tableau.iter().enumerate() {
            let coeff = &row[entering];
            if coeff <= &BigRational::zero() {
                continue;
            }
            let ratio = &row[self.num_cols] / coeff;
            let candidate = (ratio, self.basis[p], p);
            best = match best {
                None => Some(candidate),
                Some(current) => {
                    if candidate.0 < current.0
                        || (candidate.0 == current.0 && candidate.1 < current.1)
                    {
                        Some(candidate)
                    } else {
                        Some(current)
                    }
                }
            };
        }
        best.map(|(_, _, p)| p)
    }

    fn pivot(&mut self, leaving: usize, entering: usize) {
        let pivot_value = self.tableau[leaving][entering].clone();
        debug_assert!(pivot_value.is_positive());

        for value in &mut self.tableau[leaving] {
            *value = &*value / &pivot_value;
        }

        for p in 0..self.tableau.len() {
            if p == leaving {
                continue;
            }
            let factor = self.tableau[p][entering].clone();
            if factor.is_zero() {
                continue;
            }
            for col in 0..=self.num_cols {
                let delta = &factor * &self.tableau[leaving][col];
                self.tableau[p][col] = &self.tableau[p][col] - delta;
            }
        }

        let factor = self.cost[entering].clone();
        if !factor.is_zero() {
            for col in 0..=self.num_cols {
                let delta = &factor * &self.tableau[leaving][col];
                self.cost[col] = &self.cost[col] - delta;
            }
        }

        self.basis[leaving] = entering;
    }

    /// Multiplier value per row slot, composed from the basic columns.
    /// Only meaningful after [`solve`](Self::solve) returned `Optimal`.
    pub fn multipliers(&self, num_slots: usize) -> Vec<BigRational> {
        let mut result = vec![BigRational::zero(); num_slots];
        for (p, &col) in self.basis.iter().enumerate() {
            if let ColOrigin::Multiplier { slot, sign } = self.origins[col] {
                let value = self.tableau[p][self.num_cols].clone();
                if sign >= 0 {
                    result[slot] += value;
                } else {
                    result[slot] -= value;
                }
            }
        }
        result
    }

    /// Pivot counters for diagnostics.
    pub fn stats(&self) -> &SimplexStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(
        num_primal_cols: usize,
        rows: &[(usize, bool, Vec<i64>)],
        objective: &[i64],
    ) -> SimplexStatus {
        let rows: Vec<MultiplierRow<'_>> = rows
            .iter()
            .map(|(slot, free, coeffs)| MultiplierRow {
                slot: *slot,
                free: *free,
                coeffs,
            })
            .collect();
        let mut solver = MultiplierSolver::new(num_primal_cols, &rows, objective);
        solver.solve().unwrap()
    }

    #[test]
    fn sum_of_rows_is_feasible() {
        let rows = vec![(0, false, vec![0, 1, 0]), (1, false, vec![0, 0, 1])];
        assert_eq!(solve(3, &rows, &[0, 1, 1]), SimplexStatus::Optimal);
    }

    #[test]
    fn negative_direction_is_infeasible() {
        let rows = vec![(0, false, vec![0, 1, 0]), (1, false, vec![0, 0, 1])];
        assert_eq!(solve(3, &rows, &[0, -1, 0]), SimplexStatus::Unbounded);
    }

    #[test]
    fn free_multipliers_cover_both_directions() {
        // An equality row supports both c and -c.
        let rows = vec![(0, true, vec![0, 1, -1])];
        assert_eq!(solve(3, &rows, &[0, 2, -2]), SimplexStatus::Optimal);
        assert_eq!(solve(3, &rows, &[0, -3, 3]), SimplexStatus::Optimal);
        assert_eq!(solve(3, &rows, &[0, 1, 1]), SimplexStatus::Unbounded);
    }

    #[test]
    fn zero_objective_is_always_feasible() {
        let rows = vec![(0, false, vec![0, 5, -3])];
        assert_eq!(solve(3, &rows, &[0, 0, 0]), SimplexStatus::Optimal);
        assert_eq!(solve(3, &[], &[0, 0, 0]), SimplexStatus::Optimal);
    }

    #[test]
    fn empty_row_set_implies_nothing_else() {
        assert_eq!(solve(3, &[], &[0, 1, 0]), SimplexStatus::Unbounded);
    }

    #[test]
    fn multipliers_witness_the_combination() {
        let rows_data = vec![(0usize, false, vec![0i64, 1, 0]), (1, false, vec![0, 0, 1])];
        let rows: Vec<MultiplierRow<'_>> = rows_data
            .iter()
            .map(|(slot, free, coeffs)| MultiplierRow {
                slot: *slot,
                free: *free,
                coeffs,
            })
            .collect();
        let mut solver = MultiplierSolver::new(3, &rows, &[0, 2, 3]);
        assert_eq!(solver.solve().unwrap(), SimplexStatus::Optimal);
        let y = solver.multipliers(2);
        assert_eq!(y[0], rational(2));
        assert_eq!(y[1], rational(3));
        assert!(solver.stats().iterations >= 1);
        assert!(solver.stats().pivots >= 2);
    }
}
