//! Status observer that reports progress through `tracing`.

use entrocone_solver::{Directive, StatusObserver};

/// Forwards solver progress to stderr as structured log events; never
/// interferes with the run.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl StatusObserver for TracingObserver {
    fn enter_solver(&mut self, num_cols: usize, target: usize) {
        tracing::info!(from = num_cols, to = target, "eliminating columns");
    }

    fn start_step(&mut self, step: usize, num_cols: usize, num_rows: usize) -> Directive {
        tracing::info!(step, num_cols, rows = num_rows, "elimination step");
        Directive::Continue
    }

    fn start_eliminate(&mut self, col: usize, pos: usize, neg: usize, zero: usize) -> Directive {
        tracing::debug!(
            col,
            pos,
            neg,
            zero,
            pairs = pos * neg,
            "partitioned rows for elimination"
        );
        Directive::Continue
    }

    fn start_check(&mut self, index: usize, total: usize, kept: usize) -> Directive {
        tracing::trace!(index, total, kept, "pairwise redundancy check");
        Directive::Continue
    }

    fn start_minimize_round(&mut self, index: usize, remaining: usize) -> Directive {
        tracing::trace!(index, remaining, "minimization round");
        Directive::Continue
    }
}
