//! Solver failure kinds.

/// Result alias for oracle operations.
pub type Result<T> = std::result::Result<T, LpError>;

/// Errors surfaced by the LP backend.
///
/// A definite "not implied" answer is not an error; it is the `false`
/// branch of the redundancy test. Only genuine solver failure is fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LpError {
    /// The simplex failed to terminate within its iteration budget.
    ///
    /// With Bland's rule and exact arithmetic this indicates a problem far
    /// outside the supported size range, not cycling.
    #[error("simplex did not terminate within {iterations} iterations")]
    IterationLimit {
        /// The exhausted budget.
        iterations: usize,
    },

    /// The tableau reached a state that the phase-I construction rules out.
    #[error("simplex internal error: {message}")]
    Internal {
        /// Which invariant broke.
        message: &'static str,
    },
}
