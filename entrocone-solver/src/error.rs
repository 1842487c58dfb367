//! Error kinds for solver operations.

use entrocone_core::CoreError;
use entrocone_lp::LpError;

/// Result alias for solver operations.
pub type Result<T> = std::result::Result<T, SolveError>;

/// Errors propagating out of elimination, driving and minimization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// A status observer requested termination.
    ///
    /// Raised only between atomic updates, so the operated-on system is
    /// left in a valid (possibly partially reduced) state.
    #[error("operation cancelled by observer")]
    Cancelled,

    /// The LP backend failed (not an "unbounded" answer, which is a
    /// regular negative redundancy result).
    #[error(transparent)]
    Lp(#[from] LpError),

    /// Shape validation of an input matrix failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}
