//! Entrocone Solver - Fourier-Motzkin Elimination with LP Pruning
//!
//! The projection pipeline over [`entrocone_core::System`]s:
//! - [`eliminate`] removes one column by combining opposite-sign rows,
//!   pruning each candidate against an exact LP redundancy oracle
//! - [`solve_to`] repeats the step, choosing columns by the Chernikov rank
//!   heuristic, until a target column count is reached
//! - [`minimize`] reduces a system to rows none of which is implied by the
//!   others
//! - [`analysis`] compares systems, verifies finished eliminations, and
//!   checks the cyclic shift symmetry of periodic network solutions
//!
//! Long-running operations consult a caller-supplied [`StatusObserver`]
//! between atomic updates; an observer can cancel, which surfaces as
//! [`SolveError::Cancelled`] and leaves the system well-formed.
//!
//! # Examples
//!
//! ```
//! use entrocone_core::shannon;
//! use entrocone_solver::{NullObserver, SolveOptions, minimize, solve_to};
//!
//! let mut system = shannon::elemental_inequalities(3);
//! solve_to(
//!     &mut system,
//!     4,
//!     &SolveOptions::default(),
//!     &mut NullObserver,
//!     None,
//! )
//! .unwrap();
//! minimize(&mut system, &mut NullObserver).unwrap();
//! assert_eq!(system.num_cols(), 4);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod analysis;
pub mod eliminate;
pub mod error;
pub mod minimize;
pub mod solve;
pub mod status;

pub use analysis::{
    ShiftReport, VerifyReport, check_shift_invariance, filter_nontrivial, shift_variables,
    unimplied, verify_elimination,
};
pub use eliminate::eliminate;
pub use error::{Result, SolveError};
pub use minimize::{minimize, minimize_matrix};
pub use solve::{SolveOptions, chernikov_rank, solve_to};
pub use status::{Directive, NullObserver, StatusObserver};
