//! Entrocone LP - Exact Redundancy Oracle over Homogeneous Cones
//!
//! This crate answers one question, exactly: given a system of homogeneous
//! rows `Ax >= 0` (with some rows fixed to equality), is a further
//! inequality `c·x >= 0` implied? Over a cone, `c` is implied iff it is a
//! non-negative combination of the rows, equivalently iff
//! `min { c·x : Ax >= 0 }` is bounded (at zero) rather than unbounded
//! below. The [`Problem`] type exposes that test together with row
//! add/delete, which is all Fourier-Motzkin pruning needs.
//!
//! The backing solver is a phase-I simplex over [`BigRational`] with
//! Bland's rule: deterministic, cycle-free, and free of epsilon tuning.
//!
//! [`BigRational`]: num_rational::BigRational
//!
//! # Examples
//!
//! ```
//! use entrocone_core::Vector;
//! use entrocone_lp::Problem;
//!
//! let mut lp = Problem::new(3);
//! lp.add_inequality(&Vector::from(vec![0, 1, 0]));
//! lp.add_inequality(&Vector::from(vec![0, 0, 1]));
//! assert!(lp.is_redundant(&Vector::from(vec![0, 1, 1])).unwrap());
//! assert!(!lp.is_redundant(&Vector::from(vec![0, -1, 0])).unwrap());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod problem;
pub mod simplex;

pub use error::{LpError, Result};
pub use problem::{Problem, RowHandle};
pub use simplex::{MultiplierRow, MultiplierSolver, SimplexStats, SimplexStatus};
