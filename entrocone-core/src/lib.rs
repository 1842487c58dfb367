//! Entrocone Core - Integer Inequality Systems over Entropy Coordinates
//!
//! This crate provides the foundational types for entropy-cone computations:
//! - Dense integer coefficient [`Vector`]s with the primitive-representative
//!   invariant (gcd of the non-zero entries is 1 after every public operation)
//! - Ordered inequality [`System`]s over a shared column count, with
//!   equalities stored as a pair of opposing inequalities
//! - Generators for the elemental Shannon inequalities and the structural
//!   constraints of layered causal networks ([`shannon`])
//! - The line-oriented bracketed matrix text format ([`io`])
//!
//! Entropy coordinates are indexed by non-empty subsets `S` of the variable
//! set `{0, .., N-1}`, encoded as the integer whose bit `i` is set iff
//! `i ∈ S`. Column 0 corresponds to the empty set and is unused padding, so
//! a system over `N` variables has `2^N` columns.
//!
//! # Examples
//!
//! ```
//! use entrocone_core::shannon;
//!
//! let system = shannon::elemental_inequalities(2);
//! assert_eq!(system.num_cols(), 4);
//! assert_eq!(system.len(), shannon::num_elemental_inequalities(2));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod bits;
pub mod error;
pub mod io;
pub mod shannon;
pub mod system;
pub mod vector;

pub use error::{CoreError, Result};
pub use system::{Matrix, System, matrix_num_cols, matrix_num_vars};
pub use vector::{Vector, scaled_addition};
