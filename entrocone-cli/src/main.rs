//! Entrocone CLI - driver tools for entropy-cone projection.
//!
//! Results go to stdout, status and progress go to stderr. Every emitted
//! matrix starts with an autogeneration header as `#` comments. Exit
//! codes: 0 success, 1 fatal error, 2 usage error (clap); `check` and
//! `diff` return the implication bitmask (1 = A misses parts of B,
//! 2 = B misses parts of A).

mod commands;
mod header;
mod observer;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use header::AutogenNotice;

#[derive(Debug, Parser)]
#[command(name = "entrocone", version, about = "Entropy-cone projection tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Emit the elemental Shannon inequalities for NUM_VARS variables.
    Elemental {
        /// Number of random variables (2..=26).
        num_vars: usize,
    },

    /// Build and minimize the constrained system of a two-layer periodic
    /// causal network.
    InitCca {
        /// Number of final-layer cells.
        nf: usize,
        /// Fan-in: number of initial-layer parents per final cell.
        #[arg(long, default_value_t = 2)]
        links: usize,
        /// Number of initial-layer cells (defaults to NF).
        #[arg(long)]
        initial: Option<usize>,
    },

    /// Read a system from stdin and eliminate columns from the right until
    /// SOLVE_TO remain; minimize and emit the result.
    Eliminate {
        /// Target column count.
        solve_to: usize,
        /// Emit only rows the elemental inequalities of the reduced space
        /// do not already imply.
        #[arg(long)]
        nontrivial: bool,
    },

    /// Read a system from stdin, drop every implied row and emit the rest.
    MinimizeSystem,

    /// As init-cca, but read constraints for the initial layer from stdin
    /// (the previous layer's output), injected into the high coordinates.
    NextLayer {
        /// Number of final-layer cells.
        nf: usize,
        /// Fan-in: number of initial-layer parents per final cell.
        #[arg(long, default_value_t = 2)]
        links: usize,
        /// Number of initial-layer cells (defaults to NF).
        #[arg(long)]
        initial: Option<usize>,
    },

    /// Report whether each of two systems implies the other.
    Check {
        /// First system.
        file_a: PathBuf,
        /// Second system.
        file_b: PathBuf,
    },

    /// Like check, but print the rows either side is missing.
    Diff {
        /// First system.
        file_a: PathBuf,
        /// Second system.
        file_b: PathBuf,
    },

    /// Check a two-layer system for cyclic shift symmetry.
    CheckShift {
        /// System to check.
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let notice = AutogenNotice::capture();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Elemental { num_vars } => commands::elemental(num_vars, &notice),
        Command::InitCca { nf, links, initial } => {
            commands::init_cca(nf, links, initial.unwrap_or(nf), &notice)
        }
        Command::Eliminate {
            solve_to,
            nontrivial,
        } => commands::eliminate(solve_to, nontrivial, &notice),
        Command::MinimizeSystem => commands::minimize_system(&notice),
        Command::NextLayer { nf, links, initial } => {
            commands::next_layer(nf, links, initial.unwrap_or(nf), &notice)
        }
        Command::Check { file_a, file_b } => commands::compare(&file_a, &file_b, false),
        Command::Diff { file_a, file_b } => commands::compare(&file_a, &file_b, true),
        Command::CheckShift { file } => commands::check_shift(&file),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::from(1)
        }
    }
}
