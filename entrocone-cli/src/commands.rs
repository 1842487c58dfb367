//! Subcommand implementations.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use entrocone_core::bits::is_power_of_two;
use entrocone_core::shannon::{
    add_causal_constraints, elemental_inequalities, set_initial_state_iid,
};
use entrocone_core::{CoreError, Matrix, System, io as matrix_io, matrix_num_vars};
use entrocone_solver::{
    SolveError, SolveOptions, check_shift_invariance, filter_nontrivial, minimize, solve_to,
    unimplied, verify_elimination,
};

use crate::header::AutogenNotice;
use crate::observer::TracingObserver;

/// Errors a subcommand can fail with; all map to exit code 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Largest variable count the generators accept.
const MAX_NUM_VARS: usize = 26;

fn read_stdin_matrix() -> Result<Matrix> {
    Ok(matrix_io::parse_matrix(io::stdin().lock())?)
}

fn read_file_matrix(path: &Path) -> Result<Matrix> {
    Ok(matrix_io::parse_matrix(BufReader::new(File::open(path)?))?)
}

fn emit(notice: &AutogenNotice, extra: Option<&str>, rows: &Matrix) -> Result<u8> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}", notice.render())?;
    writeln!(out)?;
    if let Some(extra) = extra {
        write!(out, "{extra}")?;
        writeln!(out)?;
    }
    matrix_io::write_matrix(&mut out, rows)?;
    Ok(0)
}

fn check_num_vars(num_vars: usize) -> bool {
    if !(2..=MAX_NUM_VARS).contains(&num_vars) {
        tracing::error!(num_vars, "variable count must be in 2..=26");
        return false;
    }
    true
}

/// `elemental NUM_VARS`
pub fn elemental(num_vars: usize, notice: &AutogenNotice) -> Result<u8> {
    if !check_num_vars(num_vars) {
        return Ok(1);
    }
    let system = elemental_inequalities(num_vars);
    emit(notice, None, &system.into_rows())
}

fn build_cca(nf: usize, links: usize, ni: usize, with_iid: bool) -> Option<System> {
    if nf == 0 || !check_num_vars(nf + ni) {
        return None;
    }
    if links == 0 || links > ni {
        tracing::error!(links, ni, "fan-in must be 1..=NI");
        return None;
    }
    let mut system = elemental_inequalities(nf + ni);
    if with_iid {
        set_initial_state_iid(&mut system, nf, ni);
    }
    add_causal_constraints(&mut system, nf, ni, links);
    Some(system)
}

/// `init-cca NF [--links NL] [--initial NI]`
pub fn init_cca(nf: usize, links: usize, ni: usize, notice: &AutogenNotice) -> Result<u8> {
    let Some(mut system) = build_cca(nf, links, ni, true) else {
        return Ok(1);
    };
    minimize(&mut system, &mut TracingObserver)?;
    emit(notice, None, &system.into_rows())
}

/// `next-layer NF [--links NL] [--initial NI]`
///
/// Constraints computed for the previous layer arrive on stdin over the
/// `ni` initial variables and are injected into the high coordinates.
pub fn next_layer(nf: usize, links: usize, ni: usize, notice: &AutogenNotice) -> Result<u8> {
    let Some(mut system) = build_cca(nf, links, ni, false) else {
        return Ok(1);
    };
    let constraints = read_stdin_matrix()?;
    if !constraints.is_empty() {
        let vars = matrix_num_vars(&constraints)?;
        if vars != ni {
            tracing::error!(
                got = vars,
                expected = ni,
                "stdin constraints must span the initial layer"
            );
            return Ok(1);
        }
        for row in &constraints {
            system.add_inequality(row.injection(system.num_cols(), nf));
        }
    }
    minimize(&mut system, &mut TracingObserver)?;
    emit(notice, None, &system.into_rows())
}

fn order_comment(order: &[usize]) -> String {
    let mut out = String::from("# Elimination order:");
    for (index, col) in order.iter().enumerate() {
        if index % 10 == 0 {
            out.push_str("\n#  ");
        }
        out.push_str(&format!(" {col:3}"));
    }
    out.push('\n');
    out
}

/// `eliminate SOLVE_TO [--nontrivial]`
pub fn eliminate(target: usize, nontrivial: bool, notice: &AutogenNotice) -> Result<u8> {
    let matrix = read_stdin_matrix()?;
    if matrix.is_empty() {
        tracing::error!("no inequalities on stdin");
        return Ok(1);
    }
    let original = matrix.clone();
    let mut system = System::from_matrix(matrix)?;
    if target < 1 || target > system.num_cols() {
        tracing::error!(
            target,
            num_cols = system.num_cols(),
            "target column count out of range"
        );
        return Ok(1);
    }

    let mut order = Vec::new();
    solve_to(
        &mut system,
        target,
        &SolveOptions::default(),
        &mut TracingObserver,
        Some(&mut order),
    )?;
    minimize(&mut system, &mut TracingObserver)?;

    // When the reduced space is itself an entropy space, cross-check the
    // run: no fabricated rows, no lost elemental inequalities.
    if is_power_of_two(target) && !system.is_empty() {
        let report = verify_elimination(&original, &system.rows().to_vec())?;
        for row in &report.false_positives {
            tracing::error!(%row, "row not implied by the original system");
        }
        for row in &report.undiscovered {
            tracing::error!(%row, "elemental inequality not recovered");
        }
        if !report.is_consistent() {
            return Ok(1);
        }
    }

    let mut rows = system.into_rows();
    if nontrivial {
        rows = filter_nontrivial(&rows)?;
    }
    emit(notice, Some(&order_comment(&order)), &rows)
}

/// `minimize-system`
pub fn minimize_system(notice: &AutogenNotice) -> Result<u8> {
    let matrix = read_stdin_matrix()?;
    if matrix.is_empty() {
        tracing::error!("no inequalities on stdin");
        return Ok(1);
    }
    let mut system = System::from_matrix(matrix)?;
    minimize(&mut system, &mut TracingObserver)?;
    emit(notice, None, &system.into_rows())
}

fn report_implication(
    out: &mut impl Write,
    label_a: &str,
    label_b: &str,
    missing: &Matrix,
    print_rows: bool,
) -> Result<bool> {
    if missing.is_empty() {
        writeln!(out, "{label_a} implies {label_b}")?;
        return Ok(true);
    }
    writeln!(out, "{label_a} misses the following parts of {label_b}:")?;
    if print_rows {
        for row in missing {
            writeln!(out, "  {row}")?;
        }
    }
    Ok(false)
}

/// `check A B` / `diff A B`. Exit code bitmask: 1 = A misses parts of B,
/// 2 = B misses parts of A.
pub fn compare(file_a: &Path, file_b: &Path, print_rows: bool) -> Result<u8> {
    let a = read_file_matrix(file_a)?;
    let b = read_file_matrix(file_b)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut code = 0u8;
    if !report_implication(&mut out, "A", "B", &unimplied(&a, &b)?, print_rows)? {
        code |= 1;
    }
    if !report_implication(&mut out, "B", "A", &unimplied(&b, &a)?, print_rows)? {
        code |= 2;
    }
    Ok(code)
}

/// `check-shift FILE`
pub fn check_shift(file: &Path) -> Result<u8> {
    let matrix = read_file_matrix(file)?;
    if matrix.is_empty() {
        tracing::error!("no inequalities in {}", file.display());
        return Ok(1);
    }
    let report = check_shift_invariance(&matrix)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if report.is_invariant() {
        writeln!(out, "system is shift invariant")?;
        return Ok(0);
    }
    for (row, shifts) in &report.violations {
        writeln!(out, "no shifted counterpart for: {row}")?;
        for shift in shifts {
            writeln!(
                out,
                "  missing: {} (shift={shift})",
                entrocone_solver::shift_variables(row, matrix_num_vars(&matrix)? / 2, *shift)
            )?;
        }
    }
    Ok(1)
}
