//! Autogeneration header prepended to every emitted matrix.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Captures the invocation and measures the running time, rendered as `#`
/// comments at the top of the output.
pub struct AutogenNotice {
    argv: Vec<String>,
    started_at: u64,
    timer: Instant,
}

impl AutogenNotice {
    /// Capture the current command line and start the clock.
    pub fn capture() -> Self {
        Self {
            argv: std::env::args().collect(),
            started_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            timer: Instant::now(),
        }
    }

    /// Render the header comments, including the elapsed time so far.
    pub fn render(&self) -> String {
        format!(
            "# generated by: {}\n# date: {} (unix)\n# running time: {:.3}s\n",
            self.argv.join(" "),
            self.started_at,
            self.timer.elapsed().as_secs_f64(),
        )
    }
}
