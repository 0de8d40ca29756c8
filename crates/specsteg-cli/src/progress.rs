//! Console progress reporting.

use colored::Colorize;
use specsteg_codec::{ProgressSink, ProgressUpdate};

/// Prints one line per progress notification to stderr.
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    quiet: bool,
}

impl ConsoleProgress {
    /// Creates a reporter. A quiet reporter swallows every update, which keeps
    /// stdout and stderr clean for `--json` runs.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl ProgressSink for ConsoleProgress {
    fn report(&mut self, update: &ProgressUpdate) {
        if self.quiet {
            return;
        }
        eprintln!(
            "  {} {:>5.1}% {}",
            format!("{}:", update.stage).dimmed(),
            update.percent,
            format!("({:.2}s)", update.elapsed.as_secs_f64()).dimmed()
        );
    }
}
