//! Progress reporting for long encode/decode runs.
//!
//! The stream assembler notifies a [`ProgressSink`] whenever the processed
//! share of the input grows by at least `progress_every` percent. Closures
//! taking `&ProgressUpdate` implement the trait directly.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Which operation is reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Payload to carrier.
    Encode,
    /// Carrier to payload.
    Decode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Encode => f.write_str("encode"),
            Stage::Decode => f.write_str("decode"),
        }
    }
}

/// One progress notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressUpdate {
    /// Reporting operation.
    pub stage: Stage,
    /// Percent of the input processed so far.
    pub percent: f64,
    /// Time since the operation started.
    pub elapsed: Duration,
    /// Input units processed (bytes on encode, samples on decode).
    pub processed: usize,
    /// Total input units.
    pub total: usize,
}

/// Receives progress notifications.
pub trait ProgressSink {
    /// Called at the configured cadence.
    fn report(&mut self, update: &ProgressUpdate);
}

/// Discards all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _update: &ProgressUpdate) {}
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressUpdate),
{
    fn report(&mut self, update: &ProgressUpdate) {
        self(update)
    }
}

/// Tracks processed units and decides when to notify.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    stage: Stage,
    total: usize,
    every: f64,
    last_percent: f64,
    start: Instant,
}

impl ProgressTracker {
    pub(crate) fn new(stage: Stage, total: usize, every: f64) -> Self {
        Self {
            stage,
            total,
            every,
            last_percent: 0.0,
            start: Instant::now(),
        }
    }

    /// Records that `processed` units are done and notifies if due.
    pub(crate) fn advance(&mut self, processed: usize, sink: &mut dyn ProgressSink) {
        if self.total == 0 {
            return;
        }
        let percent = processed as f64 * 100.0 / self.total as f64;
        if percent - self.last_percent >= self.every {
            self.last_percent = percent;
            sink.report(&ProgressUpdate {
                stage: self.stage,
                percent,
                elapsed: self.start.elapsed(),
                processed,
                total: self.total,
            });
        }
    }
}
