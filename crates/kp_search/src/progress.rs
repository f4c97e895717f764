//! Progress reporting and cooperative cancellation for long scans.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Search stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    Dasha,
    Transit,
    Interlink,
}

impl Stage {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dasha => "dasha filter",
            Self::Transit => "transit filter",
            Self::Interlink => "interlink scan",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One progress sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub stage: Stage,
    /// Units (nodes or instants) processed so far in this stage.
    pub processed: u64,
    pub total: u64,
    pub elapsed: Duration,
    /// Linear extrapolation from `elapsed`; `None` before the first unit.
    pub eta: Option<Duration>,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }
}

/// Receiver of progress samples.
pub trait ProgressSink {
    fn report(&mut self, progress: Progress);
}

impl<F: FnMut(Progress)> ProgressSink for F {
    fn report(&mut self, progress: Progress) {
        self(progress)
    }
}

/// Forwards samples over a channel, e.g. to a UI thread.
#[derive(Debug, Clone)]
pub struct ChannelSink(pub Sender<Progress>);

impl ProgressSink for ChannelSink {
    fn report(&mut self, progress: Progress) {
        // A dropped receiver only means nobody is watching.
        let _ = self.0.send(progress);
    }
}

/// Discards every sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _progress: Progress) {}
}

/// Shared cancellation flag, checked at every step boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counts units for one stage and reports every `every` units.
pub(crate) struct StageMeter {
    stage: Stage,
    total: u64,
    every: u64,
    processed: u64,
    started: Instant,
}

impl StageMeter {
    pub(crate) fn new(stage: Stage, total: u64, every: u64) -> Self {
        Self {
            stage,
            total,
            every: every.max(1),
            processed: 0,
            started: Instant::now(),
        }
    }

    pub(crate) fn tick(&mut self, sink: &mut dyn ProgressSink) {
        self.processed += 1;
        if self.processed % self.every == 0 {
            sink.report(self.sample());
        }
    }

    pub(crate) fn finish(&mut self, sink: &mut dyn ProgressSink) {
        sink.report(self.sample());
    }

    fn sample(&self) -> Progress {
        let elapsed = self.started.elapsed();
        let eta = (self.processed > 0).then(|| {
            let remaining = self.total.saturating_sub(self.processed) as f64;
            elapsed.mul_f64(remaining / self.processed as f64)
        });
        Progress {
            stage: self.stage,
            processed: self.processed,
            total: self.total,
            elapsed,
            eta,
        }
    }
}
