//! Structured progress reporting for the summarization pipeline.
//!
//! Provides observable, incremental feedback during long-running runs:
//! chunking, filtering, per-batch summarization with a linear ETA, and the
//! final combine step.

use std::sync::Arc;
use std::time::Instant;

/// Progress event emitted during a pipeline run.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    /// Phase of the run: "split", "filter", "section", "batch", "combine",
    /// "write"
    pub phase: String,

    /// Current progress within the phase
    pub current: u64,

    /// Total expected work (if known)
    pub total: Option<u64>,

    /// Percentage complete (0.0 - 100.0)
    pub percentage: Option<f64>,

    /// Human-readable message
    pub message: String,

    /// Elapsed time since the run started
    pub elapsed_secs: Option<f64>,

    /// Estimated seconds remaining (linear estimate)
    pub eta_secs: Option<f64>,
}

impl ProgressEvent {
    /// Create a new progress event.
    pub fn new(
        phase: impl Into<String>,
        current: u64,
        total: Option<u64>,
        message: impl Into<String>,
    ) -> Self {
        let percentage =
            total.map(|t| if t > 0 { (current as f64 / t as f64) * 100.0 } else { 0.0 });

        Self {
            phase: phase.into(),
            current,
            total,
            percentage,
            message: message.into(),
            elapsed_secs: None,
            eta_secs: None,
        }
    }

    /// Set elapsed time.
    pub fn with_elapsed(mut self, elapsed_secs: f64) -> Self {
        self.elapsed_secs = Some(elapsed_secs);
        self
    }

    /// Set the estimated time remaining.
    pub fn with_eta(mut self, eta_secs: f64) -> Self {
        self.eta_secs = Some(eta_secs);
        self
    }

    /// Format as a simple user-facing line.
    pub fn format_simple(&self) -> String {
        let progress = if let Some(total) = self.total {
            format!("{}/{}", self.current, total)
        } else {
            format!("{}", self.current)
        };

        let pct = if let Some(p) = self.percentage {
            format!(" ({:.0}%)", p)
        } else {
            String::new()
        };

        let eta = if let Some(e) = self.eta_secs {
            format!(" — est. remaining {:.1}s ({:.1}m)", e, e / 60.0)
        } else {
            String::new()
        };

        format!("[{}] {}{} - {}{}", self.phase, progress, pct, self.message, eta)
    }
}

/// Callback for progress events.
pub type ProgressCallback = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

/// Progress reporter that emits events through a callback.
#[derive(Clone)]
pub struct ProgressReporter {
    callback: Option<ProgressCallback>,
    start_time: Arc<Instant>,
}

impl ProgressReporter {
    /// Create a new reporter with a callback.
    pub fn new(callback: ProgressCallback) -> Self {
        Self {
            callback: Some(callback),
            start_time: Arc::new(Instant::now()),
        }
    }

    /// Create a no-op reporter (no events emitted).
    pub fn noop() -> Self {
        Self {
            callback: None,
            start_time: Arc::new(Instant::now()),
        }
    }

    /// Seconds since the run started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Emit a progress event.
    pub fn emit(&self, event: ProgressEvent) {
        if let Some(callback) = &self.callback {
            let event = event.with_elapsed(self.elapsed_secs());

            tracing::debug!(
                phase = %event.phase,
                current = event.current,
                total = ?event.total,
                message = %event.message,
                eta_secs = ?event.eta_secs,
                "Progress event"
            );

            callback(event);
        }
    }

    /// Emit a chunking event.
    pub fn split(&self, chunks: u64) {
        self.emit(ProgressEvent::new(
            "split",
            chunks,
            None,
            format!("{} chunks created", chunks),
        ));
    }

    /// Emit a keyword-filtering event.
    pub fn filter(&self, selected: u64, total: u64) {
        self.emit(ProgressEvent::new(
            "filter",
            selected,
            Some(total),
            format!("{} of {} chunks selected", selected, total),
        ));
    }

    /// Emit a section-extraction event.
    pub fn section(&self, label: &str, chars: u64) {
        let message = if chars > 0 {
            format!("{}: {} characters extracted", label, chars)
        } else {
            format!("{}: section not found", label)
        };
        self.emit(ProgressEvent::new("section", chars, None, message));
    }

    /// Emit a per-batch summarization event with a linear ETA: cumulative
    /// elapsed divided by batches completed, times batches remaining.
    pub fn batch(&self, completed: u64, total: u64, batch_elapsed_secs: f64) {
        let mut event = ProgressEvent::new(
            "batch",
            completed,
            Some(total),
            format!("batch took {:.1}s", batch_elapsed_secs),
        );

        if completed > 0 {
            let avg = self.elapsed_secs() / completed as f64;
            let remaining = total.saturating_sub(completed);
            event = event.with_eta(avg * remaining as f64);
        }

        self.emit(event);
    }

    /// Emit a combine-step event.
    pub fn combine(&self, units: u64) {
        self.emit(ProgressEvent::new(
            "combine",
            units,
            None,
            format!("combining {} units into the final summary", units),
        ));
    }

    /// Emit a write event.
    pub fn write(&self, path: &str) {
        self.emit(ProgressEvent::new("write", 1, Some(1), format!("saved to {}", path)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_progress_event_format() {
        let event = ProgressEvent::new("batch", 5, Some(10), "batch took 2.0s");
        let formatted = event.format_simple();
        assert!(formatted.contains("[batch]"));
        assert!(formatted.contains("5/10"));
        assert!(formatted.contains("50%"));
    }

    #[test]
    fn test_eta_in_formatted_line() {
        let event = ProgressEvent::new("batch", 1, Some(3), "batch took 2.0s").with_eta(120.0);
        let formatted = event.format_simple();
        assert!(formatted.contains("est. remaining 120.0s"));
        assert!(formatted.contains("(2.0m)"));
    }

    #[test]
    fn test_reporter_emits_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        let reporter = ProgressReporter::new(Arc::new(move |event| {
            events_clone.lock().unwrap().push(event);
        }));

        reporter.batch(1, 4, 2.5);

        let captured = events.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].phase, "batch");
        assert_eq!(captured[0].current, 1);
        assert!(captured[0].eta_secs.is_some());
    }

    #[test]
    fn test_noop_reporter() {
        let reporter = ProgressReporter::noop();
        reporter.split(3);
        reporter.batch(1, 2, 0.1);
    }
}
