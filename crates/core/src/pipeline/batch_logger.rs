use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

/// Cross-cutting logger for batch events.
///
/// Keeps the executor free of any particular output mechanism.
pub trait BatchLogger: Send {
    /// Report item-level progress. `total` is `None` for streams.
    fn progress(&mut self, current: usize, total: Option<usize>);

    /// Record how long a named stage took for one image.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// An image was cropped and written.
    fn passed(&mut self, label: &str, output: &Path);

    /// An image was skipped or failed.
    fn failed(&mut self, label: &str, error: &str);

    fn info(&mut self, message: &str);

    /// Emit an end-of-batch summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullBatchLogger;

impl BatchLogger for NullBatchLogger {
    fn progress(&mut self, _current: usize, _total: Option<usize>) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn passed(&mut self, _label: &str, _output: &Path) {}
    fn failed(&mut self, _label: &str, _error: &str) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI logger writing through the `log` facade.
///
/// Tracks per-stage timings and pass/fail counts for the summary.
pub struct LogBatchLogger {
    timings: HashMap<String, Vec<f64>>,
    start_time: Instant,
    passed: usize,
    failed: usize,
}

impl LogBatchLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            start_time: Instant::now(),
            passed: 0,
            failed: 0,
        }
    }

    /// Returns the formatted summary string, or `None` if nothing was seen.
    pub fn summary_string(&self) -> Option<String> {
        let images = self.passed + self.failed;
        if images == 0 {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Batch summary ({} processed, {} failed, {:.1}s total):",
            self.passed,
            self.failed,
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = total_ms / durations.len() as f64;
            lines.push(format!(
                "  {stage:8}: avg {avg_ms:6.1}ms  total {total_ms:7.0}ms"
            ));
        }

        if elapsed_ms > 0.0 {
            let rate = images as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {rate:.1} images/s"));
        }

        Some(lines.join("\n"))
    }
}

impl Default for LogBatchLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchLogger for LogBatchLogger {
    fn progress(&mut self, current: usize, total: Option<usize>) {
        match total {
            Some(total) if total > 0 => {
                let pct = current as f64 / total as f64 * 100.0;
                log::debug!("Processing: {current}/{total} images ({pct:.1}%)");
            }
            _ => log::debug!("Processing: {current} images"),
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn passed(&mut self, label: &str, output: &Path) {
        self.passed += 1;
        log::info!("PASS: processed file {label} -> {}", output.display());
    }

    fn failed(&mut self, label: &str, error: &str) {
        self.failed += 1;
        log::warn!("skipping {label}: {error}");
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(s) = self.summary_string() {
            log::info!("{s}");
        }
    }
}
