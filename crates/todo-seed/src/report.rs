//! Throughput accounting for seeding runs.

use std::fmt;
use std::time::Duration;

use tracing::info;

/// Accumulated timing and row counts across the batches of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    batches: u64,
    failed_batches: u64,
    records_requested: u64,
    records_inserted: u64,
    total_elapsed: Duration,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one batch of `requested` records that took `elapsed`.
    ///
    /// `inserted` is `None` for a failed batch: its time still counts, its rows do not.
    pub fn record(&mut self, requested: usize, elapsed: Duration, inserted: Option<usize>) {
        self.batches += 1;
        self.records_requested += requested as u64;
        self.total_elapsed += elapsed;
        match inserted {
            Some(rows) => self.records_inserted += rows as u64,
            None => self.failed_batches += 1,
        }
    }

    pub fn batches(&self) -> u64 {
        self.batches
    }

    pub fn failed_batches(&self) -> u64 {
        self.failed_batches
    }

    pub fn records_requested(&self) -> u64 {
        self.records_requested
    }

    pub fn records_inserted(&self) -> u64 {
        self.records_inserted
    }

    pub fn total_elapsed(&self) -> Duration {
        self.total_elapsed
    }

    /// Mean wall-clock time per batch, zero before the first batch.
    pub fn average_batch_time(&self) -> Duration {
        match u32::try_from(self.batches) {
            Ok(0) => Duration::ZERO,
            Ok(batches) => self.total_elapsed / batches,
            Err(_) => Duration::from_secs_f64(self.total_elapsed.as_secs_f64() / self.batches as f64),
        }
    }

    /// Requested records divided by total elapsed time.
    pub fn records_per_second(&self) -> f64 {
        let secs = self.total_elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.records_requested as f64 / secs
    }

    /// Logs the final summary.
    pub fn log_summary(&self) {
        for line in self.to_string().lines() {
            info!("{line}");
        }
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "--------------------------------------------------";
        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "Total time taken for bulk inserting: {:.2} seconds",
            self.total_elapsed.as_secs_f64()
        )?;
        writeln!(
            f,
            "Average time per batch: {:.3} seconds",
            self.average_batch_time().as_secs_f64()
        )?;
        writeln!(
            f,
            "Records per second: {}",
            group_thousands(self.records_per_second().round() as u64)
        )?;
        writeln!(
            f,
            "Rows inserted: {} of {} ({} failed batches)",
            group_thousands(self.records_inserted),
            group_thousands(self.records_requested),
            self.failed_batches
        )?;
        write!(f, "{RULE}")
    }
}

/// Formats `n` with comma thousands separators.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
