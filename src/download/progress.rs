use std::time::{Duration, Instant};

/// Transfer state for a single download call.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadProgress {
    pub bytes_written: u64,
    /// Declared content length; 0 when the server did not send one.
    pub total_bytes: u64,
    pub started_at: Instant,
    /// Estimate computed after the most recent chunk, if one could be made.
    pub last_eta: Option<Duration>,
}

impl DownloadProgress {
    pub fn new(total_bytes: u64) -> Self {
        Self {
            bytes_written: 0,
            total_bytes,
            started_at: Instant::now(),
            last_eta: None,
        }
    }

    /// Account for `bytes` more written to disk.
    pub fn record(&mut self, bytes: u64) {
        self.record_at(bytes, Instant::now());
    }

    pub(crate) fn record_at(&mut self, bytes: u64, now: Instant) {
        self.bytes_written += bytes;
        self.last_eta = self.eta_at(now);
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Bytes per second so far.
    pub fn throughput(&self) -> Option<f64> {
        self.throughput_at(Instant::now())
    }

    fn throughput_at(&self, now: Instant) -> Option<f64> {
        let secs = now.saturating_duration_since(self.started_at).as_secs_f64();
        if secs <= 0.0 || self.bytes_written == 0 {
            return None;
        }
        Some(self.bytes_written as f64 / secs)
    }

    fn eta_at(&self, now: Instant) -> Option<Duration> {
        if self.total_bytes == 0 {
            return None;
        }
        let rate = self.throughput_at(now)?;
        if !rate.is_finite() || rate <= 0.0 {
            return None;
        }
        let remaining = self.total_bytes.saturating_sub(self.bytes_written);
        // Too large to represent means no usable estimate.
        Duration::try_from_secs_f64(remaining as f64 / rate).ok()
    }

    /// Completion percentage, or `None` when the total is unknown.
    pub fn percent(&self) -> Option<f64> {
        if self.total_bytes == 0 {
            return None;
        }
        Some((self.bytes_written as f64 / self.total_bytes as f64 * 100.0).min(100.0))
    }
}
