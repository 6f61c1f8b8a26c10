//! Logger metrics for observability
//!
//! Counters shared by a handler and every handler derived from it. Since the
//! pipeline never reports failures to the caller, these are the only way to
//! observe sink errors, lost JSON deliveries and timeouts after the fact.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_pretty_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_text_written();
/// metrics.record_json_timed_out();
///
/// assert_eq!(metrics.text_written(), 1);
/// assert_eq!(metrics.json_timed_out(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Text blocks written to the output sink
    text_written: AtomicU64,

    /// Text blocks the output sink rejected
    text_failed: AtomicU64,

    /// JSON payloads for which the remote endpoint answered
    json_delivered: AtomicU64,

    /// JSON payloads lost to encoding or transport errors
    json_failed: AtomicU64,

    /// JSON payloads abandoned because the endpoint was too slow
    json_timed_out: AtomicU64,

    /// Events below the minimum level
    filtered: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            text_written: AtomicU64::new(0),
            text_failed: AtomicU64::new(0),
            json_delivered: AtomicU64::new(0),
            json_failed: AtomicU64::new(0),
            json_timed_out: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn text_written(&self) -> u64 {
        self.text_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn text_failed(&self) -> u64 {
        self.text_failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn json_delivered(&self) -> u64 {
        self.json_delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn json_failed(&self) -> u64 {
        self.json_failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn json_timed_out(&self) -> u64 {
        self.json_timed_out.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    /// Total JSON dispatch attempts, whatever their outcome
    pub fn json_attempts(&self) -> u64 {
        self.json_delivered() + self.json_failed() + self.json_timed_out()
    }

    #[inline]
    pub fn record_text_written(&self) -> u64 {
        self.text_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_text_failed(&self) -> u64 {
        self.text_failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_json_delivered(&self) -> u64 {
        self.json_delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_json_failed(&self) -> u64 {
        self.json_failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_json_timed_out(&self) -> u64 {
        self.json_timed_out.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.text_written.store(0, Ordering::Relaxed);
        self.text_failed.store(0, Ordering::Relaxed);
        self.json_delivered.store(0, Ordering::Relaxed);
        self.json_failed.store(0, Ordering::Relaxed);
        self.json_timed_out.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            text_written: AtomicU64::new(self.text_written()),
            text_failed: AtomicU64::new(self.text_failed()),
            json_delivered: AtomicU64::new(self.json_delivered()),
            json_failed: AtomicU64::new(self.json_failed()),
            json_timed_out: AtomicU64::new(self.json_timed_out()),
            filtered: AtomicU64::new(self.filtered()),
        }
    }
}
