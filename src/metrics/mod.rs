//! Basic metrics instrumentation for tracking performance.
//!
//! Provides counters for lookups and scan outcomes, plus duration tracking
//! for HTTP requests made to the host.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by the lookup service and the host client.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Lookups that reached the scan phase
    lookups_total: Arc<AtomicU64>,

    /// Lookups rejected with a 400
    lookups_rejected_total: Arc<AtomicU64>,

    /// Users visited across all scans
    users_scanned_total: Arc<AtomicU64>,

    /// Candidates skipped for missing or unparseable phones
    candidates_skipped_total: Arc<AtomicU64>,

    /// Matches returned across all lookups
    matches_total: Arc<AtomicU64>,

    /// Total number of HTTP requests made to the host
    host_requests_total: Arc<AtomicU64>,

    /// Total number of failed host HTTP requests
    host_errors_total: Arc<AtomicU64>,

    /// Total duration of all host HTTP requests in milliseconds
    host_duration_total_ms: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            lookups_total: Arc::new(AtomicU64::new(0)),
            lookups_rejected_total: Arc::new(AtomicU64::new(0)),
            users_scanned_total: Arc::new(AtomicU64::new(0)),
            candidates_skipped_total: Arc::new(AtomicU64::new(0)),
            matches_total: Arc::new(AtomicU64::new(0)),
            host_requests_total: Arc::new(AtomicU64::new(0)),
            host_errors_total: Arc::new(AtomicU64::new(0)),
            host_duration_total_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record a finished scan.
    pub fn record_lookup(&self, scanned: usize, skipped: usize, matches: usize) {
        self.lookups_total.fetch_add(1, Ordering::Relaxed);
        self.users_scanned_total
            .fetch_add(scanned as u64, Ordering::Relaxed);
        self.candidates_skipped_total
            .fetch_add(skipped as u64, Ordering::Relaxed);
        self.matches_total
            .fetch_add(matches as u64, Ordering::Relaxed);
    }

    /// Record a lookup rejected before scanning.
    pub fn record_rejected_lookup(&self) {
        self.lookups_rejected_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a host HTTP request with duration.
    pub fn record_host_request(&self, duration: Duration) {
        self.host_requests_total.fetch_add(1, Ordering::Relaxed);
        self.host_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record a host HTTP error.
    pub fn record_host_error(&self) {
        self.host_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn lookups_total(&self) -> u64 {
        self.lookups_total.load(Ordering::Relaxed)
    }

    pub fn lookups_rejected_total(&self) -> u64 {
        self.lookups_rejected_total.load(Ordering::Relaxed)
    }

    pub fn users_scanned_total(&self) -> u64 {
        self.users_scanned_total.load(Ordering::Relaxed)
    }

    pub fn candidates_skipped_total(&self) -> u64 {
        self.candidates_skipped_total.load(Ordering::Relaxed)
    }

    pub fn matches_total(&self) -> u64 {
        self.matches_total.load(Ordering::Relaxed)
    }

    pub fn host_requests_total(&self) -> u64 {
        self.host_requests_total.load(Ordering::Relaxed)
    }

    pub fn host_errors_total(&self) -> u64 {
        self.host_errors_total.load(Ordering::Relaxed)
    }

    pub fn host_duration_total_ms(&self) -> u64 {
        self.host_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average host request duration in milliseconds.
    pub fn host_duration_avg_ms(&self) -> f64 {
        let total = self.host_duration_total_ms.load(Ordering::Relaxed);
        let count = self.host_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            lookups_total: self.lookups_total(),
            lookups_rejected_total: self.lookups_rejected_total(),
            users_scanned_total: self.users_scanned_total(),
            candidates_skipped_total: self.candidates_skipped_total(),
            matches_total: self.matches_total(),
            host_requests_total: self.host_requests_total(),
            host_errors_total: self.host_errors_total(),
            host_duration_avg_ms: self.host_duration_avg_ms(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub lookups_total: u64,
    pub lookups_rejected_total: u64,
    pub users_scanned_total: u64,
    pub candidates_skipped_total: u64,
    pub matches_total: u64,
    pub host_requests_total: u64,
    pub host_errors_total: u64,
    pub host_duration_avg_ms: f64,
}

/// Helper for timing host HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        self.metrics.record_host_request(self.start.elapsed());
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        self.metrics.record_host_request(self.start.elapsed());
        self.metrics.record_host_error();
    }
}
