//! Request metrics.
//!
//! Counters are kept twice: as atomics for the JSON status view and through
//! the `metrics` facade for the Prometheus exporter.

use std::sync::atomic::{AtomicU64, Ordering};

use metrics::{counter, histogram};
use serde::Serialize;

#[derive(Debug, Default)]
pub struct AnalysisMetrics {
    requests: AtomicU64,
    errors: AtomicU64,
    completed: AtomicU64,
    hotspots: AtomicU64,
    total_duration_ms: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub errors: u64,
    pub completed: u64,
    pub hotspots: u64,
    pub avg_duration_ms: f64,
}

impl AnalysisMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        counter!("analysis_requests_total").increment(1);
    }

    pub fn record_error(&self, status: u16) {
        self.errors.fetch_add(1, Ordering::Relaxed);
        counter!("analysis_errors_total", "status" => status.to_string()).increment(1);
    }

    pub fn record_success(&self, duration_ms: u64, hotspots: usize) {
        self.completed.fetch_add(1, Ordering::Relaxed);
        self.hotspots.fetch_add(hotspots as u64, Ordering::Relaxed);
        self.total_duration_ms.fetch_add(duration_ms, Ordering::Relaxed);
        histogram!("analysis_duration_ms").record(duration_ms as f64);
        histogram!("analysis_hotspots").record(hotspots as f64);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let completed = self.completed.load(Ordering::Relaxed);
        let total = self.total_duration_ms.load(Ordering::Relaxed);
        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            completed,
            hotspots: self.hotspots.load(Ordering::Relaxed),
            avg_duration_ms: if completed > 0 {
                total as f64 / completed as f64
            } else {
                0.0
            },
        }
    }

    /// Prometheus text for when no exporter is installed.
    pub fn render_text(&self) -> String {
        let s = self.snapshot();
        format!(
            "# HELP analysis_requests_total Total analysis requests\n\
             # TYPE analysis_requests_total counter\n\
             analysis_requests_total {}\n\
             # HELP analysis_errors_total Failed analysis requests\n\
             # TYPE analysis_errors_total counter\n\
             analysis_errors_total {}\n\
             # HELP analysis_hotspots_total Hotspots returned\n\
             # TYPE analysis_hotspots_total counter\n\
             analysis_hotspots_total {}\n",
            s.requests, s.errors, s.hotspots
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_average() {
        let m = AnalysisMetrics::new();
        m.record_request();
        m.record_request();
        m.record_success(10, 3);
        m.record_success(30, 1);
        m.record_error(400);

        let s = m.snapshot();
        assert_eq!(s.requests, 2);
        assert_eq!(s.errors, 1);
        assert_eq!(s.hotspots, 4);
        assert_eq!(s.avg_duration_ms, 20.0);
        assert!(m.render_text().contains("analysis_requests_total 2"));
    }
}
