//! Application state for the analysis API.

use std::time::Instant;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AnalysisConfig;
use crate::metrics::AnalysisMetrics;

/// Shared application state.
pub struct AppState {
    /// Service defaults. Requests override per call.
    pub config: AnalysisConfig,

    pub metrics: AnalysisMetrics,

    /// Installed Prometheus recorder, if any.
    pub prometheus: Option<PrometheusHandle>,

    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            metrics: AnalysisMetrics::new(),
            prometheus: None,
            started_at: Instant::now(),
        }
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
