//! HTTP request handlers for the analysis API.

pub mod analyze;
pub mod health;

pub use analyze::{analyze_handler, AnalysisResponse, AnalyzeRequest};
pub use health::{health_handler, landing_handler, metrics_handler, status_handler};
