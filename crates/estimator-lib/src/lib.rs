//! Quantitative estimation engine for Kubernetes cost and security risk
//!
//! This crate turns an immutable snapshot of cluster facts into:
//! - Per-namespace utilization, waste scores and flags
//! - Confidence-aware cost ranges and optimization scenarios
//! - Financial exposure for security misconfigurations
//! - Remediation plans with ROI and payback
//!
//! Every computation is pure: the same snapshot always yields the same result.

pub mod cost;
pub mod engine;
pub mod error;
pub mod models;
pub mod observability;
pub mod risk;
pub mod utilization;

pub use engine::{CostReport, EstimationReport, Estimator, ReportRequest, Section};
pub use error::{EstimationError, Result};
pub use models::*;
pub use observability::{EstimatorMetrics, StructuredLogger};
