//! Observability infrastructure for the estimation engine
//!
//! Provides:
//! - Prometheus metrics (pipeline latency, estimate counts, errors, active profile)
//! - Structured logging with tracing

use prometheus::{
    register_gauge_vec, register_histogram, register_int_counter, register_int_counter_vec,
    register_int_gauge, GaugeVec, Histogram, IntCounter, IntCounterVec, IntGauge,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Latency buckets in seconds. Estimates are pure arithmetic, so most land
/// in the sub-millisecond buckets.
const LATENCY_BUCKETS: &[f64] = &[
    0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<EstimatorMetricsInner> = OnceLock::new();

struct EstimatorMetricsInner {
    cost_latency_seconds: Histogram,
    risk_latency_seconds: Histogram,
    cost_estimates: IntCounter,
    risk_analyses: IntCounter,
    scenarios_emitted: IntCounter,
    estimation_errors: IntCounterVec,
    namespaces_analyzed: IntGauge,
    industry_profile_info: GaugeVec,
}

impl EstimatorMetricsInner {
    fn new() -> Self {
        Self {
            cost_latency_seconds: register_histogram!(
                "cost_estimator_cost_latency_seconds",
                "Time spent computing utilization and cost estimates",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register cost_latency_seconds"),

            risk_latency_seconds: register_histogram!(
                "cost_estimator_risk_latency_seconds",
                "Time spent computing risk exposure and remediation plans",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register risk_latency_seconds"),

            cost_estimates: register_int_counter!(
                "cost_estimator_cost_estimates_total",
                "Total number of cost estimates produced"
            )
            .expect("Failed to register cost_estimates"),

            risk_analyses: register_int_counter!(
                "cost_estimator_risk_analyses_total",
                "Total number of risk analyses produced"
            )
            .expect("Failed to register risk_analyses"),

            scenarios_emitted: register_int_counter!(
                "cost_estimator_scenarios_emitted_total",
                "Total number of optimization scenarios emitted"
            )
            .expect("Failed to register scenarios_emitted"),

            estimation_errors: register_int_counter_vec!(
                "cost_estimator_errors_total",
                "Total number of failed estimations by error kind",
                &["kind"]
            )
            .expect("Failed to register estimation_errors"),

            namespaces_analyzed: register_int_gauge!(
                "cost_estimator_namespaces_analyzed",
                "Number of namespaces in the most recent cost estimate"
            )
            .expect("Failed to register namespaces_analyzed"),

            industry_profile_info: register_gauge_vec!(
                "cost_estimator_industry_profile_info",
                "Industry profile used by the most recent risk analysis",
                &["industry"]
            )
            .expect("Failed to register industry_profile_info"),
        }
    }
}

/// Estimator metrics for Prometheus exposition
///
/// A lightweight handle to the global metrics instance. Clones share the
/// same underlying metrics.
#[derive(Clone)]
pub struct EstimatorMetrics {
    _private: (),
}

impl Default for EstimatorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl EstimatorMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(EstimatorMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &EstimatorMetricsInner {
        GLOBAL_METRICS.get_or_init(EstimatorMetricsInner::new)
    }

    pub fn observe_cost_latency(&self, duration_secs: f64) {
        self.inner().cost_latency_seconds.observe(duration_secs);
    }

    pub fn observe_risk_latency(&self, duration_secs: f64) {
        self.inner().risk_latency_seconds.observe(duration_secs);
    }

    /// Record a completed cost estimate
    pub fn record_cost_estimate(&self, namespaces: usize, scenarios: usize) {
        let inner = self.inner();
        inner.cost_estimates.inc();
        inner.scenarios_emitted.inc_by(scenarios as u64);
        inner.namespaces_analyzed.set(namespaces as i64);
    }

    /// Record a completed risk analysis and the profile it used
    pub fn record_risk_analysis(&self, industry: &str) {
        let inner = self.inner();
        inner.risk_analyses.inc();
        inner.industry_profile_info.reset();
        inner
            .industry_profile_info
            .with_label_values(&[industry])
            .set(1.0);
    }

    pub fn inc_errors(&self, kind: &str) {
        self.inner().estimation_errors.with_label_values(&[kind]).inc();
    }
}

/// Structured logger for estimator events
#[derive(Clone)]
pub struct StructuredLogger {
    cluster: String,
}

impl StructuredLogger {
    pub fn new(cluster: impl Into<String>) -> Self {
        Self {
            cluster: cluster.into(),
        }
    }

    pub fn log_cost_estimate(
        &self,
        total_cost: f64,
        namespaces: usize,
        scenarios: usize,
        savings_best: f64,
        elapsed_ms: f64,
    ) {
        info!(
            event = "cost_estimate_completed",
            cluster = %self.cluster,
            total_cost = total_cost,
            namespaces = namespaces,
            scenarios = scenarios,
            savings_best = savings_best,
            elapsed_ms = elapsed_ms,
            "Cost estimate completed"
        );
    }

    pub fn log_risk_analysis(
        &self,
        industry: &str,
        categories: usize,
        exposure_best: f64,
        remediation_cost: f64,
        elapsed_ms: f64,
    ) {
        info!(
            event = "risk_analysis_completed",
            cluster = %self.cluster,
            industry = %industry,
            categories = categories,
            exposure_best = exposure_best,
            remediation_cost = remediation_cost,
            elapsed_ms = elapsed_ms,
            "Risk analysis completed"
        );
    }

    /// Log a failed computation
    pub fn log_failure(&self, pipeline: &str, kind: &str, error: &str) {
        warn!(
            event = "estimation_failed",
            cluster = %self.cluster,
            pipeline = %pipeline,
            kind = %kind,
            error = %error,
            "Estimation failed"
        );
    }

    pub fn log_startup(&self, version: &str, port: u16, default_industry: &str) {
        info!(
            event = "service_started",
            cluster = %self.cluster,
            version = %version,
            port = port,
            default_industry = %default_industry,
            "Estimator service started"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            cluster = %self.cluster,
            reason = %reason,
            "Estimator service shutting down"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimator_metrics_creation() {
        // Registration goes through the global Prometheus registry, so every
        // handle in the test process shares one instance.
        let metrics = EstimatorMetrics::new();
        let other = EstimatorMetrics::new();

        metrics.observe_cost_latency(0.0002);
        metrics.observe_risk_latency(0.0001);
        metrics.record_cost_estimate(12, 3);
        other.record_risk_analysis("pharma");
        other.inc_errors("invalid_input");
    }

    #[test]
    fn test_structured_logger_creation() {
        let logger = StructuredLogger::new("prod-aks");
        assert_eq!(logger.cluster, "prod-aks");
        logger.log_failure("cost", "invalid_input", "total cluster cost must be greater than 0");
    }
}
