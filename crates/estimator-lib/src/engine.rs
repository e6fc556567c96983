//! Estimator facade
//!
//! Runs the cost and risk pipelines over a fact snapshot, recording metrics
//! and structured log events for each run.

use crate::cost::{CostAnalyzer, CostEstimate};
use crate::error::{EstimationError, Result};
use crate::models::FactSnapshot;
use crate::observability::{EstimatorMetrics, StructuredLogger};
use crate::risk::{profile_for, IndustryProfile, RiskCostAnalysis, RiskCostAnalyzer};
use crate::utilization::{ClusterUtilization, UtilizationAnalyzer};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Cost estimate together with the utilization it was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    pub utilization: ClusterUtilization,
    pub estimate: CostEstimate,
}

/// A report section. Failed computations never yield partial data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Section<T> {
    Available { data: T },
    Unavailable { reason: String },
}

impl<T> Section<T> {
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(data) => Section::Available { data },
            Err(err) => Section::Unavailable {
                reason: err.to_string(),
            },
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Section::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Section::Available { data } => Some(data),
            Section::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Section::Available { .. })
    }
}

/// Options for a combined report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Cost analysis is skipped when absent
    #[serde(default)]
    pub monthly_cost: Option<f64>,
    /// Industry name or alias; generic when absent
    #[serde(default)]
    pub industry: Option<String>,
}

/// Combined cost and risk report for one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    pub costs: Section<CostReport>,
    pub risk: Section<RiskCostAnalysis>,
}

pub const MISSING_MONTHLY_COST: &str = "monthly cluster cost not provided";

/// Entry point to the estimation engine
#[derive(Clone)]
pub struct Estimator {
    metrics: EstimatorMetrics,
    logger: StructuredLogger,
}

impl Estimator {
    pub fn new(cluster: impl Into<String>) -> Self {
        Self {
            metrics: EstimatorMetrics::new(),
            logger: StructuredLogger::new(cluster),
        }
    }

    pub fn logger(&self) -> &StructuredLogger {
        &self.logger
    }

    /// Utilization analysis followed by cost allocation and scenarios
    pub fn estimate_costs(&self, snapshot: &FactSnapshot, monthly_cost: f64) -> Result<CostReport> {
        let start = Instant::now();
        let result = run_costs(snapshot, monthly_cost);
        let elapsed = start.elapsed().as_secs_f64();
        self.metrics.observe_cost_latency(elapsed);

        match &result {
            Ok(report) => {
                let estimate = &report.estimate;
                self.metrics.record_cost_estimate(
                    estimate.namespace_costs.len(),
                    estimate.optimization_scenarios.len(),
                );
                self.logger.log_cost_estimate(
                    monthly_cost,
                    estimate.namespace_costs.len(),
                    estimate.optimization_scenarios.len(),
                    estimate.total_savings_potential.best,
                    elapsed * 1000.0,
                );
            }
            Err(err) => self.record_failure("cost", err),
        }
        result
    }

    /// Exposure, remediation plan and recommendations under `profile`
    pub fn analyze_risk(
        &self,
        snapshot: &FactSnapshot,
        profile: &IndustryProfile,
    ) -> Result<RiskCostAnalysis> {
        let start = Instant::now();
        // Namespace facts belong to the cost pipeline
        let result = snapshot
            .security
            .validate()
            .and_then(|_| RiskCostAnalyzer::new(profile).analyze(&snapshot.security));
        let elapsed = start.elapsed().as_secs_f64();
        self.metrics.observe_risk_latency(elapsed);

        match &result {
            Ok(analysis) => {
                self.metrics.record_risk_analysis(profile.industry.as_str());
                self.logger.log_risk_analysis(
                    profile.industry.as_str(),
                    analysis.risk_categories.len(),
                    analysis.total_risk_exposure.best,
                    analysis.remediation_plan.estimated_cost,
                    elapsed * 1000.0,
                );
            }
            Err(err) => self.record_failure("risk", err),
        }
        result
    }

    /// Both pipelines. Each section fails independently.
    pub fn report(&self, snapshot: &FactSnapshot, request: &ReportRequest) -> EstimationReport {
        let costs = match request.monthly_cost {
            Some(monthly_cost) => Section::from_result(self.estimate_costs(snapshot, monthly_cost)),
            None => Section::unavailable(MISSING_MONTHLY_COST),
        };

        let profile = profile_for(request.industry.as_deref().unwrap_or_default());
        let risk = Section::from_result(self.analyze_risk(snapshot, &profile));

        EstimationReport {
            cluster: snapshot.cluster.clone(),
            costs,
            risk,
        }
    }

    fn record_failure(&self, pipeline: &str, err: &EstimationError) {
        self.metrics.inc_errors(err.kind());
        self.logger.log_failure(pipeline, err.kind(), &err.to_string());
    }
}

fn run_costs(snapshot: &FactSnapshot, monthly_cost: f64) -> Result<CostReport> {
    snapshot.validate_namespaces()?;
    let utilization = UtilizationAnalyzer::new().analyze(&snapshot.namespaces, &snapshot.capacity)?;
    let estimate = CostAnalyzer::new(&utilization).analyze(monthly_cost)?;
    Ok(CostReport {
        utilization,
        estimate,
    })
}
