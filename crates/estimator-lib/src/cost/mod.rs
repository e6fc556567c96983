//! Cost estimation: proportional allocation and optimization scenarios
//!
//! This module provides:
//! - Confidence-aware low/best/high ranges per namespace
//! - Threshold-gated savings scenarios (spot, idle, right-sizing, HPA)
//! - The cluster-level `CostEstimate` consumed by renderers

mod allocation;
mod scenarios;


pub use allocation::{
    confidence_label, confidence_score, CostRangeEstimator, NamespaceCostEstimate,
    BASE_CONFIDENCE, MAX_CONFIDENCE, MIN_CONFIDENCE, SPOT_DISCOUNT,
};
pub use scenarios::{
    abbreviate, OptimizationScenario, ScenarioGenerator, ScenarioKind, ScenarioRule,
    ScenarioThreshold, AUTOSCALING, CURRENT_COST_BAND, IDLE_DELETION, LARGE_CLUSTER_COST,
    RIGHT_SIZING, SPOT_MIGRATION, SYSTEM_NAMESPACES,
};

use crate::error::Result;
use crate::models::{CostRange, Level};
use crate::utilization::ClusterUtilization;
use serde::{Deserialize, Serialize};

/// Allocation method reported with every estimate
pub const METHOD_REQUEST_PROPORTIONAL: &str = "request_proportional";

const ASSUMPTIONS: [&str; 5] = [
    "Cost allocation based on CPU + Memory resource requests (not actual usage)",
    "Does NOT include: storage costs, networking egress, load balancers, public IPs",
    "Spot instance savings assume 70% discount vs on-demand",
    "Assumes proportional sharing of node costs across pods",
    "Cluster cost provided by user - not validated against actual cloud billing",
];

const DISCLAIMERS: [&str; 4] = [
    "These are ESTIMATES with ranges - not exact costs",
    "Actual costs depend on: VM sizes, reserved instances, spot pricing, node utilization",
    "Use your cloud provider's cost management tooling for actual billing data",
    "Optimization savings are potential - results may vary",
];

/// Cluster-level cost estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub total_cluster_cost: f64,
    pub method: String,
    pub confidence: Level,
    pub namespace_costs: Vec<NamespaceCostEstimate>,
    pub optimization_scenarios: Vec<OptimizationScenario>,
    pub total_savings_potential: CostRange,
    pub assumptions: Vec<String>,
    pub disclaimers: Vec<String>,
}

impl CostEstimate {
    pub fn namespace(&self, name: &str) -> Option<&NamespaceCostEstimate> {
        self.namespace_costs.iter().find(|ns| ns.namespace == name)
    }
}

/// Runs allocation and scenario generation over an analyzed cluster
pub struct CostAnalyzer<'a> {
    utilization: &'a ClusterUtilization,
}

impl<'a> CostAnalyzer<'a> {
    pub fn new(utilization: &'a ClusterUtilization) -> Self {
        Self { utilization }
    }

    /// Fails with `InvalidInput` when `total_cost` is not positive
    pub fn analyze(&self, total_cost: f64) -> Result<CostEstimate> {
        let estimator = CostRangeEstimator::new(total_cost)?;

        let namespace_costs = estimator.estimate_all(&self.utilization.namespaces);
        let optimization_scenarios = ScenarioGenerator::new(total_cost).generate(self.utilization);
        let total_savings_potential = optimization_scenarios.iter().map(|s| &s.savings).sum();

        Ok(CostEstimate {
            total_cluster_cost: total_cost,
            method: METHOD_REQUEST_PROPORTIONAL.to_string(),
            confidence: Level::Medium,
            namespace_costs,
            optimization_scenarios,
            total_savings_potential,
            assumptions: ASSUMPTIONS.iter().map(|s| s.to_string()).collect(),
            disclaimers: DISCLAIMERS.iter().map(|s| s.to_string()).collect(),
        })
    }
}
