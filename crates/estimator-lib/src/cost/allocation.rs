//! Proportional cost allocation with confidence-scaled ranges

use crate::error::{EstimationError, Result};
use crate::models::{CostRange, Level};
use crate::utilization::NamespaceUtilization;
use serde::{Deserialize, Serialize};

/// Starting confidence before namespace adjustments
pub const BASE_CONFIDENCE: f64 = 0.5;

/// Lower clamp for confidence
pub const MIN_CONFIDENCE: f64 = 0.3;

/// Upper clamp for confidence
pub const MAX_CONFIDENCE: f64 = 0.9;

/// Discount applied to the spot-eligible portion in the low estimate
pub const SPOT_DISCOUNT: f64 = 0.7;

/// Share of uncertainty applied on each side of the best estimate
const UNCERTAINTY_SPREAD: f64 = 0.5;

/// Estimated monthly cost of one namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceCostEstimate {
    pub namespace: String,
    pub estimated_cost: CostRange,
    pub cpu_share: f64,
    pub memory_share: f64,
    pub weighted_share: f64,
    pub confidence: Level,
    /// Numeric confidence in `[MIN_CONFIDENCE, MAX_CONFIDENCE]`
    pub confidence_score: f64,
}

/// Allocates a monthly cluster cost across namespaces
#[derive(Debug, Clone, Copy)]
pub struct CostRangeEstimator {
    total_cost: f64,
}

impl CostRangeEstimator {
    /// Fails with `InvalidInput` unless `total_cost` is a positive number
    pub fn new(total_cost: f64) -> Result<Self> {
        if !total_cost.is_finite() || total_cost <= 0.0 {
            return Err(EstimationError::invalid(format!(
                "total cluster cost must be greater than 0 (got {total_cost})"
            )));
        }
        Ok(Self { total_cost })
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Best-estimate monthly cost of a namespace
    pub fn allocated_cost(&self, usage: &NamespaceUtilization) -> f64 {
        self.total_cost * usage.weighted_share
    }

    pub fn estimate(&self, usage: &NamespaceUtilization) -> NamespaceCostEstimate {
        let base = self.allocated_cost(usage);
        let confidence = confidence_score(usage);

        NamespaceCostEstimate {
            namespace: usage.fact.name.clone(),
            estimated_cost: cost_range(base, confidence, usage),
            cpu_share: usage.cpu_percent / 100.0,
            memory_share: usage.mem_percent / 100.0,
            weighted_share: usage.weighted_share,
            confidence: confidence_label(usage.weighted_share),
            confidence_score: confidence,
        }
    }

    pub fn estimate_all(&self, namespaces: &[NamespaceUtilization]) -> Vec<NamespaceCostEstimate> {
        namespaces.iter().map(|ns| self.estimate(ns)).collect()
    }
}

/// Low/best/high around the proportional base cost.
///
/// The low end assumes the spot-eligible slice moves to discounted capacity;
/// the high end adds likely waste. Both widen as confidence drops.
fn cost_range(base: f64, confidence: f64, usage: &NamespaceUtilization) -> CostRange {
    let uncertainty = 1.0 - confidence;
    let spot_potential = usage.fact.spot_ratio() * SPOT_DISCOUNT;
    let waste = waste_factor(usage.waste_score);

    CostRange {
        low: base * (1.0 - spot_potential) * (1.0 - uncertainty * UNCERTAINTY_SPREAD),
        best: base,
        high: base * (1.0 + waste) * (1.0 + uncertainty * UNCERTAINTY_SPREAD),
    }
}

fn waste_factor(waste_score: f64) -> f64 {
    if waste_score > 50.0 {
        0.30
    } else if waste_score > 30.0 {
        0.15
    } else {
        0.0
    }
}

/// Confidence in a namespace's allocation, clamped to `[0.3, 0.9]`.
///
/// Large, busy, low-waste namespaces allocate more predictably.
pub fn confidence_score(usage: &NamespaceUtilization) -> f64 {
    let mut confidence = BASE_CONFIDENCE;

    let share = usage.weighted_share;
    if share > 0.15 {
        confidence += 0.2;
    } else if share > 0.05 {
        confidence += 0.1;
    } else if share < 0.02 {
        confidence -= 0.1;
    }

    if usage.waste_score > 50.0 {
        confidence -= 0.2;
    } else if usage.waste_score > 30.0 {
        confidence -= 0.1;
    }

    if usage.fact.pod_count > 10 {
        confidence += 0.1;
    } else if usage.fact.pod_count < 3 {
        confidence -= 0.1;
    }

    confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

/// Coarse label shown next to a namespace estimate
pub fn confidence_label(weighted_share: f64) -> Level {
    if weighted_share > 0.10 {
        Level::Medium
    } else if weighted_share < 0.02 {
        Level::Low
    } else {
        Level::Medium
    }
}
