//! Security risk cost analysis
//!
//! This module provides:
//! - Industry profiles with per-category breach costs
//! - Exposure ranges from finding counts and incident probabilities
//! - A phased remediation plan with ROI and payback
//! - Priority recommendations

mod catalog;
mod exposure;
mod profile;
mod recommendations;
mod remediation;


pub use catalog::{spec_for, CategorySpec, Example, CATALOG};
pub use exposure::{
    band_for, exposure, total_exposure, RiskCategory, RiskExposureMapper, MODERATE_BAND,
    SEVERE_BAND,
};
pub use profile::{profile_for, BreachCosts, CompoundMultipliers, Industry, IndustryProfile};
pub use recommendations::{
    priority_recommendations, CRITICAL_EXPOSURE_FLOOR, HARDENING_RECOMMENDATIONS,
};
pub use remediation::{
    hours_per_issue, payback_months, roi, timeline, RemediationPhase, RemediationPlan,
    RemediationPlanner,
};

use crate::error::Result;
use crate::models::{CostRange, SecurityFacts};
use serde::{Deserialize, Serialize};

/// Financial view of a cluster's security findings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskCostAnalysis {
    pub security_score: u8,
    pub industry: Industry,
    pub total_risk_exposure: CostRange,
    pub risk_categories: Vec<RiskCategory>,
    pub remediation_plan: RemediationPlan,
    pub priority_recommendations: Vec<String>,
    pub compound_multipliers: CompoundMultipliers,
}

/// Runs exposure mapping, remediation planning and recommendations
pub struct RiskCostAnalyzer<'a> {
    profile: &'a IndustryProfile,
}

impl<'a> RiskCostAnalyzer<'a> {
    pub fn new(profile: &'a IndustryProfile) -> Self {
        Self { profile }
    }

    pub fn analyze(&self, security: &SecurityFacts) -> Result<RiskCostAnalysis> {
        self.profile.validate()?;

        let risk_categories = RiskExposureMapper::new(self.profile).map(&security.risks);
        let total_risk_exposure = total_exposure(&risk_categories);
        let remediation_plan =
            RemediationPlanner::new(self.profile.engineer_hourly_rate).plan(&risk_categories)?;
        let priority_recommendations = priority_recommendations(&risk_categories);

        tracing::debug!(
            industry = %self.profile.industry,
            categories = risk_categories.len(),
            exposure_best = total_risk_exposure.best,
            "Risk analysis complete"
        );

        Ok(RiskCostAnalysis {
            security_score: security.security_score,
            industry: self.profile.industry,
            total_risk_exposure,
            risk_categories,
            remediation_plan,
            priority_recommendations,
            compound_multipliers: self.profile.multipliers,
        })
    }
}
