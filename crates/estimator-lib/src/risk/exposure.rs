//! Financial exposure per risk category

use super::catalog::{CategorySpec, CATALOG};
use super::profile::IndustryProfile;
use crate::models::{Band, CostRange, RiskCategoryKind, SecurityRiskCounts, Severity};
use serde::{Deserialize, Serialize};

/// Exposure band for critical and high categories
pub const SEVERE_BAND: Band = Band::new(0.5, 1.0, 2.0);

/// Narrower band for medium and low categories
pub const MODERATE_BAND: Band = Band::new(0.5, 1.0, 1.5);

pub fn band_for(severity: Severity) -> Band {
    match severity {
        Severity::Critical | Severity::High => SEVERE_BAND,
        Severity::Medium | Severity::Low => MODERATE_BAND,
    }
}

/// One category of security misconfiguration with its expected loss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskCategory {
    pub kind: RiskCategoryKind,
    pub name: String,
    pub severity: Severity,
    pub count: u32,
    pub description: String,
    /// Annualized expected loss
    pub risk_exposure: CostRange,
    pub typical_incidents: Vec<String>,
    pub industry_examples: Vec<String>,
}

/// Maps finding counts to exposure ranges under one industry profile
#[derive(Debug, Clone, Copy)]
pub struct RiskExposureMapper<'a> {
    profile: &'a IndustryProfile,
}

impl<'a> RiskExposureMapper<'a> {
    pub fn new(profile: &'a IndustryProfile) -> Self {
        Self { profile }
    }

    /// One category per costed kind with a non-zero count, in catalog order
    pub fn map(&self, counts: &SecurityRiskCounts) -> Vec<RiskCategory> {
        CATALOG
            .iter()
            .filter_map(|spec| {
                let count = counts.count(spec.kind);
                if count == 0 {
                    return None;
                }
                let unit_cost = self.profile.breach_costs.unit_cost(spec.kind)?;
                Some(self.category(spec, count, unit_cost))
            })
            .collect()
    }

    fn category(&self, spec: &CategorySpec, count: u32, unit_cost: f64) -> RiskCategory {
        RiskCategory {
            kind: spec.kind,
            name: spec.name.to_string(),
            severity: spec.severity,
            count,
            description: spec.description.to_string(),
            risk_exposure: exposure(spec, count, unit_cost),
            typical_incidents: spec.typical_incidents.iter().map(|s| s.to_string()).collect(),
            industry_examples: spec
                .industry_examples
                .iter()
                .map(|example| example.render(unit_cost))
                .collect(),
        }
    }
}

/// `count * unit_cost * probability`, spread by the severity band
pub fn exposure(spec: &CategorySpec, count: u32, unit_cost: f64) -> CostRange {
    let expected = count as f64 * unit_cost * spec.probability;
    CostRange::from_band(expected, band_for(spec.severity))
}

/// Componentwise sum of category exposures
pub fn total_exposure(categories: &[RiskCategory]) -> CostRange {
    categories.iter().map(|c| &c.risk_exposure).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::catalog::spec_for;
    use crate::risk::profile::profile_for;

    #[test]
    fn test_medium_band_is_narrower() {
        let spec = spec_for(RiskCategoryKind::MissingResourceLimits).unwrap();
        // 4 * 5000 * 0.25 = 5000
        let range = exposure(spec, 4, 5000.0);
        assert!((range.low - 2500.0).abs() < 1e-6);
        assert!((range.best - 5000.0).abs() < 1e-6);
        assert!((range.high - 7500.0).abs() < 1e-6);
    }

    #[test]
    fn test_high_severity_uses_severe_band() {
        let spec = spec_for(RiskCategoryKind::RunningAsRoot).unwrap();
        // 10 * 8000 * 0.10 = 8000
        let range = exposure(spec, 10, 8000.0);
        assert!((range.low - 4000.0).abs() < 1e-6);
        assert!((range.high - 16_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_map_skips_zero_and_uncosted_counts() {
        let profile = profile_for("generic");
        let counts = SecurityRiskCounts {
            host_network: 2,
            host_ipc: 5,
            added_capabilities: 1,
            privilege_escalation: 3,
            ..Default::default()
        };
        let categories = RiskExposureMapper::new(&profile).map(&counts);

        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].kind, RiskCategoryKind::HostNetwork);
        assert_eq!(categories[0].industry_examples, ["Network policy bypass: $12K average incident"]);
    }

    #[test]
    fn test_map_preserves_catalog_order() {
        let profile = profile_for("startup");
        let counts = SecurityRiskCounts {
            default_service_account: 1,
            privileged_containers: 1,
            running_as_root: 1,
            ..Default::default()
        };
        let kinds: Vec<_> = RiskExposureMapper::new(&profile)
            .map(&counts)
            .iter()
            .map(|c| c.kind)
            .collect();
        assert_eq!(
            kinds,
            [
                RiskCategoryKind::PrivilegedContainers,
                RiskCategoryKind::RunningAsRoot,
                RiskCategoryKind::DefaultServiceAccount,
            ]
        );
    }
}
