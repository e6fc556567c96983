//! Industry cost profiles
//!
//! A profile fixes the hourly engineering rate and the average cost of a
//! single incident per risk category. Profiles are plain values produced by
//! [`IndustryProfile::for_industry`] and never mutated afterwards.

use crate::error::{EstimationError, Result};
use crate::models::RiskCategoryKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Industry preset selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    #[default]
    Generic,
    Pharma,
    Fintech,
    Startup,
}

impl Industry {
    pub const ALL: [Industry; 4] = [
        Industry::Generic,
        Industry::Pharma,
        Industry::Fintech,
        Industry::Startup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Generic => "generic",
            Industry::Pharma => "pharma",
            Industry::Fintech => "fintech",
            Industry::Startup => "startup",
        }
    }

    /// Resolve a user-supplied name. Unknown names fall back to `Generic`.
    pub fn resolve(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "pharma" | "pharmaceutical" | "healthcare" | "medical" => Industry::Pharma,
            "fintech" | "finance" | "banking" | "payment" => Industry::Fintech,
            "startup" | "early-stage" => Industry::Startup,
            other => {
                if !other.is_empty() && other != "generic" {
                    tracing::debug!(industry = other, "Unknown industry, using generic profile");
                }
                Industry::Generic
            }
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Average cost of one incident, per costed category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreachCosts {
    pub privileged_container: f64,
    pub host_path: f64,
    pub host_pid: f64,
    pub running_as_root: f64,
    pub host_network: f64,
    pub missing_limits: f64,
    pub default_service_account: f64,
}

impl BreachCosts {
    /// `None` for categories that are counted but never costed
    pub fn unit_cost(&self, kind: RiskCategoryKind) -> Option<f64> {
        match kind {
            RiskCategoryKind::PrivilegedContainers => Some(self.privileged_container),
            RiskCategoryKind::HostPathVolumes => Some(self.host_path),
            RiskCategoryKind::HostPid => Some(self.host_pid),
            RiskCategoryKind::RunningAsRoot => Some(self.running_as_root),
            RiskCategoryKind::HostNetwork => Some(self.host_network),
            RiskCategoryKind::MissingResourceLimits => Some(self.missing_limits),
            RiskCategoryKind::DefaultServiceAccount => Some(self.default_service_account),
            RiskCategoryKind::HostIpc
            | RiskCategoryKind::AddedCapabilities
            | RiskCategoryKind::PrivilegeEscalation => None,
        }
    }

    fn values(&self) -> [(&'static str, f64); 7] {
        [
            ("privileged_container", self.privileged_container),
            ("host_path", self.host_path),
            ("host_pid", self.host_pid),
            ("running_as_root", self.running_as_root),
            ("host_network", self.host_network),
            ("missing_limits", self.missing_limits),
            ("default_service_account", self.default_service_account),
        ]
    }
}

/// Risk multipliers for exposure and risk combinations.
///
/// Reported with the profile; exposure math does not apply them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompoundMultipliers {
    pub public_facing: f64,
    pub internet_exposed: f64,
    pub privileged_and_host_path: f64,
    pub root_and_host_network: f64,
}

/// Immutable cost configuration for one industry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryProfile {
    pub industry: Industry,
    pub engineer_hourly_rate: f64,
    pub breach_costs: BreachCosts,
    pub multipliers: CompoundMultipliers,
}

impl IndustryProfile {
    pub fn for_industry(industry: Industry) -> Self {
        match industry {
            Industry::Generic => Self {
                industry,
                engineer_hourly_rate: 200.0,
                breach_costs: BreachCosts {
                    privileged_container: 25_000.0,
                    host_path: 35_000.0,
                    host_pid: 20_000.0,
                    running_as_root: 8_000.0,
                    host_network: 12_000.0,
                    missing_limits: 5_000.0,
                    default_service_account: 6_000.0,
                },
                multipliers: CompoundMultipliers {
                    public_facing: 1.5,
                    internet_exposed: 2.0,
                    privileged_and_host_path: 1.8,
                    root_and_host_network: 1.4,
                },
            },
            // PHI exposure roughly doubles breach costs
            Industry::Pharma => Self {
                industry,
                engineer_hourly_rate: 200.0,
                breach_costs: BreachCosts {
                    privileged_container: 50_000.0,
                    host_path: 70_000.0,
                    host_pid: 40_000.0,
                    running_as_root: 15_000.0,
                    host_network: 20_000.0,
                    missing_limits: 8_000.0,
                    default_service_account: 10_000.0,
                },
                multipliers: CompoundMultipliers {
                    public_facing: 2.0,
                    internet_exposed: 3.0,
                    privileged_and_host_path: 2.2,
                    root_and_host_network: 1.6,
                },
            },
            Industry::Fintech => Self {
                industry,
                engineer_hourly_rate: 250.0,
                breach_costs: BreachCosts {
                    privileged_container: 40_000.0,
                    host_path: 60_000.0,
                    host_pid: 35_000.0,
                    running_as_root: 12_000.0,
                    host_network: 18_000.0,
                    missing_limits: 10_000.0,
                    default_service_account: 9_000.0,
                },
                multipliers: CompoundMultipliers {
                    public_facing: 1.8,
                    internet_exposed: 2.5,
                    privileged_and_host_path: 2.0,
                    root_and_host_network: 1.5,
                },
            },
            Industry::Startup => Self {
                industry,
                engineer_hourly_rate: 150.0,
                breach_costs: BreachCosts {
                    privileged_container: 15_000.0,
                    host_path: 20_000.0,
                    host_pid: 12_000.0,
                    running_as_root: 5_000.0,
                    host_network: 8_000.0,
                    missing_limits: 3_000.0,
                    default_service_account: 4_000.0,
                },
                multipliers: CompoundMultipliers {
                    public_facing: 1.3,
                    internet_exposed: 1.5,
                    privileged_and_host_path: 1.5,
                    root_and_host_network: 1.3,
                },
            },
        }
    }

    /// All four presets in `Industry::ALL` order
    pub fn presets() -> Vec<Self> {
        Industry::ALL.iter().map(|i| Self::for_industry(*i)).collect()
    }

    /// Reject negative or non-finite values in a custom profile
    pub fn validate(&self) -> Result<()> {
        if !self.engineer_hourly_rate.is_finite() || self.engineer_hourly_rate < 0.0 {
            return Err(EstimationError::invalid(format!(
                "engineer_hourly_rate must be a non-negative number (got {})",
                self.engineer_hourly_rate
            )));
        }
        for (field, value) in self.breach_costs.values() {
            if !value.is_finite() || value < 0.0 {
                return Err(EstimationError::invalid(format!(
                    "breach cost {field} must be a non-negative number (got {value})"
                )));
            }
        }
        Ok(())
    }
}

impl Default for IndustryProfile {
    fn default() -> Self {
        Self::for_industry(Industry::Generic)
    }
}

/// Profile for a user-supplied industry name, aliases included
pub fn profile_for(name: &str) -> IndustryProfile {
    IndustryProfile::for_industry(Industry::resolve(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve() {
        assert_eq!(Industry::resolve("pharma"), Industry::Pharma);
        assert_eq!(Industry::resolve("Healthcare"), Industry::Pharma);
        assert_eq!(Industry::resolve(" MEDICAL "), Industry::Pharma);
        assert_eq!(Industry::resolve("banking"), Industry::Fintech);
        assert_eq!(Industry::resolve("payment"), Industry::Fintech);
        assert_eq!(Industry::resolve("early-stage"), Industry::Startup);
        assert_eq!(Industry::resolve("retail"), Industry::Generic);
        assert_eq!(Industry::resolve(""), Industry::Generic);
    }

    #[test]
    fn test_preset_values() {
        let pharma = profile_for("pharma");
        assert_eq!(pharma.breach_costs.privileged_container, 50_000.0);
        assert_eq!(pharma.multipliers.internet_exposed, 3.0);

        let fintech = profile_for("fintech");
        assert_eq!(fintech.engineer_hourly_rate, 250.0);
        assert_eq!(fintech.breach_costs.missing_limits, 10_000.0);

        let startup = profile_for("startup");
        assert_eq!(startup.engineer_hourly_rate, 150.0);
        assert_eq!(startup.breach_costs.host_path, 20_000.0);

        assert_eq!(IndustryProfile::default(), profile_for("generic"));
    }

    #[test]
    fn test_uncosted_categories() {
        let costs = profile_for("generic").breach_costs;
        assert_eq!(costs.unit_cost(RiskCategoryKind::HostIpc), None);
        assert_eq!(costs.unit_cost(RiskCategoryKind::AddedCapabilities), None);
        assert_eq!(costs.unit_cost(RiskCategoryKind::PrivilegeEscalation), None);
        assert_eq!(costs.unit_cost(RiskCategoryKind::HostPid), Some(20_000.0));
    }

    #[test]
    fn test_presets_order_and_serialization() {
        let presets = IndustryProfile::presets();
        let names: Vec<_> = presets.iter().map(|p| p.industry.as_str()).collect();
        assert_eq!(names, ["generic", "pharma", "fintech", "startup"]);

        let json = serde_json::to_value(&presets[1]).unwrap();
        assert_eq!(json["industry"], "pharma");
        assert_eq!(json["breach_costs"]["host_path"], 70_000.0);
    }

    #[test]
    fn test_validate_rejects_negative_costs() {
        let mut profile = IndustryProfile::default();
        assert!(profile.validate().is_ok());

        profile.breach_costs.host_pid = -1.0;
        assert!(matches!(profile.validate(), Err(EstimationError::InvalidInput(_))));

        let mut profile = IndustryProfile::default();
        profile.engineer_hourly_rate = f64::INFINITY;
        assert!(profile.validate().is_err());
    }
}
