//! Remediation effort, cost and return on investment

use super::exposure::{total_exposure, RiskCategory};
use crate::error::{EstimationError, Result};
use crate::models::Severity;
use serde::{Deserialize, Serialize};

/// Engineering hours needed to fix one finding of a given severity
pub fn hours_per_issue(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => 2.0,
        Severity::High => 1.0,
        Severity::Medium => 0.5,
        Severity::Low => 0.0,
    }
}

/// Calendar estimate for an amount of engineering work
pub fn timeline(hours: f64) -> String {
    let label = if hours <= 8.0 {
        "1 day"
    } else if hours <= 16.0 {
        "2 days"
    } else if hours <= 40.0 {
        "1 week"
    } else if hours <= 80.0 {
        "2 weeks"
    } else if hours <= 160.0 {
        "1 month"
    } else {
        return format!("{:.0} weeks", hours / 40.0);
    };
    label.to_string()
}

/// Risk reduction per dollar spent on remediation
pub fn roi(risk_reduction: f64, estimated_cost: f64) -> Result<f64> {
    if estimated_cost == 0.0 {
        return Err(EstimationError::UndefinedRoi);
    }
    Ok(risk_reduction / estimated_cost)
}

/// Months for the remediation cost to be recovered by the avoided annual risk
pub fn payback_months(estimated_cost: f64, risk_reduction: f64) -> Result<f64> {
    if risk_reduction == 0.0 {
        return Err(EstimationError::UndefinedPayback);
    }
    Ok(estimated_cost / (risk_reduction / 12.0))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediationPhase {
    pub name: String,
    pub duration: String,
    pub hours: f64,
    pub cost: f64,
    pub priority: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediationPlan {
    pub total_hours: f64,
    pub critical_hours: f64,
    pub high_hours: f64,
    pub medium_hours: f64,
    pub estimated_cost: f64,
    pub risk_reduction: f64,
    pub roi: f64,
    pub payback_months: f64,
    pub timeline: String,
    /// Always critical, high, medium in that order
    pub phases: Vec<RemediationPhase>,
}

const PHASES: [(Severity, &str, &str); 3] = [
    (Severity::Critical, "Phase 1: Critical Issues", "IMMEDIATE"),
    (Severity::High, "Phase 2: High Priority", "THIS WEEK"),
    (Severity::Medium, "Phase 3: Medium Priority", "THIS MONTH"),
];

#[derive(Debug, Default, Clone, Copy)]
struct SeverityHours {
    critical: f64,
    high: f64,
    medium: f64,
}

impl SeverityHours {
    fn add(&mut self, severity: Severity, hours: f64) {
        match severity {
            Severity::Critical => self.critical += hours,
            Severity::High => self.high += hours,
            Severity::Medium => self.medium += hours,
            Severity::Low => {}
        }
    }

    fn get(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => 0.0,
        }
    }
}

/// Builds a phased remediation plan at a fixed hourly rate
#[derive(Debug, Clone, Copy)]
pub struct RemediationPlanner {
    engineer_hourly_rate: f64,
}

impl RemediationPlanner {
    pub fn new(engineer_hourly_rate: f64) -> Self {
        Self {
            engineer_hourly_rate,
        }
    }

    /// Fails with `UndefinedRoi` when nothing needs fixing (or the rate is
    /// zero) and with `UndefinedPayback` when the fixes remove no exposure.
    pub fn plan(&self, categories: &[RiskCategory]) -> Result<RemediationPlan> {
        let mut hours = SeverityHours::default();
        let mut total_hours = 0.0;
        for category in categories {
            let category_hours = category.count as f64 * hours_per_issue(category.severity);
            hours.add(category.severity, category_hours);
            total_hours += category_hours;
        }

        let rate = self.engineer_hourly_rate;
        let estimated_cost = total_hours * rate;
        let risk_reduction = total_exposure(categories).best;

        let roi = roi(risk_reduction, estimated_cost)?;
        let payback_months = payback_months(estimated_cost, risk_reduction)?;

        let phases = PHASES
            .iter()
            .map(|(severity, name, priority)| {
                let phase_hours = hours.get(*severity);
                RemediationPhase {
                    name: name.to_string(),
                    duration: timeline(phase_hours),
                    hours: phase_hours,
                    cost: phase_hours * rate,
                    priority: priority.to_string(),
                }
            })
            .collect();

        Ok(RemediationPlan {
            total_hours,
            critical_hours: hours.critical,
            high_hours: hours.high,
            medium_hours: hours.medium,
            estimated_cost,
            risk_reduction,
            roi,
            payback_months,
            timeline: timeline(total_hours),
            phases,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_buckets() {
        assert_eq!(timeline(0.0), "1 day");
        assert_eq!(timeline(8.0), "1 day");
        assert_eq!(timeline(8.5), "2 days");
        assert_eq!(timeline(16.0), "2 days");
        assert_eq!(timeline(40.0), "1 week");
        assert_eq!(timeline(80.0), "2 weeks");
        assert_eq!(timeline(160.0), "1 month");
        assert_eq!(timeline(200.0), "5 weeks");
        assert_eq!(timeline(400.0), "10 weeks");
    }

    #[test]
    fn test_hours_per_issue() {
        assert_eq!(hours_per_issue(Severity::Critical), 2.0);
        assert_eq!(hours_per_issue(Severity::High), 1.0);
        assert_eq!(hours_per_issue(Severity::Medium), 0.5);
        assert_eq!(hours_per_issue(Severity::Low), 0.0);
    }

    #[test]
    fn test_ratios_reject_zero_denominators() {
        assert_eq!(roi(1000.0, 0.0), Err(EstimationError::UndefinedRoi));
        assert_eq!(payback_months(500.0, 0.0), Err(EstimationError::UndefinedPayback));
        assert_eq!(roi(1000.0, 500.0), Ok(2.0));
        // 12000 annual risk -> 1000/month
        assert_eq!(payback_months(500.0, 12_000.0), Ok(0.5));
    }

    #[test]
    fn test_empty_plan_has_undefined_roi() {
        let planner = RemediationPlanner::new(200.0);
        assert_eq!(planner.plan(&[]), Err(EstimationError::UndefinedRoi));
    }
}
