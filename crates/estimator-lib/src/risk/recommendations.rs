//! Priority recommendations for a risk analysis

use super::exposure::RiskCategory;
use crate::models::Severity;

/// Critical categories below this best-case exposure are not called out
pub const CRITICAL_EXPOSURE_FLOOR: f64 = 1000.0;

/// Hardening steps recommended for every cluster
pub const HARDENING_RECOMMENDATIONS: [&str; 4] = [
    "Implement Kubernetes Pod Security Standards (PSS) at namespace level",
    "Configure network policies to segment workloads and limit lateral movement",
    "Enable audit logging to detect exploitation attempts",
    "Add security scanning in CI/CD pipeline to prevent future issues",
];

/// Headline for expensive critical categories, then the fixed hardening list
pub fn priority_recommendations(categories: &[RiskCategory]) -> Vec<String> {
    let critical: Vec<&RiskCategory> = categories
        .iter()
        .filter(|c| c.severity == Severity::Critical && c.risk_exposure.best > CRITICAL_EXPOSURE_FLOOR)
        .collect();

    let mut recommendations = Vec::with_capacity(HARDENING_RECOMMENDATIONS.len() + 1);
    if !critical.is_empty() {
        let exposure: f64 = critical.iter().map(|c| c.risk_exposure.best).sum();
        recommendations.push(format!(
            "IMMEDIATE: Fix {} critical security issues (exposure: ${:.0}K)",
            critical.len(),
            exposure / 1000.0
        ));
    }
    recommendations.extend(HARDENING_RECOMMENDATIONS.iter().map(|s| s.to_string()));
    recommendations
}
