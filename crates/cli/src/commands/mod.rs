//! CLI commands and the backend they run against

pub mod costs;
pub mod profiles;
pub mod report;
pub mod risk;

use crate::client::{ApiClient, ReportResponse};
use anyhow::{Context, Result};
use chrono::Utc;
use estimator_lib::{
    risk::{profile_for, IndustryProfile, RiskCostAnalysis},
    CostReport, Estimator, FactSnapshot, ReportRequest,
};
use std::path::Path;

/// Where estimates are computed: in-process or by a remote service
pub enum Backend {
    Local(Estimator),
    Remote(ApiClient),
}

impl Backend {
    pub fn from_api_url(api_url: Option<&str>) -> Result<Self> {
        match api_url {
            Some(url) => Ok(Backend::Remote(ApiClient::new(url)?)),
            None => Ok(Backend::Local(Estimator::new("local"))),
        }
    }

    pub async fn costs(&self, snapshot: &FactSnapshot, monthly_cost: f64) -> Result<CostReport> {
        match self {
            Backend::Local(estimator) => Ok(estimator.estimate_costs(snapshot, monthly_cost)?),
            Backend::Remote(client) => client.costs(snapshot, monthly_cost).await,
        }
    }

    pub async fn risk(&self, snapshot: &FactSnapshot, industry: &str) -> Result<RiskCostAnalysis> {
        match self {
            Backend::Local(estimator) => {
                Ok(estimator.analyze_risk(snapshot, &profile_for(industry))?)
            }
            Backend::Remote(client) => client.risk(snapshot, industry).await,
        }
    }

    pub async fn report(
        &self,
        snapshot: &FactSnapshot,
        request: &ReportRequest,
    ) -> Result<ReportResponse> {
        match self {
            Backend::Local(estimator) => Ok(ReportResponse {
                generated_at: Utc::now(),
                report: estimator.report(snapshot, request),
            }),
            Backend::Remote(client) => client.report(snapshot, request).await,
        }
    }

    pub async fn profiles(&self) -> Result<Vec<IndustryProfile>> {
        match self {
            Backend::Local(_) => Ok(IndustryProfile::presets()),
            Backend::Remote(client) => client.profiles().await,
        }
    }
}

/// Read a fact snapshot document
pub fn load_snapshot(path: &Path) -> Result<FactSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fact file {}", path.display()))?;
    let snapshot: FactSnapshot = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse fact file {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        namespaces = snapshot.namespaces.len(),
        "Loaded fact snapshot"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "capacity": {{"total_cpu_cores": 16, "total_memory_gb": 64}},
                "namespaces": [{{"name": "web", "cpu_cores_requested": 4, "memory_gb_requested": 8, "pod_count": 3}}]
            }}"#
        )
        .unwrap();

        let snapshot = load_snapshot(file.path()).unwrap();
        assert_eq!(snapshot.namespaces.len(), 1);
        assert_eq!(snapshot.namespaces[0].idle_pods, 0);
        assert_eq!(snapshot.security.risks.total(), 0);
    }

    #[test]
    fn test_load_snapshot_errors_name_the_file() {
        let err = load_snapshot(Path::new("/nonexistent/facts.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/facts.json"));
    }

    #[tokio::test]
    async fn test_local_profiles() {
        let backend = Backend::from_api_url(None).unwrap();
        assert_eq!(backend.profiles().await.unwrap().len(), 4);
    }
}
