//! API client for communicating with the estimator service

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use estimator_lib::{
    risk::{IndustryProfile, RiskCostAnalysis},
    CostReport, EstimationReport, FactSnapshot, ReportRequest,
};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

/// API client for the estimator service
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        // Joined paths are relative, so the base must end with a slash
        let mut base_url = Url::parse(base_url).context("Invalid API URL")?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;
        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        Self::parse(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;
        tracing::debug!(url = %url, "POST");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => anyhow::bail!("API error ({}): {} [{}]", status, err.error, err.code),
                Err(_) => anyhow::bail!("API error ({}): {}", status, body),
            }
        }

        response.json().await.context("Failed to parse response")
    }

    pub async fn costs(&self, snapshot: &FactSnapshot, monthly_cost: f64) -> Result<CostReport> {
        self.post(
            "api/v1/costs",
            &CostsRequest {
                snapshot,
                monthly_cost,
            },
        )
        .await
    }

    pub async fn risk(&self, snapshot: &FactSnapshot, industry: &str) -> Result<RiskCostAnalysis> {
        self.post("api/v1/risk", &RiskRequest { snapshot, industry })
            .await
    }

    pub async fn report(
        &self,
        snapshot: &FactSnapshot,
        request: &ReportRequest,
    ) -> Result<ReportResponse> {
        self.post("api/v1/report", &ReportBody { snapshot, request })
            .await
    }

    pub async fn profiles(&self) -> Result<Vec<IndustryProfile>> {
        self.get("api/v1/profiles").await
    }
}

// API request and response types

#[derive(Debug, Serialize)]
struct CostsRequest<'a> {
    snapshot: &'a FactSnapshot,
    monthly_cost: f64,
}

#[derive(Debug, Serialize)]
struct RiskRequest<'a> {
    snapshot: &'a FactSnapshot,
    industry: &'a str,
}

#[derive(Debug, Serialize)]
struct ReportBody<'a> {
    snapshot: &'a FactSnapshot,
    #[serde(flatten)]
    request: &'a ReportRequest,
}

/// Combined report with the time it was generated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: EstimationReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
