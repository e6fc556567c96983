//! HTTP API for estimates, health checks and Prometheus metrics

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use estimator_lib::{
    risk::{profile_for, IndustryProfile, RiskCostAnalysis},
    CostReport, EstimationError, EstimationReport, Estimator, FactSnapshot, ReportRequest,
};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub estimator: Estimator,
    pub default_industry: String,
}

impl AppState {
    pub fn new(estimator: Estimator, default_industry: impl Into<String>) -> Self {
        Self {
            estimator,
            default_industry: default_industry.into(),
        }
    }

    fn profile(&self, industry: Option<&str>) -> IndustryProfile {
        profile_for(industry.unwrap_or(&self.default_industry))
    }
}

#[derive(Debug, Deserialize)]
pub struct CostsRequest {
    pub snapshot: FactSnapshot,
    pub monthly_cost: f64,
}

#[derive(Debug, Deserialize)]
pub struct RiskRequest {
    pub snapshot: FactSnapshot,
    #[serde(default)]
    pub industry: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReportBody {
    pub snapshot: FactSnapshot,
    #[serde(flatten)]
    pub request: ReportRequest,
}

/// Report with the time it was generated
#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratedReport {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: EstimationReport,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

/// Engine error rendered as 422 with a stable error code
pub struct ApiError(EstimationError);

impl From<EstimationError> for ApiError {
    fn from(err: EstimationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.0.to_string(),
            code: self.0.kind().to_string(),
        };
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}

async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": SERVICE_VERSION,
    }))
}

/// Prometheus metrics endpoint
async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %err, "Failed to encode metrics");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
        .into_response()
}

async fn profiles() -> Json<Vec<IndustryProfile>> {
    Json(IndustryProfile::presets())
}

async fn costs(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CostsRequest>,
) -> Result<Json<CostReport>, ApiError> {
    let report = state
        .estimator
        .estimate_costs(&body.snapshot, body.monthly_cost)?;
    Ok(Json(report))
}

async fn risk(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RiskRequest>,
) -> Result<Json<RiskCostAnalysis>, ApiError> {
    let profile = state.profile(body.industry.as_deref());
    let analysis = state.estimator.analyze_risk(&body.snapshot, &profile)?;
    Ok(Json(analysis))
}

async fn report(
    State(state): State<Arc<AppState>>,
    Json(mut body): Json<ReportBody>,
) -> Json<GeneratedReport> {
    if body.request.industry.is_none() {
        body.request.industry = Some(state.default_industry.clone());
    }
    let report = state.estimator.report(&body.snapshot, &body.request);
    Json(GeneratedReport {
        generated_at: Utc::now(),
        report,
    })
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .route("/api/v1/profiles", get(profiles))
        .route("/api/v1/costs", post(costs))
        .route("/api/v1/risk", post(risk))
        .route("/api/v1/report", post(report))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
