use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::crew::{lineup_report, LineupReport};
use crate::data::{Candidate, VoyageState};
use crate::report::{estimate_report, EstimateReport};
use crate::server::AppState;
use crate::stats::{chart_series, ChartSeries};
use crate::voyage::{
    ConfigError, ExpectedValueEngine, GatewayError, SimulationGateway, SimulationResult,
};

#[derive(Debug, Clone, Deserialize)]
pub struct EstimateRequest {
    pub voyage: VoyageState,
    pub sims: Option<u32>,
    pub seed: Option<u64>,
    #[serde(default)]
    pub deterministic: bool,
    /// Previously computed result; when present the voyage is not simulated again.
    pub estimate: Option<SimulationResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartRequest {
    pub result: SimulationResult,
    #[serde(default)]
    pub needs_revive: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsRequest {
    pub voyage: VoyageState,
    #[serde(default)]
    pub roster: Vec<Candidate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartResponse {
    pub status: &'static str,
    pub needs_revive: bool,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationsResponse {
    pub status: &'static str,
    pub lineup: LineupReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct EstimateResponse {
    pub status: &'static str,
    pub engine: &'static str,
    pub sims: u32,
    #[serde(flatten)]
    pub report: EstimateReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub errors: Vec<ValidationIssue>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    Parse(serde_json::Error),
    #[error("validation failed")]
    Validation(ValidationErrorResponse),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("simulation channel closed before a result arrived")]
    Unavailable,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("failed to serialize response: {0}")]
    Serialize(serde_json::Error),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Parse(_) | Self::Validation(_) | Self::Config(_) => 400,
            Self::Unavailable => 503,
            Self::Gateway(_) | Self::Serialize(_) => 500,
        }
    }
}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "voyage-estimator-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn estimate_payload(state: &AppState, body: &str) -> Result<String, ApiError> {
    let request: EstimateRequest = serde_json::from_str(body).map_err(ApiError::Parse)?;
    let sims = request.sims.unwrap_or(state.settings.default_simulations);
    validate_sims(sims, state.settings.max_simulations)?;

    let (engine, gateway) = if request.deterministic {
        ("expected_value", SimulationGateway::new(ExpectedValueEngine)?)
    } else {
        (
            "monte_carlo",
            SimulationGateway::new(state.settings.monte_carlo_engine(request.seed))?,
        )
    };
    info!(engine, sims, state = ?request.voyage.state, "estimate requested");

    let report = estimate_report(&gateway, &request.voyage, Some(sims), request.estimate).await?;
    if !report.is_complete() {
        return Err(ApiError::Unavailable);
    }

    let response = EstimateResponse {
        status: "ok",
        engine,
        sims,
        report,
    };
    serde_json::to_string_pretty(&response).map_err(ApiError::Serialize)
}

pub fn chart_payload(body: &str) -> Result<String, ApiError> {
    let request: ChartRequest = serde_json::from_str(body).map_err(ApiError::Parse)?;
    let response = ChartResponse {
        status: "ok",
        needs_revive: request.needs_revive,
        series: chart_series(&request.result, request.needs_revive),
    };
    serde_json::to_string_pretty(&response).map_err(ApiError::Serialize)
}

pub fn recommendations_payload(body: &str) -> Result<String, ApiError> {
    let request: RecommendationsRequest = serde_json::from_str(body).map_err(ApiError::Parse)?;
    let response = RecommendationsResponse {
        status: "ok",
        lineup: lineup_report(&request.voyage, &request.roster),
    };
    serde_json::to_string_pretty(&response).map_err(ApiError::Serialize)
}

fn validate_sims(sims: u32, max_sims: u32) -> Result<(), ApiError> {
    if (1..=max_sims).contains(&sims) {
        return Ok(());
    }
    Err(ApiError::Validation(ValidationErrorResponse {
        status: "error",
        message: "Validation failed",
        errors: vec![ValidationIssue {
            field: "sims",
            messages: vec![format!("must be between 1 and {max_sims}")],
        }],
    }))
}
