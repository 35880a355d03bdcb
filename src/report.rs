//! Voyage estimate report shared by the CLI and the HTTP API.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::data::{VoyageState, VoyageStatus};
use crate::stats::{chart_series, estimate_view, ChartSeries, EstimateView};
use crate::voyage::config::{ConfigError, DurationCheck, SimulationConfig};
use crate::voyage::status::{duration_advisory, estimate_title, status_message};
use crate::voyage::{SimulationGateway, SimulationResult, VoyageEstimator};

#[derive(Debug, Clone, Serialize)]
pub struct EstimateReport {
    /// Id of the simulation request, when one was submitted.
    pub handle: Option<Uuid>,
    pub generated_at: String,
    pub state: VoyageStatus,
    pub status_message: Option<String>,
    pub advisory: Option<&'static str>,
    pub duration: DurationCheck,
    pub config: Option<SimulationConfig>,
    pub title: String,
    /// `None` for voyages that are over.
    pub view: Option<EstimateView>,
    pub chart: Vec<ChartSeries>,
}

impl EstimateReport {
    /// False when an estimate was expected but never arrived.
    pub fn is_complete(&self) -> bool {
        !matches!(self.view, Some(EstimateView::Calculating))
    }
}

pub fn build_report(
    voyage: &VoyageState,
    handle: Option<Uuid>,
    config: Option<SimulationConfig>,
    estimate: Option<&SimulationResult>,
) -> EstimateReport {
    let needs_revive = voyage.state.needs_revive();
    let finished = voyage.state.is_finished();
    EstimateReport {
        handle,
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        state: voyage.state,
        status_message: status_message(voyage),
        advisory: duration_advisory(voyage),
        duration: DurationCheck::for_voyage(voyage),
        config,
        title: estimate_title(estimate, needs_revive),
        view: (!finished).then(|| estimate_view(estimate, needs_revive)),
        chart: estimate
            .map(|result| chart_series(result, needs_revive))
            .unwrap_or_default(),
    }
}

/// Submit the voyage through `gateway` unless `precomputed` already answers
/// it, wait for the result and assemble the report.
pub async fn estimate_report(
    gateway: &SimulationGateway,
    voyage: &VoyageState,
    simulation_count: Option<u32>,
    precomputed: Option<SimulationResult>,
) -> Result<EstimateReport, ConfigError> {
    let mut estimator = VoyageEstimator::start(gateway, voyage, precomputed, simulation_count)?;
    let handle = estimator.handle_id();
    let config = estimator.config().cloned();
    let estimate = estimator.wait().await.cloned();
    Ok(build_report(voyage, handle, config, estimate.as_ref()))
}
