//! Text-facing view of an estimate. Percentile fields pass through unchanged.

use serde::Serialize;

use crate::voyage::status::format_time;
use crate::voyage::{RefillOutcome, SimulationResult};

const ROW_LABELS: [&str; 3] = ["Estimate", "1 Refill", "2 Refills"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateRow {
    pub label: &'static str,
    pub result: f64,
    pub safe_result: f64,
    pub safer_result: f64,
    pub last_dilemma: u32,
    /// Floored percentage.
    pub dilemma_chance: u32,
    pub refill_cost: f64,
}

impl EstimateRow {
    fn new(label: &'static str, outcome: &RefillOutcome) -> Self {
        Self {
            label,
            result: outcome.result,
            safe_result: outcome.safe_result,
            safer_result: outcome.safer_result,
            last_dilemma: outcome.last_dilemma,
            dilemma_chance: outcome.dil_chance.floor().max(0.0) as u32,
            refill_cost: outcome.refill_cost,
        }
    }

    /// `"Estimate: 9h 30m, 90%: 8h 54m, 99%: 8h 6m, chance of 10 hour dilemma: 62%"`.
    pub fn describe(&self) -> String {
        let mut line = format!(
            "{}: {}, 90%: {}, 99%: {}, chance of {} hour dilemma: {}%",
            self.label,
            format_time(self.result),
            format_time(self.safe_result),
            format_time(self.safer_result),
            self.last_dilemma,
            self.dilemma_chance
        );
        if self.refill_cost > 0.0 {
            line.push_str(&format!(", costing {} dilithium", self.refill_cost));
        }
        line
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EstimateView {
    /// No result has arrived yet.
    Calculating,
    Deterministic {
        ends_at: Option<f64>,
        extension_per_refill: Option<f64>,
        twenty_hour_refills: u32,
        twenty_hour_dilithium: u64,
        summary: String,
    },
    Distribution {
        rows: Vec<EstimateRow>,
        twenty_hour_refills: u32,
        twenty_hour_dilithium: u64,
        summary: String,
    },
}

/// Row labels for the first outcomes. A voyage needing revival has no
/// unrefilled outcome, so its first row is already "1 Refill".
pub fn estimate_rows(result: &SimulationResult, needs_revive: bool) -> Vec<EstimateRow> {
    let labels = if needs_revive {
        &ROW_LABELS[1..]
    } else {
        &ROW_LABELS[..]
    };
    labels
        .iter()
        .zip(result.refills.iter())
        .map(|(label, outcome)| EstimateRow::new(label, outcome))
        .collect()
}

pub fn estimate_view(estimate: Option<&SimulationResult>, needs_revive: bool) -> EstimateView {
    let Some(result) = estimate else {
        return EstimateView::Calculating;
    };
    let refills = result.twenty_hour_refills;
    let dilithium = result.twenty_hour_dilithium;

    if result.deterministic {
        let ends_at = result.outcome(0).map(|o| o.result);
        let extension = result.extension_per_refill();
        let mut summary = String::new();
        if let Some(end) = ends_at {
            summary.push_str(&format!("The voyage will end at {}. ", format_time(end)));
        }
        if let Some(extension) = extension {
            summary.push_str(&format!(
                "Subsequent refills will extend it by {}. ",
                format_time(extension)
            ));
        }
        summary.push_str(&format!(
            "For a 20 hour voyage you need {refills} refills at a cost of {dilithium} dilithium."
        ));
        return EstimateView::Deterministic {
            ends_at,
            extension_per_refill: extension,
            twenty_hour_refills: refills,
            twenty_hour_dilithium: dilithium,
            summary,
        };
    }

    EstimateView::Distribution {
        rows: estimate_rows(result, needs_revive),
        twenty_hour_refills: refills,
        twenty_hour_dilithium: dilithium,
        summary: format!(
            "The 20 hour voyage needs {refills} refills at a cost of {dilithium} dilithium."
        ),
    }
}
