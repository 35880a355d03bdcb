//! Survival curves for charting: for each bin, the percentage of simulated
//! voyages that lasted strictly longer than the bin.

use serde::{Deserialize, Serialize};

use crate::stats::histogram::{histogram, HistogramBin};
use crate::voyage::SimulationResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Voyage length in hours.
    pub x: f64,
    /// Percentage of runs still going after `x`.
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub id: String,
    pub data: Vec<CurvePoint>,
}

const SERIES_NAMES: [&str; 3] = ["No refills", "One refill", "Two refills"];
const REVIVE_SERIES_NAMES: [&str; 2] = ["First refill", "Second refill"];

/// Curve over bins sorted ascending by center. Each bin's own count is
/// removed before its point is emitted, so the last point is always 0%.
pub fn curve_from_bins(bins: &[HistogramBin]) -> Vec<CurvePoint> {
    let total: u64 = bins.iter().map(|bin| bin.count).sum();
    if total == 0 {
        return Vec::new();
    }
    let mut remaining = total;
    bins.iter()
        .map(|bin| {
            remaining -= bin.count;
            CurvePoint {
                x: bin.center,
                y: remaining as f64 / total as f64 * 100.0,
            }
        })
        .collect()
}

pub fn survival_curve(samples: &[f64]) -> Vec<CurvePoint> {
    curve_from_bins(&histogram(samples))
}

/// Label for the outcome at `refill_count`. A voyage that already needs
/// revival starts counting at its first refill.
pub fn series_name(refill_count: usize, needs_revive: bool) -> String {
    let names: &[&str] = if needs_revive {
        &REVIVE_SERIES_NAMES
    } else {
        &SERIES_NAMES
    };
    match names.get(refill_count) {
        Some(name) => (*name).to_string(),
        None => {
            let refills = if needs_revive {
                refill_count + 1
            } else {
                refill_count
            };
            format!("{refills} refills")
        }
    }
}

/// One named series per refill outcome, in refill order. Deterministic results
/// carry no distribution and produce no series.
pub fn chart_series(result: &SimulationResult, needs_revive: bool) -> Vec<ChartSeries> {
    if result.deterministic {
        return Vec::new();
    }
    result
        .refills
        .iter()
        .enumerate()
        .map(|(index, outcome)| ChartSeries {
            id: series_name(index, needs_revive),
            data: survival_curve(&outcome.all_samples),
        })
        .collect()
}
