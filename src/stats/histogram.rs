//! Fixed-width binning of simulated voyage lengths.

use std::collections::BTreeMap;

use serde::Serialize;

/// Two minutes, in voyage hours.
pub const BIN_SIZE_HOURS: f64 = 1.0 / 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Midpoint of the bin in hours.
    pub center: f64,
    pub count: u64,
}

/// Integer bin key for a sample; `None` for NaN or infinite samples.
pub fn bin_index(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    Some((value / BIN_SIZE_HOURS).floor() as i64)
}

pub fn bin_center(index: i64) -> f64 {
    index as f64 * BIN_SIZE_HOURS + BIN_SIZE_HOURS / 2.0
}

/// Bins sorted ascending by center. Non-finite samples are dropped.
pub fn histogram(samples: &[f64]) -> Vec<HistogramBin> {
    let mut counts: BTreeMap<i64, u64> = BTreeMap::new();
    for index in samples.iter().copied().filter_map(bin_index) {
        *counts.entry(index).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(index, count)| HistogramBin {
            center: bin_center(index),
            count,
        })
        .collect()
}
