//! Simulation engine output. Treated as read-only input by the aggregation layer.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::data::DataError;

/// Outcome statistics for one refill count. Times are voyage hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefillOutcome {
    /// Median voyage length.
    pub result: f64,
    /// Length reached by 90% of simulated voyages.
    #[serde(rename = "safeResult")]
    pub safe_result: f64,
    /// Length reached by 99% of simulated voyages.
    #[serde(rename = "saferResult")]
    pub safer_result: f64,
    /// Percentage of voyages reaching the `last_dilemma` checkpoint.
    #[serde(rename = "dilChance")]
    pub dil_chance: f64,
    #[serde(rename = "lastDil")]
    pub last_dilemma: u32,
    /// Dilithium needed for the refill that leads into this outcome.
    #[serde(rename = "refillCostResult")]
    pub refill_cost: f64,
    /// Every simulated voyage length for this refill count. Null entries from
    /// degenerate runs are kept as NaN and dropped during binning.
    #[serde(rename = "all", default, deserialize_with = "lenient_samples")]
    pub all_samples: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Set when the engine produced one exact value per refill count.
    #[serde(default)]
    pub deterministic: bool,
    /// Ordered by refill count: index 0 is the voyage without further refills.
    pub refills: Vec<RefillOutcome>,
    #[serde(rename = "20hrrefills", default)]
    pub twenty_hour_refills: u32,
    #[serde(rename = "20hrdil", default)]
    pub twenty_hour_dilithium: u64,
}

impl SimulationResult {
    pub fn outcome(&self, refill_count: usize) -> Option<&RefillOutcome> {
        self.refills.get(refill_count)
    }

    /// Time each additional refill adds, from the first two outcomes.
    pub fn extension_per_refill(&self) -> Option<f64> {
        match self.refills.as_slice() {
            [first, second, ..] => Some(second.result - first.result),
            _ => None,
        }
    }
}

/// Load a stored engine result from a JSON file.
pub fn load_result(path: impl AsRef<Path>) -> Result<SimulationResult, DataError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn lenient_samples<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}
