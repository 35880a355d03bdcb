//! Derives a simulation request from a raw voyage snapshot.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::data::{Skill, SkillAggregate, VoyageState};

/// Simulated voyages per request when the caller does not override it.
pub const DEFAULT_SIMULATION_COUNT: u32 = 5000;
/// Weight applied to each non-primary/secondary skill's spread in `variance`.
pub const SKILL_ODDS: f64 = 0.1;
/// Reported duration is compared and snapped in two-hour units.
pub const DURATION_UNIT_SECONDS: u64 = 7200;
/// `log_index` steps per two-hour unit.
pub const LOG_INDEX_UNIT: u64 = 360;

/// Consistency check between `voyage_duration` and `log_index`.
///
/// `log_index` lags the reported duration in two-hour increments on healthy
/// voyages, so the duration is normally snapped down to a whole unit. When the
/// two signals disagree by at least one whole unit the raw duration is kept and
/// the discrepancy is surfaced to the caller as an advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationCheck {
    pub reported_seconds: u64,
    pub discrepancy: bool,
    pub corrected_seconds: u64,
}

impl DurationCheck {
    pub fn evaluate(voyage_duration: u64, log_index: u64) -> Self {
        let discrepancy = voyage_duration / DURATION_UNIT_SECONDS > log_index / LOG_INDEX_UNIT;
        let corrected_seconds = if discrepancy {
            voyage_duration
        } else {
            voyage_duration - voyage_duration % DURATION_UNIT_SECONDS
        };
        Self {
            reported_seconds: voyage_duration,
            discrepancy,
            corrected_seconds,
        }
    }

    pub fn for_voyage(voyage: &VoyageState) -> Self {
        Self::evaluate(voyage.voyage_duration, voyage.log_index)
    }
}

/// Request sent to the simulation engine. Field names on the wire follow the
/// engine's message format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(rename = "ps")]
    pub primary_skill: SkillAggregate,
    #[serde(rename = "ss")]
    pub secondary_skill: SkillAggregate,
    #[serde(rename = "others")]
    pub other_skills: Vec<SkillAggregate>,
    #[serde(rename = "numSims")]
    pub simulation_count: u32,
    #[serde(rename = "startAm")]
    pub starting_antimatter: i64,
    #[serde(rename = "currentAm")]
    pub current_antimatter: i64,
    #[serde(rename = "elapsedSeconds")]
    pub elapsed_seconds: u64,
    pub variance: f64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("voyage declares {role} skill {skill:?} but has no aggregate for it")]
    MissingSkill { role: &'static str, skill: Skill },
}

/// Spread term contributed by one non-primary/secondary skill.
/// A skill with no value at all contributes nothing.
pub fn skill_variance(aggregate: &SkillAggregate) -> f64 {
    let p = &aggregate.proficiency;
    let denominator = p.core + p.range_max;
    if denominator <= 0.0 {
        return 0.0;
    }
    (p.range_max - p.range_min) / denominator * SKILL_ODDS
}

pub fn build_simulation_config(
    voyage: &VoyageState,
    simulation_count: Option<u32>,
) -> Result<SimulationConfig, ConfigError> {
    let duration = DurationCheck::for_voyage(voyage);
    if duration.discrepancy {
        warn!(
            reported_seconds = duration.reported_seconds,
            log_index = voyage.log_index,
            "voyage duration disagrees with log index; using reported duration"
        );
    }

    let primary = voyage.primary_skill();
    let secondary = voyage.secondary_skill();
    let mut primary_skill = None;
    let mut secondary_skill = None;
    let mut other_skills = Vec::new();
    let mut variance = 0.0;

    for aggregate in voyage.skill_aggregates.values() {
        if aggregate.skill == primary {
            primary_skill = Some(*aggregate);
        } else if aggregate.skill == secondary {
            secondary_skill = Some(*aggregate);
        } else {
            variance += skill_variance(aggregate);
            other_skills.push(*aggregate);
        }
    }

    let primary_skill = primary_skill.ok_or(ConfigError::MissingSkill {
        role: "primary",
        skill: primary,
    })?;
    let secondary_skill = secondary_skill.ok_or(ConfigError::MissingSkill {
        role: "secondary",
        skill: secondary,
    })?;

    let config = SimulationConfig {
        primary_skill,
        secondary_skill,
        other_skills,
        simulation_count: simulation_count.unwrap_or(DEFAULT_SIMULATION_COUNT),
        starting_antimatter: voyage.max_hp,
        current_antimatter: voyage.current_antimatter(),
        elapsed_seconds: duration.corrected_seconds,
        variance,
    };
    debug!(
        simulation_count = config.simulation_count,
        elapsed_seconds = config.elapsed_seconds,
        variance = config.variance,
        "built simulation config"
    );
    Ok(config)
}
