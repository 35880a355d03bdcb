//! Raw voyage snapshot as exported by the game client.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::roster::Candidate;
use crate::data::skill::{Skill, SkillAggregate};
use crate::data::DataError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoyageStatus {
    /// Lineup proposed but not yet launched.
    #[default]
    Pending,
    Started,
    Failed,
    Recalled,
    Completed,
    #[serde(other)]
    Unknown,
}

impl VoyageStatus {
    /// A failed voyage has run out of antimatter and needs a refill to continue.
    pub fn needs_revive(self) -> bool {
        self == Self::Failed
    }

    /// Recalled and completed voyages are over; there is nothing left to estimate.
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Recalled | Self::Completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoyageSkills {
    pub primary_skill: Skill,
    pub secondary_skill: Skill,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewSlot {
    pub symbol: String,
    pub name: String,
    pub skill: Skill,
    #[serde(rename = "trait", default)]
    pub trait_name: String,
    pub crew: Candidate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoyageState {
    #[serde(default)]
    pub state: VoyageStatus,
    /// Seconds elapsed since launch as reported by the client.
    #[serde(default)]
    pub voyage_duration: u64,
    /// Independent progress counter; see [crate::voyage::config::DurationCheck].
    #[serde(default)]
    pub log_index: u64,
    pub max_hp: i64,
    #[serde(default)]
    pub hp: Option<i64>,
    pub skills: VoyageSkills,
    pub skill_aggregates: BTreeMap<Skill, SkillAggregate>,
    #[serde(default)]
    pub crew_slots: Vec<CrewSlot>,
    #[serde(default)]
    pub ship_id: Option<u64>,
}

impl VoyageState {
    pub fn primary_skill(&self) -> Skill {
        self.skills.primary_skill
    }

    pub fn secondary_skill(&self) -> Skill {
        self.skills.secondary_skill
    }

    /// Current antimatter, falling back to the starting amount when the client omits it.
    pub fn current_antimatter(&self) -> i64 {
        self.hp.unwrap_or(self.max_hp)
    }
}

pub fn load_voyage(path: impl AsRef<Path>) -> Result<VoyageState, DataError> {
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
