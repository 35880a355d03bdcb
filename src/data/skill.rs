//! Voyage skills and the shared voyage-score formula.
//!
//! Every strength comparison in the crate (simulation config, crew ranking,
//! lineup listings) goes through [voyage_score] so the estimate and the
//! recommendations agree on relative candidate strength.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    CommandSkill,
    ScienceSkill,
    SecuritySkill,
    EngineeringSkill,
    DiplomacySkill,
    MedicineSkill,
}

impl Skill {
    /// All skills in display order. Iteration order here is also the
    /// tie-break order for equal recommendation ranks.
    pub const ALL: [Skill; 6] = [
        Skill::CommandSkill,
        Skill::ScienceSkill,
        Skill::SecuritySkill,
        Skill::EngineeringSkill,
        Skill::DiplomacySkill,
        Skill::MedicineSkill,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Self::CommandSkill => "command_skill",
            Self::ScienceSkill => "science_skill",
            Self::SecuritySkill => "security_skill",
            Self::EngineeringSkill => "engineering_skill",
            Self::DiplomacySkill => "diplomacy_skill",
            Self::MedicineSkill => "medicine_skill",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::CommandSkill => "Command",
            Self::ScienceSkill => "Science",
            Self::SecuritySkill => "Security",
            Self::EngineeringSkill => "Engineering",
            Self::DiplomacySkill => "Diplomacy",
            Self::MedicineSkill => "Medicine",
        }
    }

    pub const fn short_name(self) -> &'static str {
        match self {
            Self::CommandSkill => "CMD",
            Self::ScienceSkill => "SCI",
            Self::SecuritySkill => "SEC",
            Self::EngineeringSkill => "ENG",
            Self::DiplomacySkill => "DIP",
            Self::MedicineSkill => "MED",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Base value plus min/max proficiency range for one skill.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Proficiency {
    pub core: f64,
    #[serde(default)]
    pub range_min: f64,
    #[serde(default)]
    pub range_max: f64,
}

impl Proficiency {
    pub const fn new(core: f64, range_min: f64, range_max: f64) -> Self {
        Self {
            core,
            range_min,
            range_max,
        }
    }

    pub fn voyage_score(&self) -> i64 {
        voyage_score(self)
    }

    /// Human-readable breakdown, e.g. `"1200 +(300-650)"`.
    pub fn breakdown(&self) -> String {
        format!("{} +({}-{})", self.core, self.range_min, self.range_max)
    }
}

/// `floor(core + (range_min + range_max) / 2)`.
pub fn voyage_score(proficiency: &Proficiency) -> i64 {
    (proficiency.core + (proficiency.range_min + proficiency.range_max) / 2.0).floor() as i64
}

/// A voyage-level skill aggregate: the skill id together with its proficiency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillAggregate {
    pub skill: Skill,
    #[serde(flatten)]
    pub proficiency: Proficiency,
}

impl SkillAggregate {
    pub const fn new(skill: Skill, core: f64, range_min: f64, range_max: f64) -> Self {
        Self {
            skill,
            proficiency: Proficiency::new(core, range_min, range_max),
        }
    }

    pub fn voyage_score(&self) -> i64 {
        voyage_score(&self.proficiency)
    }
}
