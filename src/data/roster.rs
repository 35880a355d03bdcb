//! Crew roster: candidates with boosted and unboosted skill values.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::skill::{Proficiency, Skill};
use crate::data::DataError;

/// One crew member available for a voyage lineup.
///
/// `skills` carry equipment boosts and feed the voyage score; `base_skills`
/// are the unboosted values and decide which slots a candidate could fill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub skills: BTreeMap<Skill, Proficiency>,
    #[serde(default)]
    pub base_skills: BTreeMap<Skill, Proficiency>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoredSkill {
    pub skill: Skill,
    pub score: i64,
}

impl Candidate {
    pub fn skill(&self, skill: Skill) -> Option<&Proficiency> {
        self.skills.get(&skill)
    }

    pub fn has_base_skill(&self, skill: Skill) -> bool {
        self.base_skills.contains_key(&skill)
    }

    /// Trait match is case-insensitive; roster traits are stored lowercase
    /// while slot traits arrive capitalized.
    pub fn has_trait(&self, trait_name: &str) -> bool {
        !trait_name.is_empty()
            && self
                .traits
                .iter()
                .any(|t| t.eq_ignore_ascii_case(trait_name))
    }

    /// Skills with a positive core value, strongest first. Equal scores keep display order.
    pub fn scored_skills(&self) -> Vec<ScoredSkill> {
        let mut scored: Vec<ScoredSkill> = Skill::ALL
            .iter()
            .filter_map(|&skill| {
                self.skills
                    .get(&skill)
                    .filter(|p| p.core > 0.0)
                    .map(|p| ScoredSkill {
                        skill,
                        score: p.voyage_score(),
                    })
            })
            .collect();
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RosterFile {
    List(Vec<Candidate>),
    Wrapped { crew: Vec<Candidate> },
}

/// Load a roster from either a bare JSON array or a `{"crew": [...]}` wrapper.
pub fn load_roster(path: impl AsRef<Path>) -> Result<Vec<Candidate>, DataError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: RosterFile = serde_json::from_str(&raw).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match parsed {
        RosterFile::List(crew) | RosterFile::Wrapped { crew } => crew,
    })
}
