pub mod roster;
pub mod skill;
pub mod voyage;

use std::path::PathBuf;

use thiserror::Error;

pub use roster::{load_roster, Candidate, ScoredSkill};
pub use skill::{voyage_score, Proficiency, Skill, SkillAggregate};
pub use voyage::{load_voyage, CrewSlot, VoyageSkills, VoyageState, VoyageStatus};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
