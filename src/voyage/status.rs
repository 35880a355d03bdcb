//! Short report texts about a voyage's progress.

use crate::data::{VoyageState, VoyageStatus};
use crate::voyage::config::{DURATION_UNIT_SECONDS, LOG_INDEX_UNIT};
use crate::voyage::result::SimulationResult;

pub const DURATION_ADVISORY: &str = "A potential problem with the reported voyage duration has been detected. \
The estimate was corrected for it but may be inaccurate. \
Refresh the voyage data from the game for an accurate estimate.";

/// `"<h>h <m>m"` with both parts floored.
pub fn format_time(hours: f64) -> String {
    let whole = hours.floor();
    let minutes = ((hours - whole) * 60.0).floor();
    format!("{}h {}m", whole as i64, minutes as i64)
}

/// Elapsed hours as shown in the status line. Running voyages use the
/// reported duration; stopped ones use the log index.
pub fn elapsed_hours(voyage: &VoyageState) -> f64 {
    if voyage.state == VoyageStatus::Started {
        voyage.voyage_duration as f64 / 3600.0
    } else {
        voyage.log_index as f64 / (LOG_INDEX_UNIT / 2) as f64
    }
}

fn status_verb(status: VoyageStatus) -> Option<&'static str> {
    match status {
        VoyageStatus::Started => Some(" has been running for "),
        VoyageStatus::Failed => Some(" failed at "),
        VoyageStatus::Recalled | VoyageStatus::Completed => Some(" ran for "),
        VoyageStatus::Pending | VoyageStatus::Unknown => None,
    }
}

/// `"Your voyage (CMD/SCI) has been running for 5h 20m."`; `None` before launch.
pub fn status_message(voyage: &VoyageState) -> Option<String> {
    let verb = status_verb(voyage.state)?;
    Some(format!(
        "Your voyage ({}/{}){}{}.",
        voyage.primary_skill().short_name(),
        voyage.secondary_skill().short_name(),
        verb,
        format_time(elapsed_hours(voyage))
    ))
}

/// Warning shown for a running voyage whose reported duration is ahead of its log index.
pub fn duration_advisory(voyage: &VoyageState) -> Option<&'static str> {
    let ahead = (voyage.voyage_duration / DURATION_UNIT_SECONDS) as i64
        - (voyage.log_index / LOG_INDEX_UNIT) as i64;
    (voyage.state == VoyageStatus::Started && ahead > 0).then_some(DURATION_ADVISORY)
}

pub fn estimate_title(estimate: Option<&SimulationResult>, needs_revive: bool) -> String {
    match estimate.and_then(|e| e.outcome(0)) {
        Some(first) if !needs_revive => format!("Estimate: {}", format_time(first.result)),
        _ => "Estimate".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Skill, VoyageSkills};
    use std::collections::BTreeMap;

    fn voyage(state: VoyageStatus, voyage_duration: u64, log_index: u64) -> VoyageState {
        VoyageState {
            state,
            voyage_duration,
            log_index,
            max_hp: 2500,
            hp: None,
            skills: VoyageSkills {
                primary_skill: Skill::CommandSkill,
                secondary_skill: Skill::DiplomacySkill,
            },
            skill_aggregates: BTreeMap::new(),
            crew_slots: Vec::new(),
            ship_id: None,
        }
    }

    #[test]
    fn formats_hours_and_minutes() {
        assert_eq!(format_time(0.0), "0h 0m");
        assert_eq!(format_time(9.5), "9h 30m");
        assert_eq!(format_time(10.999), "10h 59m");
    }

    #[test]
    fn status_line_per_state() {
        assert_eq!(status_message(&voyage(VoyageStatus::Pending, 0, 0)), None);
        assert_eq!(
            status_message(&voyage(VoyageStatus::Started, 19_800, 0)).as_deref(),
            Some("Your voyage (CMD/DIP) has been running for 5h 30m.")
        );
        assert_eq!(
            status_message(&voyage(VoyageStatus::Failed, 0, 1_800)).as_deref(),
            Some("Your voyage (CMD/DIP) failed at 10h 0m.")
        );
        assert_eq!(
            status_message(&voyage(VoyageStatus::Completed, 0, 360)).as_deref(),
            Some("Your voyage (CMD/DIP) ran for 2h 0m.")
        );
    }

    #[test]
    fn advisory_only_for_running_voyages_ahead_of_log() {
        assert!(duration_advisory(&voyage(VoyageStatus::Started, 22_000, 400)).is_some());
        assert!(duration_advisory(&voyage(VoyageStatus::Started, 21_600, 3_600)).is_none());
        assert!(duration_advisory(&voyage(VoyageStatus::Failed, 22_000, 400)).is_none());
    }

    #[test]
    fn title_without_estimate_or_when_reviving() {
        assert_eq!(estimate_title(None, false), "Estimate");
    }
}
