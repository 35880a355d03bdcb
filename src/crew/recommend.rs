//! Per-slot crew recommendations: where a candidate ranks among the crew that
//! could fill the same slot, in the skill where that rank is best.

use serde::Serialize;
use tracing::trace;

use crate::crew::session::RankingSession;
use crate::data::{Candidate, Skill, VoyageStatus};

const POSITION_SUFFIX: [&str; 10] = ["th", "st", "nd", "rd", "th", "th", "th", "th", "th", "th"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub skill: Skill,
    /// 1-based position in the skill ranking.
    pub rank: usize,
    pub text: String,
}

/// `1st`, `2nd`, `11th`, `21st`, `104th`.
pub fn ordinal(position: usize) -> String {
    let suffix = if position > 3 && position < 21 {
        "th"
    } else {
        POSITION_SUFFIX[position % 10]
    };
    format!("{position}{suffix}")
}

pub fn recommendation_text(skill: Skill, rank: usize) -> String {
    if rank == 1 {
        format!("Select top crew in {}", skill.display_name())
    } else {
        format!("Select {} crew in {}", ordinal(rank), skill.display_name())
    }
}

/// Roster members with a positive core in `skill` that could fill a
/// `slot_skill` slot by base skill, strongest first. Equal scores keep roster order.
pub fn skill_ranking(roster: &[Candidate], skill: Skill, slot_skill: Skill) -> Vec<&Candidate> {
    let mut ranked: Vec<(&Candidate, i64)> = roster
        .iter()
        .filter(|c| c.has_base_skill(slot_skill))
        .filter_map(|c| {
            c.skill(skill)
                .filter(|p| p.core > 0.0)
                .map(|p| (c, p.voyage_score()))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().map(|(c, _)| c).collect()
}

/// 1-based rank of `symbol` in [skill_ranking], if present.
pub fn rank_in_skill(roster: &[Candidate], symbol: &str, skill: Skill, slot_skill: Skill) -> Option<usize> {
    skill_ranking(roster, skill, slot_skill)
        .iter()
        .position(|c| c.symbol == symbol)
        .map(|index| index + 1)
}

/// Best skill/rank pair for `candidate` sitting in a `slot_skill` slot.
///
/// Only pending voyages get recommendations. A candidate already seen in this
/// session gets nothing; otherwise the call consumes the candidate's one
/// recommendation whether or not a rank was found. Lower ranks win; on equal
/// ranks the slot's own skill wins, then display order.
pub fn recommend(
    session: &mut RankingSession,
    roster: &[Candidate],
    candidate: &Candidate,
    slot_skill: Skill,
    status: VoyageStatus,
) -> Option<Recommendation> {
    if status != VoyageStatus::Pending || session.is_used(&candidate.symbol) {
        return None;
    }

    let mut best: Option<(Skill, usize)> = None;
    for skill in Skill::ALL.into_iter().filter(|s| candidate.skills.contains_key(s)) {
        let Some(rank) = rank_in_skill(roster, &candidate.symbol, skill, slot_skill) else {
            continue;
        };
        best = match best {
            Some((_, best_rank)) if rank < best_rank => Some((skill, rank)),
            Some((_, best_rank)) if rank == best_rank && skill == slot_skill => Some((skill, rank)),
            Some(current) => Some(current),
            None => Some((skill, rank)),
        };
    }
    session.mark_used(&candidate.symbol);

    trace!(crew = %candidate.symbol, slot_skill = %slot_skill, ?best, "ranked candidate");
    best.map(|(skill, rank)| Recommendation {
        skill,
        rank,
        text: recommendation_text(skill, rank),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Proficiency;

    fn crew(symbol: &str, skills: &[(Skill, f64)], base: &[Skill]) -> Candidate {
        Candidate {
            symbol: symbol.to_string(),
            skills: skills
                .iter()
                .map(|&(skill, core)| (skill, Proficiency::new(core, 0.0, 0.0)))
                .collect(),
            base_skills: base
                .iter()
                .map(|&skill| (skill, Proficiency::new(1.0, 0.0, 0.0)))
                .collect(),
            ..Candidate::default()
        }
    }

    #[test]
    fn ordinals() {
        let cases = [(1, "1st"), (2, "2nd"), (3, "3rd"), (4, "4th"), (11, "11th"), (12, "12th"), (13, "13th"), (21, "21st"), (22, "22nd"), (104, "104th"), (111, "111st")];
        for (position, expected) in cases {
            assert_eq!(ordinal(position), expected);
        }
    }

    #[test]
    fn text_uses_top_for_first_rank() {
        assert_eq!(recommendation_text(Skill::CommandSkill, 1), "Select top crew in Command");
        assert_eq!(recommendation_text(Skill::ScienceSkill, 2), "Select 2nd crew in Science");
    }

    #[test]
    fn ranking_is_limited_to_slot_eligible_crew_and_stable() {
        let roster = vec![
            crew("a", &[(Skill::CommandSkill, 500.0)], &[Skill::CommandSkill]),
            crew("b", &[(Skill::CommandSkill, 900.0)], &[Skill::ScienceSkill]),
            crew("c", &[(Skill::CommandSkill, 500.0)], &[Skill::CommandSkill]),
            crew("d", &[(Skill::CommandSkill, 0.0)], &[Skill::CommandSkill]),
        ];
        let ranked: Vec<&str> = skill_ranking(&roster, Skill::CommandSkill, Skill::CommandSkill)
            .iter()
            .map(|c| c.symbol.as_str())
            .collect();
        assert_eq!(ranked, vec!["a", "c"]);
        assert_eq!(rank_in_skill(&roster, "c", Skill::CommandSkill, Skill::CommandSkill), Some(2));
        assert_eq!(rank_in_skill(&roster, "b", Skill::CommandSkill, Skill::CommandSkill), None);
    }

    #[test]
    fn slot_skill_wins_equal_ranks() {
        let roster = vec![crew(
            "solo",
            &[(Skill::CommandSkill, 100.0), (Skill::MedicineSkill, 50.0)],
            &[Skill::MedicineSkill],
        )];
        let mut session = RankingSession::new();
        let rec = recommend(&mut session, &roster, &roster[0], Skill::MedicineSkill, VoyageStatus::Pending)
            .expect("recommendation expected");
        assert_eq!(rec.skill, Skill::MedicineSkill);
        assert_eq!(rec.rank, 1);
    }

    #[test]
    fn non_pending_voyages_get_nothing_and_consume_nothing() {
        let roster = vec![crew("a", &[(Skill::CommandSkill, 100.0)], &[Skill::CommandSkill])];
        let mut session = RankingSession::new();
        assert_eq!(
            recommend(&mut session, &roster, &roster[0], Skill::CommandSkill, VoyageStatus::Started),
            None
        );
        assert!(session.is_empty());
    }

    #[test]
    fn second_call_for_same_candidate_is_skipped() {
        let roster = vec![crew("a", &[(Skill::CommandSkill, 100.0)], &[Skill::CommandSkill])];
        let mut session = RankingSession::new();
        assert!(recommend(&mut session, &roster, &roster[0], Skill::CommandSkill, VoyageStatus::Pending).is_some());
        assert!(recommend(&mut session, &roster, &roster[0], Skill::CommandSkill, VoyageStatus::Pending).is_none());
    }

    #[test]
    fn unranked_candidate_still_uses_its_turn() {
        let roster = vec![crew("a", &[(Skill::CommandSkill, 100.0)], &[Skill::ScienceSkill])];
        let mut session = RankingSession::new();
        assert!(recommend(&mut session, &roster, &roster[0], Skill::CommandSkill, VoyageStatus::Pending).is_none());
        assert!(session.is_used("a"));
    }
}
