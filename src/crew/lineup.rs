//! One ranking pass over a voyage lineup.

use serde::Serialize;

use crate::crew::recommend::{recommend, Recommendation};
use crate::crew::session::RankingSession;
use crate::data::{Candidate, CrewSlot, ScoredSkill, Skill, VoyageState};

/// Canonical slot order for display and ranking.
pub const SLOT_ORDER: [&str; 12] = [
    "captain_slot",
    "first_officer",
    "chief_communications_officer",
    "communications_officer",
    "chief_security_officer",
    "security_officer",
    "chief_engineering_officer",
    "engineering_officer",
    "chief_science_officer",
    "science_officer",
    "chief_medical_officer",
    "medical_officer",
];

/// Antimatter granted when the seated crew carries the slot's trait.
pub const TRAIT_ANTIMATTER_BONUS: i64 = 25;

#[derive(Debug, Clone, Serialize)]
pub struct LineupEntry {
    pub slot: String,
    pub slot_name: String,
    pub crew: String,
    pub crew_name: String,
    pub skill: Skill,
    pub trait_name: String,
    pub trait_match: bool,
    pub scored_skills: Vec<ScoredSkill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillSummary {
    pub skill: Skill,
    pub score: i64,
    pub breakdown: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineupReport {
    pub ship_id: Option<u64>,
    pub antimatter: i64,
    pub trait_bonus: i64,
    pub entries: Vec<LineupEntry>,
    pub skills: Vec<SkillSummary>,
}

/// Slots in canonical order; slots with unknown symbols follow in stored order.
pub fn ordered_slots(voyage: &VoyageState) -> Vec<&CrewSlot> {
    let mut slots: Vec<&CrewSlot> = SLOT_ORDER
        .iter()
        .filter_map(|symbol| voyage.crew_slots.iter().find(|slot| slot.symbol == *symbol))
        .collect();
    slots.extend(
        voyage
            .crew_slots
            .iter()
            .filter(|slot| !SLOT_ORDER.contains(&slot.symbol.as_str())),
    );
    slots
}

fn entry(slot: &CrewSlot, recommendation: Option<Recommendation>) -> LineupEntry {
    let crew: &Candidate = &slot.crew;
    LineupEntry {
        slot: slot.symbol.clone(),
        slot_name: slot.name.clone(),
        crew: crew.symbol.clone(),
        crew_name: crew.name.clone(),
        skill: slot.skill,
        trait_name: slot.trait_name.clone(),
        trait_match: crew.has_trait(&slot.trait_name),
        scored_skills: crew.scored_skills(),
        recommendation,
    }
}

/// Run one pass with the given session. Callers wanting a fresh pass use [rank_lineup].
pub fn rank_lineup_with(
    session: &mut RankingSession,
    voyage: &VoyageState,
    roster: &[Candidate],
) -> Vec<LineupEntry> {
    ordered_slots(voyage)
        .into_iter()
        .map(|slot| {
            let recommendation = recommend(session, roster, &slot.crew, slot.skill, voyage.state);
            entry(slot, recommendation)
        })
        .collect()
}

pub fn rank_lineup(voyage: &VoyageState, roster: &[Candidate]) -> Vec<LineupEntry> {
    rank_lineup_with(&mut RankingSession::new(), voyage, roster)
}

/// Voyage skill aggregates in display order.
pub fn skill_summary(voyage: &VoyageState) -> Vec<SkillSummary> {
    Skill::ALL
        .iter()
        .filter_map(|skill| voyage.skill_aggregates.get(skill))
        .map(|agg| SkillSummary {
            skill: agg.skill,
            score: agg.voyage_score(),
            breakdown: agg.proficiency.breakdown(),
        })
        .collect()
}

pub fn lineup_report(voyage: &VoyageState, roster: &[Candidate]) -> LineupReport {
    let entries = rank_lineup(voyage, roster);
    let trait_bonus = entries.iter().filter(|e| e.trait_match).count() as i64 * TRAIT_ANTIMATTER_BONUS;
    LineupReport {
        ship_id: voyage.ship_id,
        antimatter: voyage.max_hp,
        trait_bonus,
        entries,
        skills: skill_summary(voyage),
    }
}
