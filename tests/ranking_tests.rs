use voyage_estimator::crew::{
    lineup_report, ordinal, rank_lineup, rank_lineup_with, recommend, RankingSession,
};
use voyage_estimator::data::{load_roster, load_voyage, Candidate, Skill, VoyageState, VoyageStatus};

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn voyage() -> VoyageState {
    load_voyage(fixture("voyage_pending.json")).expect("voyage fixture should load")
}

fn roster() -> Vec<Candidate> {
    load_roster(fixture("roster.json")).expect("roster fixture should load")
}

fn candidate<'a>(roster: &'a [Candidate], symbol: &str) -> &'a Candidate {
    roster
        .iter()
        .find(|c| c.symbol == symbol)
        .expect("fixture crew should exist")
}

#[test]
fn lineup_pass_recommends_in_canonical_slot_order() {
    let entries = rank_lineup(&voyage(), &roster());
    let slots: Vec<&str> = entries.iter().map(|e| e.slot.as_str()).collect();
    assert_eq!(
        slots,
        vec![
            "captain_slot",
            "first_officer",
            "chief_science_officer",
            "science_officer",
            "chief_medical_officer"
        ]
    );

    let texts: Vec<Option<&str>> = entries
        .iter()
        .map(|e| e.recommendation.as_ref().map(|r| r.text.as_str()))
        .collect();
    assert_eq!(
        texts,
        vec![
            Some("Select top crew in Command"),
            Some("Select top crew in Diplomacy"),
            Some("Select top crew in Command"),
            Some("Select top crew in Science"),
            Some("Select top crew in Medicine"),
        ]
    );
}

#[test]
fn lower_rank_beats_the_slot_skill() {
    let roster = roster();
    let mut session = RankingSession::new();
    let sulu = candidate(&roster, "sulu");
    let rec = recommend(&mut session, &roster, sulu, Skill::ScienceSkill, VoyageStatus::Pending)
        .expect("sulu ranks in both skills");
    assert_eq!(rec.skill, Skill::CommandSkill);
    assert_eq!(rec.rank, 1);
}

#[test]
fn non_top_rank_uses_ordinal_text() {
    let roster = roster();
    let mut session = RankingSession::new();
    let chekov = candidate(&roster, "chekov");
    let rec = recommend(&mut session, &roster, chekov, Skill::ScienceSkill, VoyageStatus::Pending)
        .expect("chekov ranks in science");
    assert_eq!(rec.skill, Skill::ScienceSkill);
    assert_eq!(rec.rank, 2);
    assert_eq!(rec.text, "Select 2nd crew in Science");
}

#[test]
fn repeated_passes_are_deterministic() {
    let voyage = voyage();
    let roster = roster();
    let first: Vec<_> = rank_lineup(&voyage, &roster)
        .into_iter()
        .map(|e| e.recommendation)
        .collect();
    let second: Vec<_> = rank_lineup(&voyage, &roster)
        .into_iter()
        .map(|e| e.recommendation)
        .collect();
    assert_eq!(first, second);
}

#[test]
fn candidate_in_two_slots_is_recommended_once() {
    let mut voyage = voyage();
    let mut second_seat = voyage
        .crew_slots
        .iter()
        .find(|s| s.symbol == "captain_slot")
        .cloned()
        .expect("fixture has a captain");
    second_seat.symbol = "medical_officer".to_string();
    second_seat.skill = Skill::MedicineSkill;
    voyage.crew_slots.push(second_seat);

    let entries = rank_lineup(&voyage, &roster());
    let kirk_seats: Vec<_> = entries.iter().filter(|e| e.crew == "kirk").collect();
    assert_eq!(kirk_seats.len(), 2);
    assert!(kirk_seats[0].recommendation.is_some());
    assert!(kirk_seats[1].recommendation.is_none());

    let mut seen = std::collections::HashSet::new();
    for entry in entries.iter().filter(|e| e.recommendation.is_some()) {
        assert!(seen.insert(entry.crew.clone()), "{} recommended twice", entry.crew);
    }
}

#[test]
fn shared_session_spans_one_pass_only() {
    let voyage = voyage();
    let roster = roster();
    let mut session = RankingSession::new();
    let first = rank_lineup_with(&mut session, &voyage, &roster);
    assert!(first.iter().all(|e| e.recommendation.is_some()));
    assert_eq!(session.len(), first.len());

    let reused = rank_lineup_with(&mut session, &voyage, &roster);
    assert!(reused.iter().all(|e| e.recommendation.is_none()));
}

#[test]
fn committed_voyages_get_no_recommendations() {
    let mut voyage = voyage();
    voyage.state = VoyageStatus::Started;
    assert!(rank_lineup(&voyage, &roster())
        .iter()
        .all(|e| e.recommendation.is_none()));
}

#[test]
fn report_includes_traits_and_skill_summary() {
    let report = lineup_report(&voyage(), &roster());
    assert_eq!(report.ship_id, Some(1701));
    assert_eq!(report.antimatter, 2500);
    assert_eq!(report.trait_bonus, 75);
    assert_eq!(report.skills.len(), 6);
    assert_eq!(report.skills[0].skill, Skill::CommandSkill);
    assert_eq!(report.skills[0].score, 11_000);
    assert_eq!(report.skills[0].breakdown, "9000 +(1000-3000)");

    let kirk = &report.entries[0];
    assert_eq!(kirk.crew, "kirk");
    assert!(kirk.trait_match);
    let kirk_skills: Vec<(Skill, i64)> = kirk.scored_skills.iter().map(|s| (s.skill, s.score)).collect();
    assert_eq!(
        kirk_skills,
        vec![(Skill::CommandSkill, 1400), (Skill::DiplomacySkill, 1000)]
    );
}

#[test]
fn ordinal_formatting() {
    for (position, expected) in [(2, "2nd"), (11, "11th"), (12, "12th"), (13, "13th"), (21, "21st"), (22, "22nd"), (104, "104th")] {
        assert_eq!(ordinal(position), expected);
    }
}
