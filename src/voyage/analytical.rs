//! Closed-form voyage estimate: walks the same tick schedule as the Monte Carlo
//! engine but applies the expected antimatter change of each hazard instead of
//! a sampled one. Produces a single exact value per refill count.

use crate::data::SkillAggregate;
use crate::voyage::config::SimulationConfig;
use crate::voyage::engine::{
    hazard_difficulty, summarize_runs, walk_voyage, SimulationEngine, HAZARD_AM_FAIL,
    HAZARD_AM_PASS, PRIMARY_HAZARD_CHANCE, SECONDARY_HAZARD_CHANCE,
};
use crate::voyage::result::SimulationResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectedValueEngine;

/// Probability that `core + uniform(range_min, range_max)` meets `difficulty`.
pub fn pass_probability(aggregate: &SkillAggregate, difficulty: f64) -> f64 {
    let p = &aggregate.proficiency;
    let threshold = difficulty - p.core;
    if p.range_max <= p.range_min {
        return if p.range_min >= threshold { 1.0 } else { 0.0 };
    }
    ((p.range_max - threshold) / (p.range_max - p.range_min)).clamp(0.0, 1.0)
}

/// Weighted hazard pass probability across the primary, secondary and other skills.
pub fn hazard_pass_probability(config: &SimulationConfig, hours: f64) -> f64 {
    let difficulty = hazard_difficulty(hours);
    let others = &config.other_skills;
    let other_share = 1.0 - PRIMARY_HAZARD_CHANCE - SECONDARY_HAZARD_CHANCE;
    let secondary_share = if others.is_empty() {
        SECONDARY_HAZARD_CHANCE + other_share
    } else {
        SECONDARY_HAZARD_CHANCE
    };

    let mut probability = PRIMARY_HAZARD_CHANCE * pass_probability(&config.primary_skill, difficulty)
        + secondary_share * pass_probability(&config.secondary_skill, difficulty);
    if !others.is_empty() {
        let each = other_share / others.len() as f64;
        probability += others
            .iter()
            .map(|agg| each * pass_probability(agg, difficulty))
            .sum::<f64>();
    }
    probability
}

impl SimulationEngine for ExpectedValueEngine {
    fn run(&self, config: &SimulationConfig) -> SimulationResult {
        let run = walk_voyage(config, |hours| {
            let pass = hazard_pass_probability(config, hours);
            pass * HAZARD_AM_PASS - (1.0 - pass) * HAZARD_AM_FAIL
        });
        summarize_runs(config, std::slice::from_ref(&run), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Skill;

    fn config() -> SimulationConfig {
        SimulationConfig {
            primary_skill: SkillAggregate::new(Skill::EngineeringSkill, 8000.0, 1000.0, 2500.0),
            secondary_skill: SkillAggregate::new(Skill::SecuritySkill, 6000.0, 700.0, 1800.0),
            other_skills: vec![
                SkillAggregate::new(Skill::CommandSkill, 3000.0, 300.0, 900.0),
                SkillAggregate::new(Skill::MedicineSkill, 2800.0, 200.0, 600.0),
            ],
            simulation_count: 5000,
            starting_antimatter: 2700,
            current_antimatter: 2700,
            elapsed_seconds: 0,
            variance: 0.01,
        }
    }

    #[test]
    fn pass_probability_is_linear_inside_the_range() {
        let agg = SkillAggregate::new(Skill::CommandSkill, 1000.0, 100.0, 300.0);
        assert_eq!(pass_probability(&agg, 1000.0), 1.0);
        assert_eq!(pass_probability(&agg, 1200.0), 0.5);
        assert_eq!(pass_probability(&agg, 1400.0), 0.0);

        let flat = SkillAggregate::new(Skill::CommandSkill, 1000.0, 0.0, 0.0);
        assert_eq!(pass_probability(&flat, 999.0), 1.0);
        assert_eq!(pass_probability(&flat, 1001.0), 0.0);
    }

    #[test]
    fn expected_engine_is_deterministic_with_one_sample_per_outcome() {
        let first = ExpectedValueEngine.run(&config());
        let second = ExpectedValueEngine.run(&config());
        assert_eq!(first, second);
        assert!(first.deterministic);
        for outcome in &first.refills {
            assert_eq!(outcome.all_samples, vec![outcome.result]);
            assert_eq!(outcome.safe_result, outcome.result);
            assert_eq!(outcome.safer_result, outcome.result);
        }
        let extension = first.extension_per_refill().expect("two outcomes expected");
        assert!(extension > 0.0);
    }

    #[test]
    fn early_hazards_are_always_passed() {
        assert!((hazard_pass_probability(&config(), 0.5) - 1.0).abs() < 1e-12);
        assert!(hazard_pass_probability(&config(), 30.0) < 0.01);
    }
}
