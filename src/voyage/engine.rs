//! Voyage simulation engines behind the gateway boundary.
//!
//! The gateway only relies on [SimulationEngine]: one [SimulationConfig] in,
//! one [SimulationResult] out. [MonteCarloEngine] samples voyages; the
//! deterministic counterpart lives in [crate::voyage::analytical].
//!
//! Voyage model: time advances in 20-second ticks. A 28-tick cycle holds six
//! hazards, eighteen activity ticks (1 antimatter each) and four idle ticks.
//! Every two hours a dilemma pauses the voyage. A hazard tests one skill
//! against a difficulty that grows linearly with voyage time; passing gains
//! antimatter, failing loses much more. The voyage ends when antimatter runs
//! out; a refill restores the starting amount.

use rayon::prelude::*;
use tracing::debug;
use uuid::Uuid;

use crate::data::SkillAggregate;
use crate::parallel::WorkerPool;
use crate::voyage::config::SimulationConfig;
use crate::voyage::result::{RefillOutcome, SimulationResult};
use crate::voyage::rng::Rng;

pub const SECONDS_PER_TICK: u64 = 20;
pub const TICKS_PER_CYCLE: u64 = 28;
/// Cycle positions from here on are idle.
pub const IDLE_TICK_START: u64 = 24;
/// Two hours of ticks between dilemmas.
pub const TICKS_PER_DILEMMA: u64 = 360;
pub const ACTIVITY_AM_COST: f64 = 1.0;
pub const HAZARD_AM_PASS: f64 = 5.0;
pub const HAZARD_AM_FAIL: f64 = 30.0;
pub const HAZARD_SKILL_PER_HOUR: f64 = 1260.0;
pub const PRIMARY_HAZARD_CHANCE: f64 = 0.35;
pub const SECONDARY_HAZARD_CHANCE: f64 = 0.25;
/// Refill counts reported per result (none, one, two).
pub const REPORTED_REFILLS: usize = 3;
pub const MAX_REFILLS: u32 = 50;
/// Runs are cut off here so an overwhelming lineup cannot loop forever.
pub const MAX_VOYAGE_HOURS: f64 = 200.0;
pub const TWENTY_HOURS: f64 = 20.0;
pub const MINUTES_PER_DILITHIUM: f64 = 5.0;

pub trait SimulationEngine: Send + Sync {
    fn run(&self, config: &SimulationConfig) -> SimulationResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    Activity,
    Hazard,
    Idle,
    Dilemma,
}

pub fn tick_kind(tick: u64) -> TickKind {
    if tick > 0 && tick % TICKS_PER_DILEMMA == 0 {
        return TickKind::Dilemma;
    }
    let position = tick % TICKS_PER_CYCLE;
    if position >= IDLE_TICK_START {
        TickKind::Idle
    } else if position % 4 == 3 {
        TickKind::Hazard
    } else {
        TickKind::Activity
    }
}

pub fn tick_hours(tick: u64) -> f64 {
    (tick * SECONDS_PER_TICK) as f64 / 3600.0
}

pub fn hazard_difficulty(hours: f64) -> f64 {
    HAZARD_SKILL_PER_HOUR * hours
}

/// Dilithium to refill a voyage that ran dry after `hours`.
pub fn refill_cost(hours: f64) -> f64 {
    (hours * 60.0 / MINUTES_PER_DILITHIUM).ceil()
}

/// One walked voyage: end time per reported refill count plus the refill
/// schedule needed to pass twenty hours.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RunOutcome {
    pub ends: Vec<f64>,
    pub twenty_hour_refills: u32,
    pub twenty_hour_dilithium: u64,
}

/// Walk one voyage from the configured state. `hazard` returns the antimatter
/// change for a hazard at the given voyage hour.
pub(crate) fn walk_voyage<F>(config: &SimulationConfig, mut hazard: F) -> RunOutcome
where
    F: FnMut(f64) -> f64,
{
    let start_am = config.starting_antimatter as f64;
    let mut tick = config.elapsed_seconds / SECONDS_PER_TICK;
    let mut am = config.current_antimatter as f64;
    let mut refills = 0u32;
    let mut dilithium = 0u64;
    let mut twenty_hour: Option<(u32, u64)> = None;
    let mut ends = Vec::with_capacity(REPORTED_REFILLS);

    if am <= 0.0 {
        dilithium += refill_cost(tick_hours(tick)) as u64;
        refills = 1;
        am = start_am;
    }

    loop {
        while am > 0.0 && tick_hours(tick) < MAX_VOYAGE_HOURS {
            tick += 1;
            match tick_kind(tick) {
                TickKind::Activity => am -= ACTIVITY_AM_COST,
                TickKind::Hazard => am += hazard(tick_hours(tick)),
                TickKind::Idle | TickKind::Dilemma => {}
            }
        }

        let end = tick_hours(tick);
        if ends.len() < REPORTED_REFILLS {
            ends.push(end);
        }
        if twenty_hour.is_none() && end >= TWENTY_HOURS {
            twenty_hour = Some((refills, dilithium));
        }
        if ends.len() >= REPORTED_REFILLS && twenty_hour.is_some() {
            break;
        }
        if refills >= MAX_REFILLS || end >= MAX_VOYAGE_HOURS {
            // Fill any outcomes the cut-off left unrecorded with the final time.
            ends.resize(REPORTED_REFILLS, end);
            twenty_hour.get_or_insert((refills, dilithium));
            break;
        }

        dilithium += refill_cost(end) as u64;
        refills += 1;
        am = start_am;
    }

    let (twenty_hour_refills, twenty_hour_dilithium) = twenty_hour.unwrap_or((refills, dilithium));
    RunOutcome {
        ends,
        twenty_hour_refills,
        twenty_hour_dilithium,
    }
}

/// Nearest-rank percentile (rounding down) over an ascending slice.
pub(crate) fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let index = ((sorted.len() - 1) as f64 * fraction).floor() as usize;
    sorted[index.min(sorted.len() - 1)]
}

/// Dilemma checkpoint closest to `hours`, never earlier than the first one.
pub fn nearest_dilemma(hours: f64) -> u32 {
    let dilemma_hours = (TICKS_PER_DILEMMA * SECONDS_PER_TICK / 3600) as f64;
    ((hours / dilemma_hours).round().max(1.0) * dilemma_hours) as u32
}

pub(crate) fn summarize_runs(
    config: &SimulationConfig,
    runs: &[RunOutcome],
    deterministic: bool,
) -> SimulationResult {
    let outcome_count = runs.iter().map(|run| run.ends.len()).min().unwrap_or(0);
    let needs_revive = config.current_antimatter <= 0;
    let elapsed_hours = config.elapsed_seconds as f64 / 3600.0;

    let mut refills = Vec::with_capacity(outcome_count);
    let mut previous: Option<f64> = None;
    for index in 0..outcome_count {
        let samples: Vec<f64> = runs.iter().map(|run| run.ends[index]).collect();
        let mut sorted = samples.clone();
        sorted.sort_by(f64::total_cmp);

        let result = percentile(&sorted, 0.5);
        let last_dilemma = nearest_dilemma(result);
        let reached = sorted
            .iter()
            .filter(|&&hours| hours >= last_dilemma as f64)
            .count();
        let cost = match previous {
            Some(previous_result) => refill_cost(previous_result),
            None if needs_revive => refill_cost(elapsed_hours),
            None => 0.0,
        };
        previous = Some(result);

        refills.push(RefillOutcome {
            result,
            safe_result: percentile(&sorted, 0.1),
            safer_result: percentile(&sorted, 0.01),
            dil_chance: reached as f64 / sorted.len() as f64 * 100.0,
            last_dilemma,
            refill_cost: cost,
            all_samples: samples,
        });
    }

    let mut schedules: Vec<(u32, u64)> = runs
        .iter()
        .map(|run| (run.twenty_hour_refills, run.twenty_hour_dilithium))
        .collect();
    schedules.sort_unstable();
    let (twenty_hour_refills, twenty_hour_dilithium) = schedules
        .get(schedules.len() / 2)
        .copied()
        .unwrap_or_default();

    SimulationResult {
        deterministic,
        refills,
        twenty_hour_refills,
        twenty_hour_dilithium,
    }
}

/// Monte Carlo engine: `simulation_count` independent voyages spread across a worker pool.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloEngine {
    pool: WorkerPool,
    seed: Option<u64>,
    sequential: bool,
}

impl MonteCarloEngine {
    pub fn new(pool: WorkerPool) -> Self {
        Self {
            pool,
            seed: None,
            sequential: false,
        }
    }

    /// Fix the seed so repeated runs of the same config give identical results.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Run on the calling thread only. Results match the parallel path for the same seed.
    pub fn sequential(mut self) -> Self {
        self.sequential = true;
        self
    }

    fn simulate(config: &SimulationConfig, seed: u64, run_index: u64) -> RunOutcome {
        let mut rng = Rng::for_run(seed, run_index);
        let luck = 1.0 + config.variance * rng.uniform(-1.0, 1.0);
        walk_voyage(config, |hours| {
            let skill = pick_hazard_skill(config, rng.next_f64());
            let p = &skill.proficiency;
            let roll = (p.core + rng.uniform(p.range_min, p.range_max)) * luck;
            if roll >= hazard_difficulty(hours) {
                HAZARD_AM_PASS
            } else {
                -HAZARD_AM_FAIL
            }
        })
    }
}

impl SimulationEngine for MonteCarloEngine {
    fn run(&self, config: &SimulationConfig) -> SimulationResult {
        let seed = self.seed.unwrap_or_else(fresh_seed);
        let run_count = u64::from(config.simulation_count.max(1));

        let runs: Vec<RunOutcome> = if self.sequential {
            (0..run_count)
                .map(|index| Self::simulate(config, seed, index))
                .collect()
        } else {
            self.pool.install(|| {
                (0..run_count)
                    .into_par_iter()
                    .map(|index| Self::simulate(config, seed, index))
                    .collect()
            })
        };

        debug!(runs = run_count, seed, "monte carlo voyage simulation finished");
        summarize_runs(config, &runs, false)
    }
}

/// Map a uniform draw to the skill tested by a hazard.
pub fn pick_hazard_skill(config: &SimulationConfig, draw: f64) -> &SkillAggregate {
    let others = &config.other_skills;
    if draw < PRIMARY_HAZARD_CHANCE {
        &config.primary_skill
    } else if draw < PRIMARY_HAZARD_CHANCE + SECONDARY_HAZARD_CHANCE || others.is_empty() {
        &config.secondary_skill
    } else {
        let share = 1.0 - PRIMARY_HAZARD_CHANCE - SECONDARY_HAZARD_CHANCE;
        let position = (draw - PRIMARY_HAZARD_CHANCE - SECONDARY_HAZARD_CHANCE) / share;
        let index = ((position * others.len() as f64) as usize).min(others.len() - 1);
        &others[index]
    }
}

fn fresh_seed() -> u64 {
    (Uuid::new_v4().as_u128() >> 64) as u64
}
