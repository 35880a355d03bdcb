//! Runtime settings read from `VOYAGE_*` environment variables.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use tracing::warn;

use crate::parallel::WorkerPool;
use crate::voyage::config::DEFAULT_SIMULATION_COUNT;
use crate::voyage::MonteCarloEngine;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_MAX_SIMULATIONS: u32 = 100_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    pub default_simulations: u32,
    pub max_simulations: u32,
    /// Rayon workers for the Monte Carlo engine; 0 uses every core.
    pub workers: usize,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            default_simulations: DEFAULT_SIMULATION_COUNT,
            max_simulations: DEFAULT_MAX_SIMULATIONS,
            workers: 0,
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup. Invalid values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let mut settings = Self {
            bind_addr: lookup("VOYAGE_BIND")
                .filter(|addr| !addr.trim().is_empty())
                .unwrap_or(defaults.bind_addr),
            default_simulations: parse_var(&lookup, "VOYAGE_SIMS", defaults.default_simulations),
            max_simulations: parse_var(&lookup, "VOYAGE_MAX_SIMS", defaults.max_simulations),
            workers: parse_var(&lookup, "VOYAGE_WORKERS", defaults.workers),
            seed: lookup("VOYAGE_SEED").and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    warn!(value = %raw, "invalid VOYAGE_SEED, drawing fresh seeds");
                    None
                }
            }),
        };

        if settings.max_simulations == 0 {
            warn!("VOYAGE_MAX_SIMS must be positive, defaulting to {DEFAULT_MAX_SIMULATIONS}");
            settings.max_simulations = DEFAULT_MAX_SIMULATIONS;
        }
        if !(1..=settings.max_simulations).contains(&settings.default_simulations) {
            let fallback = DEFAULT_SIMULATION_COUNT.min(settings.max_simulations);
            warn!(
                value = settings.default_simulations,
                max = settings.max_simulations,
                "VOYAGE_SIMS out of range, defaulting to {fallback}"
            );
            settings.default_simulations = fallback;
        }
        settings
    }

    pub fn worker_pool(&self) -> WorkerPool {
        WorkerPool::with_workers(self.workers)
    }

    /// Monte Carlo engine on the configured pool. `seed` overrides `VOYAGE_SEED`.
    pub fn monte_carlo_engine(&self, seed: Option<u64>) -> MonteCarloEngine {
        MonteCarloEngine::new(self.worker_pool()).with_seed(seed.or(self.seed))
    }
}

fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    raw.trim().parse::<T>().unwrap_or_else(|_| {
        warn!(key, value = %raw, "invalid setting, defaulting to {default}");
        default
    })
}
