pub mod analytical;
pub mod config;
pub mod engine;
pub mod gateway;
pub mod result;
pub mod rng;
pub mod status;

pub use analytical::ExpectedValueEngine;
pub use config::{build_simulation_config, ConfigError, DurationCheck, SimulationConfig};
pub use engine::{MonteCarloEngine, SimulationEngine};
pub use gateway::{EstimateHandle, GatewayError, SimulationGateway, VoyageEstimator};
pub use result::{load_result, RefillOutcome, SimulationResult};
