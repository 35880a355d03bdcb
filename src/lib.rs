//! Voyage length estimation and crew recommendations.
//!
//! A voyage snapshot becomes a [voyage::SimulationConfig], which is simulated
//! out of line through a [voyage::SimulationGateway]. The result is turned
//! into percentile rows and survival curves by [stats]; [crew] ranks the
//! roster to recommend crew for each lineup slot.

pub mod cli;
pub mod crew;
pub mod data;
pub mod logging;
pub mod parallel;
pub mod report;
pub mod server;
pub mod settings;
pub mod stats;
pub mod voyage;
