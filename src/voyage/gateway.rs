//! Asynchronous boundary to the simulation engine.
//!
//! [SimulationGateway::submit] hands one [SimulationConfig] to a blocking
//! worker and returns an [EstimateHandle]; exactly one result arrives through
//! the handle, or none if the handle is dropped first. Dropping the handle
//! tears down the channel: the engine may finish its run, but nobody observes
//! the result. No timeout is imposed here. The gateway keeps a handle to the
//! Tokio runtime it was built on, so submitting works from any thread.
//!
//! [VoyageEstimator] is the per-voyage owner: it keeps at most one request in
//! flight and replaces (and thereby tears down) any earlier one on resubmit.

use std::sync::Arc;

use thiserror::Error;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::data::VoyageState;
use crate::voyage::config::{build_simulation_config, ConfigError, DurationCheck, SimulationConfig};
use crate::voyage::engine::SimulationEngine;
use crate::voyage::result::SimulationResult;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no tokio runtime to run simulations on: {0}")]
    NoRuntime(#[from] TryCurrentError),
}

#[derive(Clone)]
pub struct SimulationGateway {
    engine: Arc<dyn SimulationEngine>,
    runtime: Handle,
}

impl SimulationGateway {
    /// Gateway on the runtime of the calling context.
    pub fn new<E>(engine: E) -> Result<Self, GatewayError>
    where
        E: SimulationEngine + 'static,
    {
        Ok(Self::on_runtime(engine, Handle::try_current()?))
    }

    pub fn on_runtime<E>(engine: E, runtime: Handle) -> Self
    where
        E: SimulationEngine + 'static,
    {
        Self {
            engine: Arc::new(engine),
            runtime,
        }
    }

    /// Start a simulation on the runtime's blocking pool.
    pub fn submit(&self, config: SimulationConfig) -> EstimateHandle {
        let id = Uuid::new_v4();
        let (sender, receiver) = oneshot::channel();
        let engine = Arc::clone(&self.engine);
        info!(handle = %id, sims = config.simulation_count, "submitted voyage simulation");

        let task = self.runtime.spawn_blocking(move || {
            let result = engine.run(&config);
            if sender.send(result).is_err() {
                debug!(handle = %id, "simulation finished after owner was torn down");
            } else {
                debug!(handle = %id, "simulation finished");
            }
        });

        EstimateHandle {
            id,
            receiver: Some(receiver),
            task,
        }
    }
}

/// Receiving end of one submitted simulation.
#[derive(Debug)]
pub struct EstimateHandle {
    id: Uuid,
    receiver: Option<oneshot::Receiver<SimulationResult>>,
    task: JoinHandle<()>,
}

impl EstimateHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// True until a result has been taken or the engine side has gone away.
    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }

    /// Non-blocking check for the result.
    pub fn try_result(&mut self) -> Option<SimulationResult> {
        let receiver = self.receiver.as_mut()?;
        match receiver.try_recv() {
            Ok(result) => {
                self.receiver = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                self.receiver = None;
                None
            }
        }
    }

    /// Wait for the result. Returns `None` if the engine side went away
    /// without answering or the result was already taken.
    pub async fn result(&mut self) -> Option<SimulationResult> {
        let receiver = self.receiver.take()?;
        receiver.await.ok()
    }
}

impl Drop for EstimateHandle {
    fn drop(&mut self) {
        if self.receiver.is_some() {
            debug!(handle = %self.id, "tearing down pending simulation channel");
        }
        self.task.abort();
    }
}

/// Per-voyage owner of the estimate and its in-flight request.
#[derive(Debug)]
pub struct VoyageEstimator {
    duration: DurationCheck,
    config: Option<SimulationConfig>,
    estimate: Option<SimulationResult>,
    pending: Option<EstimateHandle>,
}

impl VoyageEstimator {
    /// Build the config and submit it, unless an estimate is already known or
    /// the voyage is over.
    pub fn start(
        gateway: &SimulationGateway,
        voyage: &VoyageState,
        precomputed: Option<SimulationResult>,
        simulation_count: Option<u32>,
    ) -> Result<Self, ConfigError> {
        let mut estimator = Self {
            duration: DurationCheck::for_voyage(voyage),
            config: None,
            estimate: precomputed,
            pending: None,
        };
        if estimator.estimate.is_none() && !voyage.state.is_finished() {
            let config = build_simulation_config(voyage, simulation_count)?;
            estimator.resubmit(gateway, config);
        }
        Ok(estimator)
    }

    /// Replace any in-flight request with a new one. The earlier request's
    /// channel is torn down; a previously received estimate stays readable
    /// until the new result lands.
    pub fn resubmit(&mut self, gateway: &SimulationGateway, config: SimulationConfig) {
        if let Some(previous) = self.pending.take() {
            debug!(handle = %previous.id(), "superseding in-flight simulation");
        }
        self.pending = Some(gateway.submit(config.clone()));
        self.config = Some(config);
    }

    pub fn duration_check(&self) -> DurationCheck {
        self.duration
    }

    pub fn config(&self) -> Option<&SimulationConfig> {
        self.config.as_ref()
    }

    pub fn handle_id(&self) -> Option<Uuid> {
        self.pending.as_ref().map(EstimateHandle::id)
    }

    pub fn estimate(&self) -> Option<&SimulationResult> {
        self.estimate.as_ref()
    }

    pub fn is_calculating(&self) -> bool {
        self.pending.is_some()
    }

    /// Pick up a finished result without blocking.
    pub fn poll(&mut self) -> Option<&SimulationResult> {
        if let Some(handle) = self.pending.as_mut() {
            if let Some(result) = handle.try_result() {
                self.estimate = Some(result);
                self.pending = None;
            } else if !handle.is_pending() {
                self.pending = None;
            }
        }
        self.estimate.as_ref()
    }

    /// Wait for the in-flight request, if any, and return the current estimate.
    pub async fn wait(&mut self) -> Option<&SimulationResult> {
        if let Some(mut handle) = self.pending.take() {
            if let Some(result) = handle.result().await {
                self.estimate = Some(result);
            }
        }
        self.estimate.as_ref()
    }
}
