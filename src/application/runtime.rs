//! ConsultationRuntime - wires both actors around one shared state.
//!
//! The inference worker runs as its own task; the interaction controller is
//! handed back to the caller, who drives it from user input. The worker can
//! not be interrupted from the presentation side; `shutdown` aborts the task
//! and waits for it to exit.

use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;

use super::handlers::{
    BrokerConfig, DriverError, InferenceDriver, InteractionController, QuestionBroker, RunReport,
};
use super::session::{ConsultationSession, SessionError};
use crate::domain::askable::AskableCatalog;
use crate::ports::{InferenceEngine, Presenter, SharedState};

/// Errors surfaced when joining the inference worker
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("Inference worker was cancelled")]
    Cancelled,

    #[error("Inference worker panicked")]
    Panicked,
}

/// Settings shared by both actors.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub welcome_text: String,
    pub broker: BrokerConfig,
}

/// Handle on the running inference worker.
pub struct ConsultationRuntime {
    worker: JoinHandle<Result<RunReport, DriverError>>,
}

impl ConsultationRuntime {
    /// Seeds shared state, spawns the inference worker and returns the
    /// controller for the presentation side.
    pub fn start<P: Presenter>(
        state: Arc<dyn SharedState>,
        catalog: Arc<AskableCatalog>,
        engine: Arc<dyn InferenceEngine>,
        settings: RuntimeSettings,
        presenter: P,
    ) -> Result<(Self, InteractionController<P>), SessionError> {
        let (engine_side, frontend_side) = ConsultationSession::open(state, &settings.welcome_text)?;
        let engine_side = Arc::new(engine_side);
        let broker = Arc::new(QuestionBroker::new(catalog, Arc::clone(&engine_side), settings.broker));
        let driver = InferenceDriver::new(engine, broker, engine_side);

        let worker = tokio::spawn(async move { driver.run().await });
        let controller = InteractionController::new(frontend_side, presenter);
        Ok((Self { worker }, controller))
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Waits for the worker to exit and returns its report.
    pub async fn join(self) -> Result<RunReport, RuntimeError> {
        match self.worker.await {
            Ok(outcome) => Ok(outcome?),
            Err(err) if err.is_cancelled() => Err(RuntimeError::Cancelled),
            Err(_) => Err(RuntimeError::Panicked),
        }
    }

    /// Terminates the worker (it may be blocked on an answer) and waits for it.
    pub async fn shutdown(self) {
        self.worker.abort();
        match self.worker.await {
            Ok(Ok(report)) => tracing::debug!(run_id = %report.run_id, "Worker had already finished"),
            Ok(Err(err)) => tracing::debug!(error = %err, "Worker had already failed"),
            Err(err) if err.is_cancelled() => tracing::debug!("Worker cancelled"),
            Err(err) => tracing::error!(error = %err, "Worker panicked"),
        }
    }
}
