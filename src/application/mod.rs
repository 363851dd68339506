//! Application layer - the question/answer protocol and its two actors.
//!
//! `session` owns the key contract over shared state; `handlers` hold the
//! engine-side broker and driver and the presentation-side controller;
//! `runtime` wires them together.

pub mod handlers;
pub mod runtime;
pub mod session;

pub use handlers::{
    BrokerConfig, ControllerError, ControllerStep, DriverError, InferenceDriver, InteractionController,
    QuestionBroker, RunReport,
};
pub use runtime::{ConsultationRuntime, RuntimeError, RuntimeSettings};
pub use session::{ConsultationSession, EngineSide, FrontendSide, SessionError};
