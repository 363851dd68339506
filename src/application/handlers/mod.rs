//! Application handlers.
//!
//! - `QuestionBroker` - engine-side fact resolution through the user
//! - `InferenceDriver` - one full evaluation run
//! - `InteractionController` - presentation-side state machine

mod inference_driver;
mod interaction_controller;
mod question_broker;

pub use inference_driver::{DriverError, InferenceDriver, RunReport};
pub use interaction_controller::{ControllerError, ControllerStep, InteractionController};
pub use question_broker::{BrokerConfig, QuestionBroker};
