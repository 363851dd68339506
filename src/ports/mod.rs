//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SharedState` - key/value medium between the two actors
//! - `InferenceEngine` / `FactProvider` - the rule evaluator and its fact callback
//! - `Presenter` - rendering of questions and results

mod inference_engine;
mod presenter;
mod shared_state;

pub use inference_engine::{EngineError, FactProvider, InferenceEngine, ResolveError};
pub use presenter::{Presenter, PresenterError};
pub use shared_state::{SharedState, SharedStateError};
