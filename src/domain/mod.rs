//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `askable` - Askable specs, question kinds and answer decoding
//! - `consultation` - Question/answer/result values and the controller phase
//! - `knowledge` - Rules evaluated by the inference engine

pub mod askable;
pub mod consultation;
pub mod foundation;
pub mod knowledge;
