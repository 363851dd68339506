//! Consultation module - values exchanged between the inference worker
//! and the presentation layer.

mod answer;
pub mod keys;
mod phase;
mod question;

pub use answer::{Answer, ResultSet, SessionSnapshot};
pub use phase::InteractionPhase;
pub use question::{InputWidget, Question, PLACEHOLDER_SEQ};
