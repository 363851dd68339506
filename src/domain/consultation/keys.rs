//! Key contract of the shared state map.
//!
//! Engine side writes `curr_question`, `reminders`, `conclusions`, `error`
//! and `done`. Presentation side writes only `<id>_response` (the raw value
//! sequence) and `<id>_response_seq` (the question instance it answers).

use crate::domain::foundation::AskableId;

pub const CURR_QUESTION: &str = "curr_question";
pub const REMINDERS: &str = "reminders";
pub const CONCLUSIONS: &str = "conclusions";
pub const DONE: &str = "done";
pub const ERROR: &str = "error";

/// Key under which the answer for `id` is stored.
pub fn response_key(id: &AskableId) -> String {
    format!("{}_response", id)
}

/// Key under which the question `seq` answered by `<id>_response` is stored.
///
/// Written after the values. A frontend that never writes it still works;
/// its answer is taken as-is.
pub fn response_seq_key(id: &AskableId) -> String {
    format!("{}_response_seq", id)
}
