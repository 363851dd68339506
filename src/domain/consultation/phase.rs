//! InteractionPhase - state machine of the presentation-side controller.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Phase of the interaction controller.
///
/// ```text
/// Welcome ──advance──▶ Advancing ──new question──▶ Asking ──advance──▶ Advancing
///                          │                                             │
///                          └──────────────done──────▶ Done ◀───done──────┘
///                                                      │
///                                                   advance
///                                                      ▼
///                                                   Finished
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InteractionPhase {
    #[default]
    Welcome,
    Asking,
    Advancing,
    Done,
    Finished,
}

impl InteractionPhase {
    /// True while an answer may be submitted for the current question.
    pub fn accepts_answer(&self) -> bool {
        matches!(self, InteractionPhase::Asking)
    }
}

impl StateMachine for InteractionPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use InteractionPhase::*;
        matches!(
            (self, target),
            (Welcome, Advancing)
                | (Asking, Advancing)
                | (Advancing, Asking)
                | (Advancing, Done)
                | (Done, Finished)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use InteractionPhase::*;
        match self {
            Welcome => vec![Advancing],
            Asking => vec![Advancing],
            Advancing => vec![Asking, Done],
            Done => vec![Finished],
            Finished => vec![],
        }
    }
}

impl fmt::Display for InteractionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InteractionPhase::Welcome => "Welcome",
            InteractionPhase::Asking => "Asking",
            InteractionPhase::Advancing => "Advancing",
            InteractionPhase::Done => "Done",
            InteractionPhase::Finished => "Finished",
        };
        write!(f, "{}", s)
    }
}
