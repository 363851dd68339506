//! State machine trait for phase enums.
//!
//! Gives phase enums (such as the interaction controller's phase) one
//! way to declare legal transitions and to perform checked moves.

use super::ValidationError;

/// Trait for enums that represent a finite state machine.
///
/// ```ignore
/// impl StateMachine for InteractionPhase {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Asking, Advancing) | (Advancing, Done))
///     }
///     fn valid_transitions(&self) -> Vec<Self> { /* ... */ }
/// }
///
/// let next = phase.transition_to(InteractionPhase::Advancing)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
