//! Checked transitions for lifecycle enums.

use super::ValidationError;

/// A status enum whose legal moves are declared by [`valid_transitions`].
///
/// [`valid_transitions`]: StateMachine::valid_transitions
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    fn valid_transitions(&self) -> Vec<Self>;

    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::illegal_transition(self, target))
        }
    }

    /// No outgoing transitions.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
