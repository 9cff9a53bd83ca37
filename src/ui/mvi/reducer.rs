//! Reducer trait for MVI architecture.

use super::intent::Intent;
use super::state::UiState;

/// Pure transition function for one interaction state machine.
///
/// Reducers never touch the container; whatever an interaction should cause
/// (moving the sheet, raising the close signal) is read back from the
/// resulting state by the owner.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
