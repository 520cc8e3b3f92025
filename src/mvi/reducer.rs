//! Reducer trait for the MVI loop.

use super::intent::Intent;
use super::state::ModelState;

/// Reducer transforms state based on intents.
///
/// It is the only place where store state changes.
/// Must be pure: (State, Intent) -> State
pub trait Reducer {
    type State: ModelState;

    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
