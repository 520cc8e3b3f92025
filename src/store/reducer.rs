use crate::mvi::Reducer;
use crate::store::intent::StoreIntent;
use crate::store::state::StoreState;

pub struct StoreReducer;

impl Reducer for StoreReducer {
    type State = StoreState;
    type Intent = StoreIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            StoreIntent::Write { entries, .. } => {
                for entry in entries {
                    state.set(entry);
                }
                state
            }
            StoreIntent::Clear => StoreState::default(),
        }
    }
}
