//! Shared interaction store: state, intents, reducer and the cloneable
//! handle every consumer reads from.

mod intent;
mod reducer;
mod seed;
mod shared;
mod state;

pub use intent::{Origin, StoreIntent};
pub use reducer::StoreReducer;
pub use seed::{parse_page, FeedItem, PosterDetails};
pub use shared::{PropagationEvent, SharedStore, DEFAULT_BROADCAST_CAPACITY};
pub use state::StoreState;
