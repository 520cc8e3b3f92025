//! Model-View-Intent primitives for the interaction store.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ mounted views
//!    ↑                                  │
//!    └──── dispatcher / reconciler ─────┘
//! ```
//!
//! - **State**: the full table of interaction values
//! - **Intent**: a seed, optimistic write, confirmation, rollback or clear
//! - **Reducer**: pure function applying an intent to the state

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::ModelState;
