//! Persisted login session.

mod store;
mod token;
mod types;

pub use store::{SessionError, SessionStore};
pub use token::AuthToken;
pub use types::{AccountType, Session};
