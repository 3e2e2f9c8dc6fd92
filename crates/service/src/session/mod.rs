//! Session lifecycle: open (restore persisted sessions), set on login,
//! clear on logout, look up the current identity.

pub mod store;

pub use store::{SessionEntry, SessionStore};
