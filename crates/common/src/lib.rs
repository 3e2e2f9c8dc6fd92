//! Shared plumbing for the service desk crates: logging setup, runtime
//! environment checks and small wire types used by more than one crate.

pub mod env;
pub mod types;
pub mod utils;
