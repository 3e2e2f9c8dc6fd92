//! Auth module: mock login that issues a signed token and tracks it in the
//! session store; logout; token authentication.

pub mod domain;
pub mod errors;
pub mod service;

pub use errors::AuthError;
pub use service::{AuthConfig, AuthService};
