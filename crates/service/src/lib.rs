//! Service layer for the service desk.
//! - `catalog`: the record store abstraction and the business service on top of it.
//! - `query`: filter/sort pipeline behind the services list.
//! - `dashboard`: summary figures for the landing page.
//! - `view`: client-side list state with fetch sequencing.
//! - `session` / `auth`: session lifecycle and the mock login.

pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod errors;
pub mod latency;
pub mod query;
pub mod session;
pub mod storage;
pub mod view;

pub use catalog::{repository::InMemoryServiceRepository, repository::ServiceRepository, service::ServiceCatalog};
pub use errors::ServiceError;
