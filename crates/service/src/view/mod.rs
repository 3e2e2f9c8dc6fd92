//! Client-side state of the services list page.
//!
//! Kept in the service crate so any front end (or a test) can drive the same
//! fetch/filter/sort behaviour the HTTP API exposes.

pub mod list_view;
pub mod sequence;

pub use list_view::{FetchOutcome, FilterField, ServiceListView, LOAD_FAILED_MESSAGE};
pub use sequence::{FetchTicket, RequestSequencer};
