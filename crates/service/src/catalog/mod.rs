//! Service records: storage abstraction (`repository`) and the business
//! service used by the HTTP layer (`service`).

pub mod repository;
pub mod service;
