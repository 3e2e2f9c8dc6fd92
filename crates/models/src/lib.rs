//! Domain types for the service desk: service records, their closed
//! category/status sets, create/update inputs and the session identity.

pub mod errors;
pub mod identity;
pub mod sample;
pub mod service_record;

pub use errors::ModelError;
pub use identity::{Identity, Role};
pub use service_record::{
    Category, CreateServiceInput, NewService, ServicePatch, ServiceRecord, ServiceStatus,
    UpdateServiceInput,
};
