use std::sync::Arc;

use service::auth::AuthService;
use service::ServiceCatalog;

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub catalog: Arc<ServiceCatalog>,
    pub auth: Arc<AuthService>,
    pub recent_limit: usize,
}
