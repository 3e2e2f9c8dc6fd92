use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct IdentityDoc { pub id: u64, pub name: String, pub email: String, pub role: String }

/// One service record as returned by the API.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ServiceRecordDoc {
    pub id: u64,
    pub name: String,
    /// Development, Design, Marketing, Content, Support or Other
    pub category: String,
    pub description: String,
    /// pending, active, completed or cancelled
    pub status: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct CreateServiceDoc {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(ToSchema)]
pub struct UpdateServiceDoc {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct DashboardSummaryDoc {
    pub total_services: usize,
    pub active_services: usize,
    pub pending_services: usize,
    pub completed_services: usize,
    pub cancelled_services: usize,
    pub recent_services: Vec<ServiceRecordDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::dashboard::summary,
        crate::routes::services::list,
        crate::routes::services::create,
        crate::routes::services::get,
        crate::routes::services::update,
        crate::routes::services::delete,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            IdentityDoc,
            ServiceRecordDoc,
            CreateServiceDoc,
            UpdateServiceDoc,
            DashboardSummaryDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "dashboard"),
        (name = "services")
    )
)]
pub struct ApiDoc;
