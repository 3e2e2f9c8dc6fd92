use axum::{extract::State, Json};

use service::dashboard::DashboardSummary;

use crate::errors::JsonApiError;
use crate::observability;
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/dashboard", tag = "dashboard", responses((status = 200, description = "Counts per status and the most recent services", body = crate::openapi::DashboardSummaryDoc), (status = 401, description = "Unauthorized")))]
pub async fn summary(State(state): State<ServerState>) -> Result<Json<DashboardSummary>, JsonApiError> {
    let summary = state.catalog.summary(state.recent_limit).await?;
    observability::record_operation("dashboard");
    Ok(Json(summary))
}
