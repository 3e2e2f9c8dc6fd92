use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use models::{CreateServiceInput, ServiceRecord, UpdateServiceInput};
use service::query::{FilterSpec, SortDirection, SortKey, SortSpec};

use crate::errors::JsonApiError;
use crate::observability;
use crate::state::ServerState;

/// List-view query string. Absent or `All` filters mean "any".
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    /// `name`, `category`, `status` or `createdAt`
    pub sort: Option<String>,
    /// `asc` or `desc`
    pub direction: Option<String>,
}

impl ListQuery {
    /// Without a `sort` the list is newest first; with one but no
    /// `direction` it sorts ascending.
    pub fn sort_spec(&self) -> Result<SortSpec, JsonApiError> {
        let Some(key) = self.sort.as_deref().filter(|s| !s.trim().is_empty()) else {
            return match self.direction.as_deref() {
                Some(d) => Ok(SortSpec::new(SortSpec::default().key, d.parse::<SortDirection>()?)),
                None => Ok(SortSpec::default()),
            };
        };
        let key = key.parse::<SortKey>()?;
        let direction = match self.direction.as_deref() {
            Some(d) => d.parse::<SortDirection>()?,
            None => SortDirection::Ascending,
        };
        Ok(SortSpec::new(key, direction))
    }

    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec { category: self.category.clone(), status: self.status.clone(), search: self.search.clone() }
    }
}

#[utoipa::path(
    get, path = "/api/services", tag = "services",
    params(ListQuery),
    responses(
        (status = 200, description = "Filtered and sorted services", body = [crate::openapi::ServiceRecordDoc]),
        (status = 400, description = "Unknown sort key or direction"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<ServiceRecord>>, JsonApiError> {
    let sort = q.sort_spec()?;
    let rows = state.catalog.list(&q.filter_spec(), &sort).await?;
    observability::record_operation("list");
    info!(count = rows.len(), sort = %sort.key, direction = sort.direction.as_str(), "list services");
    Ok(Json(rows))
}

#[utoipa::path(
    post, path = "/api/services", tag = "services",
    request_body = crate::openapi::CreateServiceDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ServiceRecordDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreateServiceInput>,
) -> Result<(StatusCode, Json<ServiceRecord>), JsonApiError> {
    let new = input.into_new_service()?;
    let created = state.catalog.create(new).await?;
    observability::record_operation("create");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/services/{id}", tag = "services",
    params(("id" = u64, Path, description = "Service id")),
    responses((status = 200, description = "Found", body = crate::openapi::ServiceRecordDoc), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<u64>) -> Result<Json<ServiceRecord>, JsonApiError> {
    let record = state.catalog.get(id).await?;
    observability::record_operation("get");
    Ok(Json(record))
}

#[utoipa::path(
    put, path = "/api/services/{id}", tag = "services",
    params(("id" = u64, Path, description = "Service id")),
    request_body = crate::openapi::UpdateServiceDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ServiceRecordDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateServiceInput>,
) -> Result<Json<ServiceRecord>, JsonApiError> {
    let patch = input.into_patch()?;
    let updated = state.catalog.update(id, patch).await?;
    observability::record_operation("update");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/services/{id}", tag = "services",
    params(("id" = u64, Path, description = "Service id")),
    responses((status = 200, description = "Deleted record", body = crate::openapi::ServiceRecordDoc), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<u64>) -> Result<Json<ServiceRecord>, JsonApiError> {
    let removed = state.catalog.delete(id).await?;
    observability::record_operation("delete");
    Ok(Json(removed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(sort: Option<&str>, direction: Option<&str>) -> ListQuery {
        ListQuery { sort: sort.map(Into::into), direction: direction.map(Into::into), ..Default::default() }
    }

    #[test]
    fn sort_spec_defaults() {
        assert_eq!(q(None, None).sort_spec().unwrap(), SortSpec::default());
        assert_eq!(q(Some("name"), None).sort_spec().unwrap(), SortSpec::ascending(SortKey::Name));
        assert_eq!(q(Some("status"), Some("desc")).sort_spec().unwrap(), SortSpec::descending(SortKey::Status));
        assert_eq!(q(None, Some("asc")).sort_spec().unwrap(), SortSpec::ascending(SortKey::CreatedAt));
    }

    #[test]
    fn bad_sort_params_are_bad_requests() {
        assert_eq!(q(Some("price"), None).sort_spec().unwrap_err().status, StatusCode::BAD_REQUEST);
        assert_eq!(q(Some("name"), Some("sideways")).sort_spec().unwrap_err().status, StatusCode::BAD_REQUEST);
    }
}
