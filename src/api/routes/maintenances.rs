//! Maintenance ledger routes.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json,
    routing::get,
};
use serde::Deserialize;
use uuid::Uuid;

use super::app_state::AppState;
use super::auth_context::AuthContext;
use super::error::ApiError;
use crate::models::{CreateMaintenanceRequest, Maintenance, Role, UpdateMaintenanceRequest};

/// Roles allowed to mutate maintenance records.
const WRITE_ROLES: [Role; 2] = [Role::Engineer, Role::Admin];

/// Query parameters for GET /maintenances/date-range
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
}

/// Query parameters for the per-automation listing
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Create the maintenances router
pub fn maintenances_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_maintenances).post(create_maintenance))
        .route("/date-range", get(get_maintenances_by_date_range))
        .route(
            "/get-all-by-automation-id/{automation_id}",
            get(get_maintenances_by_automation),
        )
        .route(
            "/{id}",
            get(get_maintenance)
                .patch(update_maintenance)
                .delete(delete_maintenance),
        )
}

/// POST /maintenances - Record a maintenance event against an automation
#[utoipa::path(
    post,
    path = "/maintenances",
    request_body = CreateMaintenanceRequest,
    responses(
        (status = 200, description = "Maintenance record created", body = Maintenance),
        (status = 400, description = "Issue report out of range"),
        (status = 422, description = "Referenced automation does not exist"),
    ),
    security(("bearer_auth" = [])),
    tag = "Maintenances"
)]
pub async fn create_maintenance(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<CreateMaintenanceRequest>,
) -> Result<Json<Maintenance>, ApiError> {
    auth.require_role(&WRITE_ROLES)?;
    Ok(Json(state.maintenances().create(request).await?))
}

/// GET /maintenances - List all maintenance records
#[utoipa::path(
    get,
    path = "/maintenances",
    responses(
        (status = 200, description = "List of maintenance records", body = [Maintenance]),
    ),
    tag = "Maintenances"
)]
pub async fn get_maintenances(
    State(state): State<AppState>,
) -> Result<Json<Vec<Maintenance>>, ApiError> {
    Ok(Json(state.maintenances().find_all().await?))
}

/// GET /maintenances/date-range - Records dated within an inclusive range
#[utoipa::path(
    get,
    path = "/maintenances/date-range",
    params(
        ("startDate" = String, Query, description = "Range start, YYYY-MM-DD"),
        ("endDate" = String, Query, description = "Range end, YYYY-MM-DD, inclusive"),
    ),
    responses(
        (status = 200, description = "Records inside the range", body = [Maintenance]),
        (status = 400, description = "Malformed date"),
    ),
    tag = "Maintenances"
)]
pub async fn get_maintenances_by_date_range(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<Maintenance>>, ApiError> {
    let records = state
        .maintenances()
        .find_by_date_range(&query.start_date, &query.end_date)
        .await?;
    Ok(Json(records))
}

/// GET /maintenances/get-all-by-automation-id/{automation_id} - Page of one
/// automation's history, oldest first
#[utoipa::path(
    get,
    path = "/maintenances/get-all-by-automation-id/{automation_id}",
    params(
        ("automation_id" = Uuid, Path, description = "Automation ID"),
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("limit" = Option<u32>, Query, description = "Rows per page"),
    ),
    responses(
        (status = 200, description = "Maintenance records for the automation", body = [Maintenance]),
        (status = 404, description = "Automation not found"),
    ),
    tag = "Maintenances"
)]
pub async fn get_maintenances_by_automation(
    State(state): State<AppState>,
    Path(automation_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<Maintenance>>, ApiError> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);
    let records = state
        .maintenances()
        .find_all_by_automation_id(automation_id, page, limit)
        .await?;
    Ok(Json(records))
}

/// GET /maintenances/{id} - Get a maintenance record by ID
#[utoipa::path(
    get,
    path = "/maintenances/{id}",
    params(("id" = Uuid, Path, description = "Maintenance record ID")),
    responses(
        (status = 200, description = "Maintenance record details", body = Maintenance),
        (status = 404, description = "Maintenance record not found"),
    ),
    tag = "Maintenances"
)]
pub async fn get_maintenance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Maintenance>, ApiError> {
    Ok(Json(state.maintenances().find_one(id).await?))
}

/// PATCH /maintenances/{id} - Partially update a maintenance record
#[utoipa::path(
    patch,
    path = "/maintenances/{id}",
    params(("id" = Uuid, Path, description = "Maintenance record ID")),
    request_body = UpdateMaintenanceRequest,
    responses(
        (status = 200, description = "Updated maintenance record", body = Maintenance),
        (status = 404, description = "Maintenance record not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Maintenances"
)]
pub async fn update_maintenance(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMaintenanceRequest>,
) -> Result<Json<Maintenance>, ApiError> {
    auth.require_role(&WRITE_ROLES)?;
    Ok(Json(state.maintenances().update(id, request).await?))
}

/// DELETE /maintenances/{id} - Delete a maintenance record
#[utoipa::path(
    delete,
    path = "/maintenances/{id}",
    params(("id" = Uuid, Path, description = "Maintenance record ID")),
    responses(
        (status = 200, description = "Deleted maintenance record", body = Maintenance),
        (status = 404, description = "Maintenance record not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Maintenances"
)]
pub async fn delete_maintenance(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Maintenance>, ApiError> {
    auth.require_role(&WRITE_ROLES)?;
    Ok(Json(state.maintenances().remove(id).await?))
}
