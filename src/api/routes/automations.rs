//! Automation registry routes.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use super::app_state::AppState;
use super::auth_context::AuthContext;
use super::error::ApiError;
use crate::models::{Automation, CreateAutomationRequest, Role, UpdateAutomationRequest};

/// Roles allowed to mutate automations.
const WRITE_ROLES: [Role; 2] = [Role::Planner, Role::Admin];

/// Query parameters for GET /automations
#[derive(Debug, Deserialize)]
pub struct ListAutomationsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// One page of automations with the full unfiltered count
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedAutomations {
    pub data: Vec<Automation>,
    pub total: u64,
}

/// Create the automations router
pub fn automations_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_automations).post(create_automation))
        .route("/all", get(get_all_automations))
        .route(
            "/{id}",
            get(get_automation)
                .patch(update_automation)
                .delete(delete_automation),
        )
}

/// POST /automations - Register a new automation
#[utoipa::path(
    post,
    path = "/automations",
    request_body = CreateAutomationRequest,
    responses(
        (status = 200, description = "Automation created successfully", body = Automation),
        (status = 400, description = "Name or description out of range"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Caller role may not mutate automations"),
    ),
    security(("bearer_auth" = [])),
    tag = "Automations"
)]
pub async fn create_automation(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<CreateAutomationRequest>,
) -> Result<Json<Automation>, ApiError> {
    auth.require_role(&WRITE_ROLES)?;
    let automation = state.automations().create(request).await?;
    Ok(Json(automation))
}

/// GET /automations - List automations; with page/limit returns a page plus
/// total, otherwise the unpaginated list
#[utoipa::path(
    get,
    path = "/automations",
    params(
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("limit" = Option<u32>, Query, description = "Rows per page"),
    ),
    responses(
        (status = 200, description = "List of automations"),
    ),
    tag = "Automations"
)]
pub async fn get_automations(
    State(state): State<AppState>,
    Query(query): Query<ListAutomationsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if query.page.is_some() || query.limit.is_some() {
        let page = query.page.unwrap_or(1);
        let limit = query.limit.unwrap_or(10);
        info!("Listing automations paginated (page: {}, limit: {})", page, limit);
        let result = state.automations().find_all_paginated(page, limit).await?;
        let body = PaginatedAutomations {
            data: result.data,
            total: result.total,
        };
        return Ok(Json(serde_json::to_value(body).unwrap_or_default()));
    }

    let automations = state.automations().find_all().await?;
    Ok(Json(serde_json::to_value(automations).unwrap_or_default()))
}

/// GET /automations/all - Unpaginated list
#[utoipa::path(
    get,
    path = "/automations/all",
    responses(
        (status = 200, description = "List of all automations", body = [Automation]),
    ),
    tag = "Automations"
)]
pub async fn get_all_automations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Automation>>, ApiError> {
    Ok(Json(state.automations().find_all().await?))
}

/// GET /automations/{id} - Get an automation by ID
#[utoipa::path(
    get,
    path = "/automations/{id}",
    params(("id" = Uuid, Path, description = "Automation ID")),
    responses(
        (status = 200, description = "Automation details", body = Automation),
        (status = 404, description = "Automation not found"),
    ),
    tag = "Automations"
)]
pub async fn get_automation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Automation>, ApiError> {
    Ok(Json(state.automations().find_one(id).await?))
}

/// PATCH /automations/{id} - Partially update an automation
#[utoipa::path(
    patch,
    path = "/automations/{id}",
    params(("id" = Uuid, Path, description = "Automation ID")),
    request_body = UpdateAutomationRequest,
    responses(
        (status = 200, description = "Updated automation", body = Automation),
        (status = 404, description = "Automation not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Automations"
)]
pub async fn update_automation(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAutomationRequest>,
) -> Result<Json<Automation>, ApiError> {
    auth.require_role(&WRITE_ROLES)?;
    Ok(Json(state.automations().update(id, request).await?))
}

/// DELETE /automations/{id} - Delete an automation, nullifying the
/// automation reference on its maintenance records
#[utoipa::path(
    delete,
    path = "/automations/{id}",
    params(("id" = Uuid, Path, description = "Automation ID")),
    responses(
        (status = 200, description = "Deleted automation", body = Automation),
        (status = 404, description = "Automation not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Automations"
)]
pub async fn delete_automation(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Automation>, ApiError> {
    auth.require_role(&WRITE_ROLES)?;
    Ok(Json(state.automations().remove(id).await?))
}
