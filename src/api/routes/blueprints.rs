//! Blueprint store routes.
//!
//! Every route here requires a valid bearer token, reads included; the
//! stored diagrams describe the plant layout and are not public.

use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::{get, post},
};
use uuid::Uuid;

use super::app_state::AppState;
use super::auth_context::AuthContext;
use super::error::ApiError;
use crate::models::{Blueprint, CreateBlueprintRequest, UpdateBlueprintRequest};

/// Create the blueprints router
pub fn blueprints_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_blueprints))
        .route("/save", post(create_blueprint))
        .route(
            "/{id}",
            get(get_blueprint)
                .patch(update_blueprint)
                .delete(delete_blueprint),
        )
}

/// POST /blueprint/save - Persist a new layout diagram
#[utoipa::path(
    post,
    path = "/blueprint/save",
    request_body = CreateBlueprintRequest,
    responses(
        (status = 200, description = "Blueprint saved", body = Blueprint),
        (status = 400, description = "Blueprint name is empty"),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    security(("bearer_auth" = [])),
    tag = "Blueprints"
)]
pub async fn create_blueprint(
    State(state): State<AppState>,
    _auth: AuthContext,
    Json(request): Json<CreateBlueprintRequest>,
) -> Result<Json<Blueprint>, ApiError> {
    Ok(Json(state.blueprints().create(request).await?))
}

/// GET /blueprint - List all blueprints
#[utoipa::path(
    get,
    path = "/blueprint",
    responses(
        (status = 200, description = "List of blueprints", body = [Blueprint]),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    security(("bearer_auth" = [])),
    tag = "Blueprints"
)]
pub async fn get_blueprints(
    State(state): State<AppState>,
    _auth: AuthContext,
) -> Result<Json<Vec<Blueprint>>, ApiError> {
    Ok(Json(state.blueprints().find_all().await?))
}

/// GET /blueprint/{id} - Get a blueprint by ID
#[utoipa::path(
    get,
    path = "/blueprint/{id}",
    params(("id" = Uuid, Path, description = "Blueprint ID")),
    responses(
        (status = 200, description = "Blueprint details", body = Blueprint),
        (status = 404, description = "Blueprint not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Blueprints"
)]
pub async fn get_blueprint(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Blueprint>, ApiError> {
    Ok(Json(state.blueprints().find_one(id).await?))
}

/// PATCH /blueprint/{id} - Replace blueprint fields; nodes and edges are
/// replaced wholesale, never merged element-wise
#[utoipa::path(
    patch,
    path = "/blueprint/{id}",
    params(("id" = Uuid, Path, description = "Blueprint ID")),
    request_body = UpdateBlueprintRequest,
    responses(
        (status = 200, description = "Updated blueprint", body = Blueprint),
        (status = 404, description = "Blueprint not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Blueprints"
)]
pub async fn update_blueprint(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBlueprintRequest>,
) -> Result<Json<Blueprint>, ApiError> {
    Ok(Json(state.blueprints().update(id, request).await?))
}

/// DELETE /blueprint/{id} - Delete a blueprint
#[utoipa::path(
    delete,
    path = "/blueprint/{id}",
    params(("id" = Uuid, Path, description = "Blueprint ID")),
    responses(
        (status = 200, description = "Deleted blueprint", body = Blueprint),
        (status = 404, description = "Blueprint not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Blueprints"
)]
pub async fn delete_blueprint(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Blueprint>, ApiError> {
    Ok(Json(state.blueprints().remove(id).await?))
}
