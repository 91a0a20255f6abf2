//! Reporting routes.
//!
//! Read-only views composed from the maintenance ledger by the pure
//! aggregation functions in the report service.

use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::get,
};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::app_state::AppState;
use super::error::ApiError;
use crate::models::{Automation, Maintenance};
use crate::services::report_service::{
    self, DashboardSnapshot, Distribution, MonthlyBucket,
};

/// Full dashboard payload: card metrics, six-month histogram with trend,
/// and the distribution pie.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardReport {
    pub snapshot: DashboardSnapshot,
    pub efficiency_label: String,
    pub most_maintained_label: String,
    pub histogram: Vec<MonthlyBucket>,
    /// Month-over-month change of the last two histogram buckets, percent
    pub trend: f64,
    pub distribution: Distribution,
}

/// One automation with its full maintenance history, oldest first.
#[derive(Debug, Serialize, ToSchema)]
pub struct AutomationReport {
    pub automation: Automation,
    pub maintenances: Vec<Maintenance>,
}

/// Create the reports router
pub fn reports_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/automation/{id}", get(get_automation_report))
}

/// GET /reports/dashboard - Aggregated maintenance dashboard
#[utoipa::path(
    get,
    path = "/reports/dashboard",
    responses(
        (status = 200, description = "Dashboard aggregates", body = DashboardReport),
    ),
    tag = "Reports"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardReport>, ApiError> {
    let records = state.maintenances().find_all().await?;
    let now = Utc::now();

    let histogram = report_service::monthly_histogram(&records, now.date_naive());
    let trend = report_service::trend_percentage(&histogram);
    let distribution = report_service::distribution_by_automation(&records);
    let snapshot = report_service::thirty_day_snapshot(&records, now);

    let report = DashboardReport {
        efficiency_label: snapshot.efficiency_label(),
        most_maintained_label: snapshot.most_maintained_label(),
        snapshot,
        histogram,
        trend,
        distribution,
    };
    Ok(Json(report))
}

/// GET /reports/automation/{id} - One automation's full service history
#[utoipa::path(
    get,
    path = "/reports/automation/{id}",
    params(("id" = Uuid, Path, description = "Automation ID")),
    responses(
        (status = 200, description = "Automation service history", body = AutomationReport),
        (status = 404, description = "Automation not found"),
    ),
    tag = "Reports"
)]
pub async fn get_automation_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AutomationReport>, ApiError> {
    let automation = state.automations().find_one(id).await?;
    let maintenances = state
        .maintenances()
        .find_all_by_automation_id(id, 1, u32::MAX)
        .await?;
    Ok(Json(AutomationReport {
        automation,
        maintenances,
    }))
}
