//! OpenAPI specification definition.
//!
//! Aggregates all route handlers and schemas for OpenAPI documentation generation.

use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Automations
        crate::routes::automations::create_automation,
        crate::routes::automations::get_automations,
        crate::routes::automations::get_all_automations,
        crate::routes::automations::get_automation,
        crate::routes::automations::update_automation,
        crate::routes::automations::delete_automation,
        // Maintenances
        crate::routes::maintenances::create_maintenance,
        crate::routes::maintenances::get_maintenances,
        crate::routes::maintenances::get_maintenances_by_date_range,
        crate::routes::maintenances::get_maintenances_by_automation,
        crate::routes::maintenances::get_maintenance,
        crate::routes::maintenances::update_maintenance,
        crate::routes::maintenances::delete_maintenance,
        // Blueprints
        crate::routes::blueprints::create_blueprint,
        crate::routes::blueprints::get_blueprints,
        crate::routes::blueprints::get_blueprint,
        crate::routes::blueprints::update_blueprint,
        crate::routes::blueprints::delete_blueprint,
        // Reports
        crate::routes::reports::get_dashboard,
        crate::routes::reports::get_automation_report,
        // OpenAPI
        crate::routes::openapi::serve_openapi_json,
    ),
    components(schemas(
        crate::models::Automation,
        crate::models::CreateAutomationRequest,
        crate::models::UpdateAutomationRequest,
        crate::models::AutomationStatus,
        crate::models::Maintenance,
        crate::models::CreateMaintenanceRequest,
        crate::models::UpdateMaintenanceRequest,
        crate::models::MaintenanceStatus,
        crate::models::Blueprint,
        crate::models::CreateBlueprintRequest,
        crate::models::UpdateBlueprintRequest,
        crate::models::Role,
        crate::routes::automations::PaginatedAutomations,
        crate::routes::reports::DashboardReport,
        crate::routes::reports::AutomationReport,
        crate::services::report_service::MonthlyBucket,
        crate::services::report_service::DistributionBucket,
        crate::services::report_service::Distribution,
        crate::services::report_service::DashboardSnapshot,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Automations", description = "Automation registry CRUD operations"),
        (name = "Maintenances", description = "Maintenance ledger operations and queries"),
        (name = "Blueprints", description = "Plant layout diagram storage"),
        (name = "Reports", description = "Dashboard aggregation views"),
        (name = "OpenAPI", description = "OpenAPI specification"),
    ),
    info(
        title = "Automation Tracker API",
        description = "REST API for tracking factory automations, their maintenance history and plant blueprints",
        version = "1.0.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8081/api/v1", description = "Local development server")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        // Keep the advertised version in lockstep with Cargo.toml
        openapi.info.version = env!("CARGO_PKG_VERSION").to_string();

        if openapi.components.is_none() {
            openapi.components = Some(utoipa::openapi::Components::new());
        }

        if let Some(components) = openapi.components.as_mut() {
            use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
