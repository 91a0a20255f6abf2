use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle status of an automation machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AutomationStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

/// Lifecycle status of a maintenance record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceStatus {
    #[default]
    Pending,
    Completed,
}

/// Caller role claim issued by the external identity provider.
///
/// Planner and admin may mutate automations, engineer and admin may mutate
/// maintenance records. Services trust that the route layer already enforced
/// this gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Planner,
    Engineer,
    Admin,
}
