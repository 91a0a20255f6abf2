//! Maintenance record model.

use super::Automation;
use super::enums::MaintenanceStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A logged service event, optionally linked to one automation.
///
/// The automation reference is weak: deleting the referenced automation sets
/// it to null on the stored row instead of deleting the record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Maintenance {
    /// Unique identifier, generated on creation
    pub maintenance_id: Uuid,
    /// Linked automation, populated on read paths that require it
    pub automation: Option<Automation>,
    /// Free-text issue report, up to 100 characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_report: Option<String>,
    /// When the maintenance took place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Lifecycle status
    pub status: MaintenanceStatus,
}

impl Maintenance {
    pub fn new(
        automation: Automation,
        issue_report: Option<String>,
        date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            maintenance_id: Uuid::new_v4(),
            automation: Some(automation),
            issue_report,
            date,
            status: MaintenanceStatus::default(),
        }
    }

    /// Id of the linked automation, if the link is still intact.
    pub fn automation_id(&self) -> Option<Uuid> {
        self.automation.as_ref().map(|a| a.automation_id)
    }
}

/// Request body for creating a maintenance record
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMaintenanceRequest {
    /// UUID of the automation being serviced
    pub automation_id: Uuid,
    /// Issue report (up to 100 characters)
    #[serde(default)]
    pub issue_report: Option<String>,
    /// Date of maintenance
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Request body for partially updating a maintenance record
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateMaintenanceRequest {
    pub issue_report: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub status: Option<MaintenanceStatus>,
}
