//! Automation machine model.

use super::enums::AutomationStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A tracked physical machine or process in the factory.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Automation {
    /// Unique identifier, generated on creation
    pub automation_id: Uuid,
    /// Machine name, 1-50 characters
    pub name: String,
    /// Optional description, up to 100 characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lifecycle status
    pub status: AutomationStatus,
    /// Creation timestamp (server-set)
    pub created_at: DateTime<Utc>,
    /// Refreshed on every field mutation
    pub updated_at: DateTime<Utc>,
}

impl Automation {
    pub fn new(name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            automation_id: Uuid::new_v4(),
            name,
            description,
            status: AutomationStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request body for creating an automation
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAutomationRequest {
    /// Name of the automation machine (1-50 characters)
    pub name: String,
    /// Description of the automation machine (up to 100 characters)
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for partially updating an automation
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAutomationRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<AutomationStatus>,
}
