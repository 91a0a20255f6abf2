//! Automation registry service.
//!
//! Owns automation machine records: identity, lifecycle status and the
//! validation rules on name/description length.

use crate::models::{Automation, CreateAutomationRequest, UpdateAutomationRequest};
use crate::storage::{AutomationPage, StorageBackend, StorageError};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

const NAME_MAX: usize = 50;
const DESCRIPTION_MAX: usize = 100;

/// Business logic for the automation registry.
#[derive(Clone)]
pub struct AutomationService {
    storage: Arc<dyn StorageBackend>,
}

impl AutomationService {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    fn validate_name(name: &str) -> Result<(), StorageError> {
        if name.is_empty() {
            return Err(StorageError::validation("name", "name must not be empty"));
        }
        if name.chars().count() > NAME_MAX {
            return Err(StorageError::validation(
                "name",
                format!("name must be at most {} characters", NAME_MAX),
            ));
        }
        Ok(())
    }

    fn validate_description(description: &str) -> Result<(), StorageError> {
        if description.chars().count() > DESCRIPTION_MAX {
            return Err(StorageError::validation(
                "description",
                format!("description must be at most {} characters", DESCRIPTION_MAX),
            ));
        }
        Ok(())
    }

    /// Create a new automation with status `active` and both timestamps set
    /// to the creation instant.
    pub async fn create(&self, request: CreateAutomationRequest) -> Result<Automation, StorageError> {
        info!("Creating new automation with name: {}", request.name);
        Self::validate_name(&request.name)?;
        if let Some(description) = &request.description {
            Self::validate_description(description)?;
        }

        let automation = Automation::new(request.name, request.description);
        let created = self.storage.create_automation(automation).await?;
        info!("Automation created with ID: {}", created.automation_id);
        Ok(created)
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Automation, StorageError> {
        debug!("Finding automation with ID: {}", id);
        self.storage
            .get_automation(id)
            .await?
            .ok_or_else(|| {
                warn!("Automation with ID {} not found", id);
                StorageError::not_found("automation", id)
            })
    }

    pub async fn find_all(&self) -> Result<Vec<Automation>, StorageError> {
        let automations = self.storage.list_automations().await?;
        debug!("Found {} automations", automations.len());
        Ok(automations)
    }

    /// Page of automations ordered by created_at descending, plus the full
    /// unfiltered count. Pages beyond range yield empty data with the
    /// correct total.
    pub async fn find_all_paginated(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<AutomationPage, StorageError> {
        debug!("Finding paginated automations (page: {}, limit: {})", page, limit);
        self.storage.list_automations_paginated(page, limit).await
    }

    /// Merge the supplied fields onto the existing record and refresh
    /// updated_at. Unsupplied fields retain their prior value.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateAutomationRequest,
    ) -> Result<Automation, StorageError> {
        info!("Updating automation with ID: {}", id);
        let mut automation = self.find_one(id).await?;

        if let Some(name) = request.name {
            Self::validate_name(&name)?;
            automation.name = name;
        }
        if let Some(description) = request.description {
            Self::validate_description(&description)?;
            automation.description = Some(description);
        }
        if let Some(status) = request.status {
            automation.status = status;
        }
        automation.updated_at = Utc::now();

        let updated = self.storage.update_automation(automation).await?;
        info!("Automation {} updated successfully", id);
        Ok(updated)
    }

    /// Delete the automation and return the deleted record. Dependent
    /// maintenance rows get their automation reference nullified by the
    /// storage layer, atomically with the delete.
    pub async fn remove(&self, id: Uuid) -> Result<Automation, StorageError> {
        info!("Removing automation with ID: {}", id);
        let removed = self
            .storage
            .delete_automation(id)
            .await?
            .ok_or_else(|| StorageError::not_found("automation", id))?;
        info!("Automation {} removed successfully", id);
        Ok(removed)
    }
}
