//! Storage trait definitions for the API storage backends.

use crate::models::{Automation, Blueprint, Maintenance};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A page of automations with the full unfiltered count.
#[derive(Debug, Clone)]
pub struct AutomationPage {
    pub data: Vec<Automation>,
    pub total: u64,
}

/// Storage backend trait for database operations.
///
/// Backends persist maintenance rows with a nullable `automation_id` and
/// populate the automation relation on every read the contract requires.
/// `delete_automation` must nullify dependent maintenance references
/// atomically with the delete itself.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    // Automations

    async fn create_automation(&self, automation: Automation) -> Result<Automation, super::StorageError>;

    async fn get_automation(&self, id: Uuid) -> Result<Option<Automation>, super::StorageError>;

    /// All automations in storage order.
    async fn list_automations(&self) -> Result<Vec<Automation>, super::StorageError>;

    /// Rows ordered by created_at descending, skipping `(page-1)*limit` and
    /// taking `limit`. `total` is the full unfiltered count on every page.
    async fn list_automations_paginated(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<AutomationPage, super::StorageError>;

    async fn update_automation(&self, automation: Automation) -> Result<Automation, super::StorageError>;

    /// Delete and return the automation, setting `automation_id` to null on
    /// all dependent maintenance rows in the same atomic operation.
    async fn delete_automation(&self, id: Uuid) -> Result<Option<Automation>, super::StorageError>;

    // Maintenance

    async fn create_maintenance(&self, maintenance: Maintenance) -> Result<Maintenance, super::StorageError>;

    async fn get_maintenance(&self, id: Uuid) -> Result<Option<Maintenance>, super::StorageError>;

    /// All maintenance records, automation relation populated.
    async fn list_maintenances(&self) -> Result<Vec<Maintenance>, super::StorageError>;

    /// Maintenance for one automation, date ascending, skip/take paginated,
    /// relation populated.
    async fn list_maintenances_by_automation(
        &self,
        automation_id: Uuid,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Maintenance>, super::StorageError>;

    /// Maintenance with `date` inside `[start, end]` inclusive, relation
    /// populated.
    async fn list_maintenances_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Maintenance>, super::StorageError>;

    async fn update_maintenance(&self, maintenance: Maintenance) -> Result<Maintenance, super::StorageError>;

    async fn delete_maintenance(&self, id: Uuid) -> Result<Option<Maintenance>, super::StorageError>;

    // Blueprints

    async fn create_blueprint(&self, blueprint: Blueprint) -> Result<Blueprint, super::StorageError>;

    async fn get_blueprint(&self, id: Uuid) -> Result<Option<Blueprint>, super::StorageError>;

    /// All blueprints, unordered. Sorting by created_at to find the latest
    /// is a caller responsibility.
    async fn list_blueprints(&self) -> Result<Vec<Blueprint>, super::StorageError>;

    async fn update_blueprint(&self, blueprint: Blueprint) -> Result<Blueprint, super::StorageError>;

    async fn delete_blueprint(&self, id: Uuid) -> Result<Option<Blueprint>, super::StorageError>;
}
