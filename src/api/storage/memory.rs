//! In-memory storage backend.
//!
//! Default backend when no DATABASE_URL is configured, and the reference
//! implementation of the storage contract that the unit tests exercise.
//! All tables live behind one lock so delete_automation can nullify
//! dependent maintenance rows atomically with the delete.

use super::{StorageError, traits::*};
use crate::models::{Automation, Blueprint, Maintenance, MaintenanceStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Stored maintenance row. The automation relation is kept as a nullable id
/// and joined on read, so automation renames propagate and deletes nullify.
#[derive(Debug, Clone)]
struct MaintenanceRow {
    maintenance_id: Uuid,
    automation_id: Option<Uuid>,
    issue_report: Option<String>,
    date: Option<DateTime<Utc>>,
    status: MaintenanceStatus,
}

impl MaintenanceRow {
    fn from_model(m: &Maintenance) -> Self {
        Self {
            maintenance_id: m.maintenance_id,
            automation_id: m.automation_id(),
            issue_report: m.issue_report.clone(),
            date: m.date,
            status: m.status,
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    automations: Vec<Automation>,
    maintenances: Vec<MaintenanceRow>,
    blueprints: Vec<Blueprint>,
}

impl Tables {
    fn automation_by_id(&self, id: Uuid) -> Option<&Automation> {
        self.automations.iter().find(|a| a.automation_id == id)
    }

    fn populate(&self, row: &MaintenanceRow) -> Maintenance {
        let automation = row
            .automation_id
            .and_then(|id| self.automation_by_id(id))
            .cloned();
        Maintenance {
            maintenance_id: row.maintenance_id,
            automation,
            issue_report: row.issue_report.clone(),
            date: row.date,
            status: row.status,
        }
    }
}

/// In-memory storage backend.
#[derive(Debug, Default)]
pub struct MemoryStorageBackend {
    tables: RwLock<Tables>,
}

impl MemoryStorageBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Date ascending with null dates last, matching the relational backend.
fn by_date_asc(a: &MaintenanceRow, b: &MaintenanceRow) -> Ordering {
    match (a.date, b.date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn skip_count(page: u32, limit: u32) -> usize {
    // page is 1-based; page 0 behaves like page 1
    (page.saturating_sub(1) as usize) * (limit as usize)
}

#[async_trait]
impl StorageBackend for MemoryStorageBackend {
    async fn create_automation(&self, automation: Automation) -> Result<Automation, StorageError> {
        let mut tables = self.tables.write().await;
        tables.automations.push(automation.clone());
        Ok(automation)
    }

    async fn get_automation(&self, id: Uuid) -> Result<Option<Automation>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables.automation_by_id(id).cloned())
    }

    async fn list_automations(&self) -> Result<Vec<Automation>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables.automations.clone())
    }

    async fn list_automations_paginated(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<AutomationPage, StorageError> {
        let tables = self.tables.read().await;
        let total = tables.automations.len() as u64;

        let mut ordered: Vec<Automation> = tables.automations.clone();
        ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let data = ordered
            .into_iter()
            .skip(skip_count(page, limit))
            .take(limit as usize)
            .collect();

        Ok(AutomationPage { data, total })
    }

    async fn update_automation(&self, automation: Automation) -> Result<Automation, StorageError> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .automations
            .iter_mut()
            .find(|a| a.automation_id == automation.automation_id)
            .ok_or_else(|| StorageError::not_found("automation", automation.automation_id))?;
        *slot = automation.clone();
        Ok(automation)
    }

    async fn delete_automation(&self, id: Uuid) -> Result<Option<Automation>, StorageError> {
        let mut tables = self.tables.write().await;
        let Some(pos) = tables.automations.iter().position(|a| a.automation_id == id) else {
            return Ok(None);
        };
        let removed = tables.automations.remove(pos);

        // Nullify-on-delete: same lock section as the delete itself.
        for row in tables
            .maintenances
            .iter_mut()
            .filter(|m| m.automation_id == Some(id))
        {
            row.automation_id = None;
        }

        Ok(Some(removed))
    }

    async fn create_maintenance(&self, maintenance: Maintenance) -> Result<Maintenance, StorageError> {
        let mut tables = self.tables.write().await;
        let row = MaintenanceRow::from_model(&maintenance);
        tables.maintenances.push(row.clone());
        Ok(tables.populate(&row))
    }

    async fn get_maintenance(&self, id: Uuid) -> Result<Option<Maintenance>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .maintenances
            .iter()
            .find(|m| m.maintenance_id == id)
            .map(|row| tables.populate(row)))
    }

    async fn list_maintenances(&self) -> Result<Vec<Maintenance>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .maintenances
            .iter()
            .map(|row| tables.populate(row))
            .collect())
    }

    async fn list_maintenances_by_automation(
        &self,
        automation_id: Uuid,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Maintenance>, StorageError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<MaintenanceRow> = tables
            .maintenances
            .iter()
            .filter(|m| m.automation_id == Some(automation_id))
            .cloned()
            .collect();
        rows.sort_by(by_date_asc);

        Ok(rows
            .into_iter()
            .skip(skip_count(page, limit))
            .take(limit as usize)
            .map(|row| tables.populate(&row))
            .collect())
    }

    async fn list_maintenances_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Maintenance>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .maintenances
            .iter()
            .filter(|m| m.date.is_some_and(|d| d >= start && d <= end))
            .map(|row| tables.populate(row))
            .collect())
    }

    async fn update_maintenance(&self, maintenance: Maintenance) -> Result<Maintenance, StorageError> {
        let mut tables = self.tables.write().await;
        let row = MaintenanceRow::from_model(&maintenance);
        let slot = tables
            .maintenances
            .iter_mut()
            .find(|m| m.maintenance_id == maintenance.maintenance_id)
            .ok_or_else(|| StorageError::not_found("maintenance", maintenance.maintenance_id))?;
        *slot = row.clone();
        Ok(tables.populate(&row))
    }

    async fn delete_maintenance(&self, id: Uuid) -> Result<Option<Maintenance>, StorageError> {
        let mut tables = self.tables.write().await;
        let Some(pos) = tables.maintenances.iter().position(|m| m.maintenance_id == id) else {
            return Ok(None);
        };
        let removed = tables.maintenances.remove(pos);
        Ok(Some(tables.populate(&removed)))
    }

    async fn create_blueprint(&self, blueprint: Blueprint) -> Result<Blueprint, StorageError> {
        let mut tables = self.tables.write().await;
        tables.blueprints.push(blueprint.clone());
        Ok(blueprint)
    }

    async fn get_blueprint(&self, id: Uuid) -> Result<Option<Blueprint>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .blueprints
            .iter()
            .find(|b| b.blueprint_id == id)
            .cloned())
    }

    async fn list_blueprints(&self) -> Result<Vec<Blueprint>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables.blueprints.clone())
    }

    async fn update_blueprint(&self, blueprint: Blueprint) -> Result<Blueprint, StorageError> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .blueprints
            .iter_mut()
            .find(|b| b.blueprint_id == blueprint.blueprint_id)
            .ok_or_else(|| StorageError::not_found("blueprint", blueprint.blueprint_id))?;
        *slot = blueprint.clone();
        Ok(blueprint)
    }

    async fn delete_blueprint(&self, id: Uuid) -> Result<Option<Blueprint>, StorageError> {
        let mut tables = self.tables.write().await;
        let Some(pos) = tables.blueprints.iter().position(|b| b.blueprint_id == id) else {
            return Ok(None);
        };
        Ok(Some(tables.blueprints.remove(pos)))
    }
}
