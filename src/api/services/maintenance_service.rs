//! Maintenance ledger service.
//!
//! Owns maintenance records and their weak reference to an automation.
//! Creation resolves the automation through the registry; listing supports
//! per-automation pagination and inclusive date-range queries.

use super::AutomationService;
use crate::models::{CreateMaintenanceRequest, Maintenance, UpdateMaintenanceRequest};
use crate::storage::{StorageBackend, StorageError};
use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

const ISSUE_REPORT_MAX: usize = 100;

/// Business logic for the maintenance ledger.
#[derive(Clone)]
pub struct MaintenanceService {
    storage: Arc<dyn StorageBackend>,
    automations: AutomationService,
    /// Legacy behavior: report NotFound when a valid automation's requested
    /// page has zero rows. Off by default; the default returns an empty list.
    empty_page_is_not_found: bool,
}

impl MaintenanceService {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        let automations = AutomationService::new(storage.clone());
        Self {
            storage,
            automations,
            empty_page_is_not_found: false,
        }
    }

    /// Enable the legacy empty-page-as-missing behavior.
    pub fn with_empty_page_not_found(mut self, enabled: bool) -> Self {
        self.empty_page_is_not_found = enabled;
        self
    }

    fn validate_issue_report(issue_report: &str) -> Result<(), StorageError> {
        if issue_report.chars().count() > ISSUE_REPORT_MAX {
            return Err(StorageError::validation(
                "issue_report",
                format!("issue_report must be at most {} characters", ISSUE_REPORT_MAX),
            ));
        }
        Ok(())
    }

    /// Create a maintenance record with status `pending` and the resolved
    /// automation attached. A nonexistent automation id fails with a
    /// Referential error.
    pub async fn create(&self, request: CreateMaintenanceRequest) -> Result<Maintenance, StorageError> {
        info!(
            "Creating maintenance record for automation ID: {}",
            request.automation_id
        );
        if let Some(issue_report) = &request.issue_report {
            Self::validate_issue_report(issue_report)?;
        }

        let automation = match self.automations.find_one(request.automation_id).await {
            Ok(automation) => automation,
            Err(StorageError::NotFound { entity_id, .. }) => {
                warn!("Automation {} does not exist, rejecting maintenance create", entity_id);
                return Err(StorageError::Referential {
                    entity_type: "automation".to_string(),
                    entity_id,
                });
            }
            Err(e) => return Err(e),
        };
        debug!("Found automation: {}", automation.automation_id);

        let maintenance = Maintenance::new(automation, request.issue_report, request.date);
        let created = self.storage.create_maintenance(maintenance).await?;
        info!("Maintenance record created with ID: {}", created.maintenance_id);
        Ok(created)
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Maintenance, StorageError> {
        debug!("Finding maintenance record with ID: {}", id);
        self.storage
            .get_maintenance(id)
            .await?
            .ok_or_else(|| {
                warn!("Maintenance record with ID {} not found", id);
                StorageError::not_found("maintenance", id)
            })
    }

    /// All maintenance records with the automation relation populated.
    pub async fn find_all(&self) -> Result<Vec<Maintenance>, StorageError> {
        let records = self.storage.list_maintenances().await?;
        debug!("Found {} maintenance records", records.len());
        Ok(records)
    }

    /// Maintenance for one automation, date ascending, skip/take paginated.
    ///
    /// Fails NotFound when the automation itself does not exist. With the
    /// legacy flag enabled an empty page also reports NotFound, which
    /// conflates a missing automation with a legitimately empty page.
    pub async fn find_all_by_automation_id(
        &self,
        automation_id: Uuid,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Maintenance>, StorageError> {
        debug!(
            "Finding maintenance records for automation ID: {} (page: {}, limit: {})",
            automation_id, page, limit
        );
        let automation = self.automations.find_one(automation_id).await?;

        let records = self
            .storage
            .list_maintenances_by_automation(automation.automation_id, page, limit)
            .await?;

        if records.is_empty() && self.empty_page_is_not_found {
            warn!("No maintenance records found for automation ID {}", automation_id);
            return Err(StorageError::not_found("maintenance", automation_id));
        }

        Ok(records)
    }

    /// All maintenance with `date` inside `[start, end]`, end normalized to
    /// 23:59:59.999 of that day. Returns an empty list on no match.
    pub async fn find_by_date_range(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Maintenance>, StorageError> {
        info!("Finding maintenance records between {} and {}", start_date, end_date);
        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        let start = parse_date(start_date, "startDate")?
            .and_time(NaiveTime::MIN)
            .and_utc();
        let end = parse_date(end_date, "endDate")?.and_time(end_of_day).and_utc();

        debug!("Searching with date range: {} to {}", start, end);
        self.storage.list_maintenances_by_date_range(start, end).await
    }

    /// Merge the supplied fields onto the existing record and persist.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateMaintenanceRequest,
    ) -> Result<Maintenance, StorageError> {
        info!("Updating maintenance record with ID: {}", id);
        let mut maintenance = self.find_one(id).await?;

        if let Some(issue_report) = request.issue_report {
            Self::validate_issue_report(&issue_report)?;
            maintenance.issue_report = Some(issue_report);
        }
        if let Some(date) = request.date {
            maintenance.date = Some(date);
        }
        if let Some(status) = request.status {
            maintenance.status = status;
        }

        let updated = self.storage.update_maintenance(maintenance).await?;
        info!("Maintenance record {} updated successfully", id);
        Ok(updated)
    }

    /// Delete and return the deleted record.
    pub async fn remove(&self, id: Uuid) -> Result<Maintenance, StorageError> {
        info!("Removing maintenance record with ID: {}", id);
        let removed = self
            .storage
            .delete_maintenance(id)
            .await?
            .ok_or_else(|| StorageError::not_found("maintenance", id))?;
        info!("Maintenance record {} removed successfully", id);
        Ok(removed)
    }
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, StorageError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        StorageError::validation(field, format!("'{}' is not a valid YYYY-MM-DD date", value))
    })
}
