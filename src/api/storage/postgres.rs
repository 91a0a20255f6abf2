//! PostgreSQL storage backend implementation.
//!
//! Uses sqlx for database operations and implements the StorageBackend
//! trait. Queries are built at runtime so the crate compiles without a
//! database; schema lives in ./migrations. The maintenance table declares
//! ON DELETE SET NULL, and delete_automation additionally nullifies inside
//! the same transaction so the invariant holds regardless of schema drift.

use super::{StorageError, traits::*};
use crate::models::{Automation, AutomationStatus, Blueprint, Maintenance, MaintenanceStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// PostgreSQL storage backend implementation.
pub struct PostgresStorageBackend {
    pool: PgPool,
}

impl PostgresStorageBackend {
    /// Create a new PostgreSQL storage backend.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> StorageError {
    StorageError::ConnectionError(e.to_string())
}

fn automation_status(s: &str) -> AutomationStatus {
    match s {
        "inactive" => AutomationStatus::Inactive,
        "pending" => AutomationStatus::Pending,
        _ => AutomationStatus::Active,
    }
}

fn automation_status_str(status: AutomationStatus) -> &'static str {
    match status {
        AutomationStatus::Active => "active",
        AutomationStatus::Inactive => "inactive",
        AutomationStatus::Pending => "pending",
    }
}

fn maintenance_status(s: &str) -> MaintenanceStatus {
    match s {
        "completed" => MaintenanceStatus::Completed,
        _ => MaintenanceStatus::Pending,
    }
}

fn maintenance_status_str(status: MaintenanceStatus) -> &'static str {
    match status {
        MaintenanceStatus::Pending => "pending",
        MaintenanceStatus::Completed => "completed",
    }
}

fn automation_from_row(row: &PgRow) -> Result<Automation, StorageError> {
    Ok(Automation {
        automation_id: row.try_get("automation_id").map_err(db_err)?,
        name: row.try_get("name").map_err(db_err)?,
        description: row.try_get("description").map_err(db_err)?,
        status: automation_status(row.try_get::<String, _>("status").map_err(db_err)?.as_str()),
        created_at: row.try_get("created_at").map_err(db_err)?,
        updated_at: row.try_get("updated_at").map_err(db_err)?,
    })
}

/// Maps one row of the maintenance LEFT JOIN automation projection.
fn maintenance_from_row(row: &PgRow) -> Result<Maintenance, StorageError> {
    let automation = match row.try_get::<Option<Uuid>, _>("a_automation_id").map_err(db_err)? {
        Some(id) => Some(Automation {
            automation_id: id,
            name: row.try_get("a_name").map_err(db_err)?,
            description: row.try_get("a_description").map_err(db_err)?,
            status: automation_status(row.try_get::<String, _>("a_status").map_err(db_err)?.as_str()),
            created_at: row.try_get("a_created_at").map_err(db_err)?,
            updated_at: row.try_get("a_updated_at").map_err(db_err)?,
        }),
        None => None,
    };

    Ok(Maintenance {
        maintenance_id: row.try_get("maintenance_id").map_err(db_err)?,
        automation,
        issue_report: row.try_get("issue_report").map_err(db_err)?,
        date: row.try_get("date").map_err(db_err)?,
        status: maintenance_status(row.try_get::<String, _>("status").map_err(db_err)?.as_str()),
    })
}

fn blueprint_from_row(row: &PgRow) -> Result<Blueprint, StorageError> {
    let nodes: serde_json::Value = row.try_get("nodes").map_err(db_err)?;
    let edges: serde_json::Value = row.try_get("edges").map_err(db_err)?;
    Ok(Blueprint {
        blueprint_id: row.try_get("blueprint_id").map_err(db_err)?,
        name: row.try_get("name").map_err(db_err)?,
        nodes: serde_json::from_value(nodes)
            .map_err(|e| StorageError::Other(format!("Failed to deserialize nodes: {}", e)))?,
        edges: serde_json::from_value(edges)
            .map_err(|e| StorageError::Other(format!("Failed to deserialize edges: {}", e)))?,
        created_at: row.try_get("created_at").map_err(db_err)?,
    })
}

const MAINTENANCE_SELECT: &str = r#"
    SELECT m.maintenance_id, m.issue_report, m.date, m.status,
           a.automation_id AS a_automation_id, a.name AS a_name,
           a.description AS a_description, a.status AS a_status,
           a.created_at AS a_created_at, a.updated_at AS a_updated_at
    FROM maintenance m
    LEFT JOIN automation a ON a.automation_id = m.automation_id
"#;

#[async_trait]
impl StorageBackend for PostgresStorageBackend {
    async fn create_automation(&self, automation: Automation) -> Result<Automation, StorageError> {
        sqlx::query(
            r#"
            INSERT INTO automation (automation_id, name, description, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(automation.automation_id)
        .bind(&automation.name)
        .bind(&automation.description)
        .bind(automation_status_str(automation.status))
        .bind(automation.created_at)
        .bind(automation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(automation)
    }

    async fn get_automation(&self, id: Uuid) -> Result<Option<Automation>, StorageError> {
        let row = sqlx::query("SELECT * FROM automation WHERE automation_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.map(|r| automation_from_row(&r)).transpose()
    }

    async fn list_automations(&self) -> Result<Vec<Automation>, StorageError> {
        let rows = sqlx::query("SELECT * FROM automation")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(automation_from_row).collect()
    }

    async fn list_automations_paginated(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<AutomationPage, StorageError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM automation")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        let skip = (page.saturating_sub(1) as i64) * (limit as i64);
        let rows = sqlx::query(
            "SELECT * FROM automation ORDER BY created_at DESC OFFSET $1 LIMIT $2",
        )
        .bind(skip)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(AutomationPage {
            data: rows.iter().map(automation_from_row).collect::<Result<_, _>>()?,
            total: total as u64,
        })
    }

    async fn update_automation(&self, automation: Automation) -> Result<Automation, StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE automation
            SET name = $2, description = $3, status = $4, updated_at = $5
            WHERE automation_id = $1
            "#,
        )
        .bind(automation.automation_id)
        .bind(&automation.name)
        .bind(&automation.description)
        .bind(automation_status_str(automation.status))
        .bind(automation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("automation", automation.automation_id));
        }
        Ok(automation)
    }

    async fn delete_automation(&self, id: Uuid) -> Result<Option<Automation>, StorageError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let row = sqlx::query("SELECT * FROM automation WHERE automation_id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?;
        let Some(row) = row else {
            return Ok(None);
        };
        let automation = automation_from_row(&row)?;

        sqlx::query("UPDATE maintenance SET automation_id = NULL WHERE automation_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        sqlx::query("DELETE FROM automation WHERE automation_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(Some(automation))
    }

    async fn create_maintenance(&self, maintenance: Maintenance) -> Result<Maintenance, StorageError> {
        sqlx::query(
            r#"
            INSERT INTO maintenance (maintenance_id, automation_id, issue_report, date, status)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(maintenance.maintenance_id)
        .bind(maintenance.automation_id())
        .bind(&maintenance.issue_report)
        .bind(maintenance.date)
        .bind(maintenance_status_str(maintenance.status))
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(maintenance)
    }

    async fn get_maintenance(&self, id: Uuid) -> Result<Option<Maintenance>, StorageError> {
        let sql = format!("{} WHERE m.maintenance_id = $1", MAINTENANCE_SELECT);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.map(|r| maintenance_from_row(&r)).transpose()
    }

    async fn list_maintenances(&self) -> Result<Vec<Maintenance>, StorageError> {
        let rows = sqlx::query(MAINTENANCE_SELECT)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(maintenance_from_row).collect()
    }

    async fn list_maintenances_by_automation(
        &self,
        automation_id: Uuid,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Maintenance>, StorageError> {
        let skip = (page.saturating_sub(1) as i64) * (limit as i64);
        let sql = format!(
            "{} WHERE m.automation_id = $1 ORDER BY m.date ASC OFFSET $2 LIMIT $3",
            MAINTENANCE_SELECT
        );
        let rows = sqlx::query(&sql)
            .bind(automation_id)
            .bind(skip)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(maintenance_from_row).collect()
    }

    async fn list_maintenances_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Maintenance>, StorageError> {
        let sql = format!("{} WHERE m.date BETWEEN $1 AND $2", MAINTENANCE_SELECT);
        let rows = sqlx::query(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(maintenance_from_row).collect()
    }

    async fn update_maintenance(&self, maintenance: Maintenance) -> Result<Maintenance, StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE maintenance
            SET automation_id = $2, issue_report = $3, date = $4, status = $5
            WHERE maintenance_id = $1
            "#,
        )
        .bind(maintenance.maintenance_id)
        .bind(maintenance.automation_id())
        .bind(&maintenance.issue_report)
        .bind(maintenance.date)
        .bind(maintenance_status_str(maintenance.status))
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("maintenance", maintenance.maintenance_id));
        }
        Ok(maintenance)
    }

    async fn delete_maintenance(&self, id: Uuid) -> Result<Option<Maintenance>, StorageError> {
        let existing = self.get_maintenance(id).await?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM maintenance WHERE maintenance_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(Some(existing))
    }

    async fn create_blueprint(&self, blueprint: Blueprint) -> Result<Blueprint, StorageError> {
        sqlx::query(
            r#"
            INSERT INTO blueprint (blueprint_id, name, nodes, edges, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(blueprint.blueprint_id)
        .bind(&blueprint.name)
        .bind(serde_json::Value::Array(blueprint.nodes.clone()))
        .bind(serde_json::Value::Array(blueprint.edges.clone()))
        .bind(blueprint.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(blueprint)
    }

    async fn get_blueprint(&self, id: Uuid) -> Result<Option<Blueprint>, StorageError> {
        let row = sqlx::query("SELECT * FROM blueprint WHERE blueprint_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.map(|r| blueprint_from_row(&r)).transpose()
    }

    async fn list_blueprints(&self) -> Result<Vec<Blueprint>, StorageError> {
        let rows = sqlx::query("SELECT * FROM blueprint")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(blueprint_from_row).collect()
    }

    async fn update_blueprint(&self, blueprint: Blueprint) -> Result<Blueprint, StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE blueprint
            SET name = $2, nodes = $3, edges = $4
            WHERE blueprint_id = $1
            "#,
        )
        .bind(blueprint.blueprint_id)
        .bind(&blueprint.name)
        .bind(serde_json::Value::Array(blueprint.nodes.clone()))
        .bind(serde_json::Value::Array(blueprint.edges.clone()))
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("blueprint", blueprint.blueprint_id));
        }
        Ok(blueprint)
    }

    async fn delete_blueprint(&self, id: Uuid) -> Result<Option<Blueprint>, StorageError> {
        let existing = self.get_blueprint(id).await?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM blueprint WHERE blueprint_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(Some(existing))
    }
}
