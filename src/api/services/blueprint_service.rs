//! Blueprint store service.
//!
//! Stores named node/edge graph snapshots wholesale. Node and edge payloads
//! stay opaque; updates replace whole collections, created_at never changes.

use crate::models::{Blueprint, CreateBlueprintRequest, UpdateBlueprintRequest};
use crate::storage::{StorageBackend, StorageError};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Business logic for the blueprint store.
#[derive(Clone)]
pub struct BlueprintService {
    storage: Arc<dyn StorageBackend>,
}

impl BlueprintService {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    pub async fn create(&self, request: CreateBlueprintRequest) -> Result<Blueprint, StorageError> {
        info!("Creating blueprint with name: {}", request.name);
        if request.name.is_empty() {
            return Err(StorageError::validation("name", "name must not be empty"));
        }

        let blueprint = Blueprint::new(request.name, request.nodes, request.edges);
        let created = self.storage.create_blueprint(blueprint).await?;
        info!("Blueprint created with ID: {}", created.blueprint_id);
        Ok(created)
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Blueprint, StorageError> {
        debug!("Finding blueprint with ID: {}", id);
        self.storage
            .get_blueprint(id)
            .await?
            .ok_or_else(|| {
                warn!("Blueprint with ID {} not found", id);
                StorageError::not_found("blueprint", id)
            })
    }

    pub async fn find_all(&self) -> Result<Vec<Blueprint>, StorageError> {
        let blueprints = self.storage.list_blueprints().await?;
        debug!("Found {} blueprints", blueprints.len());
        Ok(blueprints)
    }

    /// Merge name/nodes/edges, whichever are supplied. Node and edge
    /// collections are replaced wholesale, never patched per-node.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateBlueprintRequest,
    ) -> Result<Blueprint, StorageError> {
        info!("Updating blueprint with ID: {}", id);
        let mut blueprint = self.find_one(id).await?;

        if let Some(name) = request.name {
            if name.is_empty() {
                return Err(StorageError::validation("name", "name must not be empty"));
            }
            blueprint.name = name;
        }
        if let Some(nodes) = request.nodes {
            blueprint.nodes = nodes;
        }
        if let Some(edges) = request.edges {
            blueprint.edges = edges;
        }

        let updated = self.storage.update_blueprint(blueprint).await?;
        info!("Blueprint {} updated successfully", id);
        Ok(updated)
    }

    pub async fn remove(&self, id: Uuid) -> Result<Blueprint, StorageError> {
        info!("Removing blueprint with ID: {}", id);
        let removed = self
            .storage
            .delete_blueprint(id)
            .await?
            .ok_or_else(|| StorageError::not_found("blueprint", id))?;
        info!("Blueprint {} removed successfully", id);
        Ok(removed)
    }
}
