//! Blueprint model.
//!
//! A blueprint is a stored visual graph of the factory layout. Nodes and
//! edges are opaque documents: the store never interprets positions, styles
//! or whether edge endpoints reference real node ids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A named node/edge graph snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Blueprint {
    /// Unique identifier, generated on creation
    pub blueprint_id: Uuid,
    /// Blueprint name
    pub name: String,
    /// Ordered graph nodes (opaque: id, label, position/size plus UI-only fields)
    pub nodes: Vec<serde_json::Value>,
    /// Ordered graph edges (opaque: source node id, target node id)
    pub edges: Vec<serde_json::Value>,
    /// Set once at creation, never updated
    pub created_at: DateTime<Utc>,
}

impl Blueprint {
    pub fn new(name: String, nodes: Vec<serde_json::Value>, edges: Vec<serde_json::Value>) -> Self {
        Self {
            blueprint_id: Uuid::new_v4(),
            name,
            nodes,
            edges,
            created_at: Utc::now(),
        }
    }
}

/// Request body for creating a blueprint
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBlueprintRequest {
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<serde_json::Value>,
    #[serde(default)]
    pub edges: Vec<serde_json::Value>,
}

/// Request body for updating a blueprint (wholesale node/edge replacement)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBlueprintRequest {
    pub name: Option<String>,
    pub nodes: Option<Vec<serde_json::Value>>,
    pub edges: Option<Vec<serde_json::Value>>,
}
