#[cfg(test)]
mod tests {
    use automation_tracker_api::models::{CreateBlueprintRequest, UpdateBlueprintRequest};
    use automation_tracker_api::services::BlueprintService;
    use automation_tracker_api::storage::{MemoryStorageBackend, StorageError};
    use serde_json::json;
    use std::sync::Arc;
    use uuid::Uuid;

    fn service() -> BlueprintService {
        BlueprintService::new(Arc::new(MemoryStorageBackend::new()))
    }

    #[tokio::test]
    async fn test_create_blueprint() {
        let service = service();
        let blueprint = service
            .create(CreateBlueprintRequest {
                name: "Line 1 layout".to_string(),
                nodes: vec![json!({"id": "n1", "position": {"x": 10, "y": 20}})],
                edges: vec![json!({"id": "e1", "source": "n1", "target": "n2"})],
            })
            .await
            .unwrap();

        assert_eq!(blueprint.name, "Line 1 layout");
        assert_eq!(blueprint.nodes.len(), 1);
        assert_eq!(blueprint.edges.len(), 1);
        // Node payloads are stored opaque, shape untouched
        assert_eq!(blueprint.nodes[0]["position"]["x"], 10);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let service = service();
        let result = service
            .create(CreateBlueprintRequest {
                name: String::new(),
                nodes: vec![],
                edges: vec![],
            })
            .await;
        assert!(matches!(result, Err(StorageError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_allows_empty_collections() {
        let service = service();
        let blueprint = service
            .create(CreateBlueprintRequest {
                name: "Empty floor".to_string(),
                nodes: vec![],
                edges: vec![],
            })
            .await
            .unwrap();
        assert!(blueprint.nodes.is_empty());
        assert!(blueprint.edges.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_collections_wholesale() {
        let service = service();
        let created = service
            .create(CreateBlueprintRequest {
                name: "Layout".to_string(),
                nodes: vec![json!({"id": "n1"}), json!({"id": "n2"})],
                edges: vec![json!({"id": "e1"})],
            })
            .await
            .unwrap();

        let updated = service
            .update(
                created.blueprint_id,
                UpdateBlueprintRequest {
                    nodes: Some(vec![json!({"id": "n3"})]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // Supplied collection replaced entirely, untouched fields kept
        assert_eq!(updated.nodes.len(), 1);
        assert_eq!(updated.nodes[0]["id"], "n3");
        assert_eq!(updated.edges.len(), 1);
        assert_eq!(updated.name, "Layout");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_rejects_empty_name() {
        let service = service();
        let created = service
            .create(CreateBlueprintRequest {
                name: "Layout".to_string(),
                nodes: vec![],
                edges: vec![],
            })
            .await
            .unwrap();

        let result = service
            .update(
                created.blueprint_id,
                UpdateBlueprintRequest {
                    name: Some(String::new()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(StorageError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_find_one_missing_is_not_found() {
        let service = service();
        let result = service.find_one(Uuid::new_v4()).await;
        assert!(matches!(result, Err(StorageError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_remove_returns_deleted_blueprint() {
        let service = service();
        let created = service
            .create(CreateBlueprintRequest {
                name: "Old layout".to_string(),
                nodes: vec![],
                edges: vec![],
            })
            .await
            .unwrap();

        let removed = service.remove(created.blueprint_id).await.unwrap();
        assert_eq!(removed.blueprint_id, created.blueprint_id);

        let remaining = service.find_all().await.unwrap();
        assert!(remaining.is_empty());
    }
}
