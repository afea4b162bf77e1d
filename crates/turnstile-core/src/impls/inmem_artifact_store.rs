//! InMemoryArtifactStore - 開発用オブジェクトストレージ

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::ports::{ArtifactError, ArtifactStore};

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// In-memory artifact store keyed by object name.
#[derive(Default)]
pub struct InMemoryArtifactStore {
    objects: Arc<Mutex<HashMap<String, StoredObject>>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored keys, sorted (for tests).
    #[cfg(test)]
    pub async fn keys(&self) -> Vec<String> {
        let objects = self.objects.lock().await;
        let mut keys: Vec<String> = objects.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Stored content type of one object (for tests).
    #[cfg(test)]
    pub async fn content_type(&self, key: &str) -> Option<String> {
        let objects = self.objects.lock().await;
        objects.get(key).map(|o| o.content_type.clone())
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ArtifactError> {
        let mut objects = self.objects.lock().await;
        objects.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, ArtifactError> {
        let objects = self.objects.lock().await;
        objects
            .get(key)
            .map(|o| o.bytes.clone())
            .ok_or_else(|| ArtifactError::Missing(key.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), ArtifactError> {
        let mut objects = self.objects.lock().await;
        // Deleting an absent key is a no-op, matching object-store semantics.
        objects.remove(key);
        Ok(())
    }
}
