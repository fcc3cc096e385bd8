//! Storage for the active provider/model selection
//!
//! The selection is process-wide: one value shared by every request. A
//! key/value backend makes it survive restarts and span instances; without
//! one it lives in memory.

mod error;
mod kv;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use quarry_config::StoreConfig;
use quarry_llm::Selection;
use serde::Serialize;

pub use error::StoreError;
pub use kv::KvStore;
pub use memory::MemoryStore;

/// Backend currently holding the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Kv,
    Memory,
}

/// Read and replace the active selection
///
/// Neither operation fails: backend problems are logged and the in-memory
/// value is used instead.
#[async_trait]
pub trait SelectionStore: Send + Sync {
    /// Current selection, the default when nothing was ever stored
    async fn get(&self) -> Selection;

    /// Replace the selection and return it
    async fn set(&self, selection: Selection) -> Selection;

    fn kind(&self) -> StorageKind;
}

/// Pick the store for the given configuration
///
/// A configured URL that cannot be opened falls back to memory.
pub fn build_store(config: &StoreConfig) -> Arc<dyn SelectionStore> {
    let Some(url) = config.url() else {
        tracing::info!("selection store: memory");
        return Arc::new(MemoryStore::new());
    };

    match KvStore::new(url, &config.key_prefix) {
        Ok(store) => {
            tracing::info!(key = store.key(), "selection store: kv");
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to open kv store, falling back to memory");
            Arc::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_value(StorageKind::Kv).unwrap(), "kv");
        assert_eq!(serde_json::to_value(StorageKind::Memory).unwrap(), "memory");
    }

    #[test]
    fn no_url_builds_memory_store() {
        let store = build_store(&StoreConfig::default());
        assert_eq!(store.kind(), StorageKind::Memory);
    }

    #[test]
    fn blank_url_builds_memory_store() {
        let config = StoreConfig {
            url: Some("  ".to_owned()),
            ..StoreConfig::default()
        };
        assert_eq!(build_store(&config).kind(), StorageKind::Memory);
    }

    #[test]
    fn malformed_url_falls_back_to_memory() {
        let config = StoreConfig {
            url: Some("not a url".to_owned()),
            ..StoreConfig::default()
        };
        assert_eq!(build_store(&config).kind(), StorageKind::Memory);
    }

    #[test]
    fn redis_url_builds_kv_store() {
        let config = StoreConfig {
            url: Some("redis://127.0.0.1:6379".to_owned()),
            ..StoreConfig::default()
        };
        assert_eq!(build_store(&config).kind(), StorageKind::Kv);
    }
}
