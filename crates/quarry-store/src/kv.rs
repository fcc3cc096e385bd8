use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use quarry_llm::Selection;
use redis::AsyncCommands;

use crate::memory::MemoryStore;
use crate::{SelectionStore, StorageKind, StoreError};

/// Selection persisted in a Redis-protocol key/value store
///
/// Every write also lands in memory, which serves reads whenever the backend
/// misses, fails or does not answer within the timeout.
pub struct KvStore {
    client: redis::Client,
    key: String,
    timeout: Duration,
    fallback: MemoryStore,
}

impl KvStore {
    /// Upper bound on one backend round trip, connection included
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

    /// Create a store writing under `{prefix}:model_config`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed. No connection is made.
    pub fn new(url: &str, key_prefix: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;

        Ok(Self {
            client,
            key: format!("{key_prefix}:model_config"),
            timeout: Self::DEFAULT_TIMEOUT,
            fallback: MemoryStore::new(),
        })
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    async fn bounded<T>(&self, op: impl Future<Output = Result<T, StoreError>>) -> Result<T, StoreError> {
        tokio::time::timeout(self.timeout, op)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))?
    }

    async fn load(&self) -> Result<Option<Selection>, StoreError> {
        let stored: Option<String> = self
            .bounded(async {
                let mut conn = self.client.get_multiplexed_async_connection().await?;
                Ok::<_, StoreError>(conn.get(&self.key).await?)
            })
            .await?;

        stored
            .map(|data| serde_json::from_str(&data))
            .transpose()
            .map_err(StoreError::from)
    }

    async fn save(&self, selection: &Selection) -> Result<(), StoreError> {
        let data = serde_json::to_string(selection)?;

        self.bounded(async {
            let mut conn = self.client.get_multiplexed_async_connection().await?;
            let _: () = conn.set(&self.key, data).await?;
            Ok::<_, StoreError>(())
        })
        .await
    }
}

#[async_trait]
impl SelectionStore for KvStore {
    async fn get(&self) -> Selection {
        match self.load().await {
            Ok(Some(selection)) => selection,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored selection, using in-memory value");
                self.fallback.read()
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read selection, using in-memory value");
                self.fallback.read()
            }
        }
    }

    async fn set(&self, selection: Selection) -> Selection {
        if let Err(e) = self.save(&selection).await {
            tracing::warn!(key = %self.key, error = %e, "failed to persist selection");
        }

        self.fallback.write(selection.clone());
        selection
    }

    fn kind(&self) -> StorageKind {
        StorageKind::Kv
    }
}
