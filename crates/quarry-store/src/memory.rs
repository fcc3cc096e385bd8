use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use quarry_llm::Selection;

use crate::{SelectionStore, StorageKind};

/// Process-local selection; last writer wins
#[derive(Debug, Default)]
pub struct MemoryStore {
    selection: RwLock<Selection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> Selection {
        self.selection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn write(&self, selection: Selection) {
        *self.selection.write().unwrap_or_else(PoisonError::into_inner) = selection;
    }
}

#[async_trait]
impl SelectionStore for MemoryStore {
    async fn get(&self) -> Selection {
        self.read()
    }

    async fn set(&self, selection: Selection) -> Selection {
        self.write(selection.clone());
        selection
    }

    fn kind(&self) -> StorageKind {
        StorageKind::Memory
    }
}
