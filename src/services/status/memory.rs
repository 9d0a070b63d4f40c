use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::services::documents::types::{ProcessState, ProcessingStatus};
use crate::services::status::store::{StatusResult, StatusStore};

pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

/// Process-local, bounded status store.
///
/// Statuses are lost on restart. When full, inserting a new process evicts the oldest
/// finished record (oldest in-flight one only if nothing has finished).
#[derive(Debug)]
pub struct InMemoryStatusStore {
    entries: RwLock<HashMap<Uuid, ProcessingStatus>>,
    max_entries: usize,
}

impl Default for InMemoryStatusStore {
    fn default() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }
}

impl InMemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    pub async fn snapshot(&self) -> Vec<ProcessingStatus> {
        self.entries.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl StatusStore for InMemoryStatusStore {
    async fn put(&self, status: ProcessingStatus) -> StatusResult<()> {
        let mut entries = self.entries.write().await;

        if !entries.contains_key(&status.process_id) && entries.len() >= self.max_entries {
            let victim = entries
                .values()
                .min_by_key(|s| (s.status == ProcessState::Processing, s.updated_at))
                .map(|s| s.process_id);
            if let Some(victim) = victim {
                entries.remove(&victim);
                tracing::debug!(process_id = %victim, "status store full; evicted oldest record");
            }
        }

        entries.insert(status.process_id, status);
        Ok(())
    }

    async fn get(&self, process_id: Uuid) -> StatusResult<Option<ProcessingStatus>> {
        Ok(self.entries.read().await.get(&process_id).cloned())
    }
}
