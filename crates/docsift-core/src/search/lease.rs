use std::sync::Arc;

use tracing::{info, warn};

use crate::error::UpstreamResult;
use crate::upstream::{IndexingStore, StoreId};

/// Owns a remote store for the duration of one job.
///
/// Call [`StoreLease::release`] on every path that can await. If the lease
/// is dropped unreleased (panic, cancelled future), deletion is spawned on
/// the current runtime instead.
pub struct StoreLease {
    store: Arc<dyn IndexingStore>,
    id: StoreId,
    released: bool,
}

impl StoreLease {
    pub async fn acquire(store: Arc<dyn IndexingStore>, name: &str) -> UpstreamResult<Self> {
        let id = store.create_store(name).await?;
        Ok(Self { store, id, released: false })
    }

    pub fn id(&self) -> &StoreId {
        &self.id
    }

    pub async fn release(mut self) -> UpstreamResult<()> {
        self.released = true;
        self.store.delete_store(&self.id).await
    }
}

impl Drop for StoreLease {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("[StoreLease] No runtime to delete store {}; it will leak", self.id);
            return;
        };
        let store = Arc::clone(&self.store);
        let id = self.id.clone();
        info!("[StoreLease] Store {} dropped unreleased, deleting in background", id);
        handle.spawn(async move {
            if let Err(e) = store.delete_store(&id).await {
                warn!("[StoreLease] Background delete of store {} failed: {}", id, e);
            }
        });
    }
}
