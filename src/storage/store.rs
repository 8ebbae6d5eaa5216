use crate::core::{ConfigDocument, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Durable whole-document store scoped to this plugin.
///
/// There is deliberately no field-level update: callers load the whole
/// document, mutate it in memory and save the whole document back. Any two
/// interleaved load-modify-save cycles would therefore lose the first
/// writer's change, so all mutation goes through [`SharedStore`].
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Ensure the backing store is ready. Idempotent.
    async fn open(&mut self) -> Result<()>;

    /// Return the current document, or the default document if none has
    /// been persisted yet. Never returns a partially-parsed document.
    async fn load(&self) -> Result<ConfigDocument>;

    /// Atomically overwrite the whole document.
    async fn save(&mut self, doc: &ConfigDocument) -> Result<()>;
}

/// Cloneable handle sharing one store across the adapter and its devices.
///
/// Every load-modify-save cycle runs while holding the handle's mutex, which
/// serializes mutations process-wide and closes the lost-update window the
/// whole-document contract would otherwise leave open.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Box<dyn ConfigStore>>>,
}

impl SharedStore {
    pub fn new<S: ConfigStore + 'static>(store: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(store))),
        }
    }

    pub async fn open(&self) -> Result<()> {
        self.inner.lock().await.open().await
    }

    pub async fn load(&self) -> Result<ConfigDocument> {
        self.inner.lock().await.load().await
    }

    /// Take the store for a full open-load-mutate-save cycle. The guard must
    /// be held until the save completes.
    pub(crate) async fn lock(&self) -> MutexGuard<'_, Box<dyn ConfigStore>> {
        self.inner.lock().await
    }
}
