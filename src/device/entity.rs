use crate::core::types::PROP_COUNT;
use crate::core::{AdapterError, Operation, Result};
use crate::device::DeviceDescriptor;
use crate::storage::SharedStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Observer invoked with `(property_name, new_value)` once a mutation has
/// been durably saved.
pub type PropertyChangeHandler = Arc<dyn Fn(&str, u64) + Send + Sync>;

/// One addressable counter backed by its own record in the shared document.
///
/// The cached count is a read-through copy of the persisted value and is
/// only updated after a save succeeds, so the cache never shows an
/// unconfirmed mutation.
pub struct CounterEntity {
    id: String,
    name: String,
    count: AtomicU64,
    store: SharedStore,
    observers: Vec<PropertyChangeHandler>,
}

impl CounterEntity {
    /// Build the entity and seed its cache from the current document.
    ///
    /// One load-and-scan, no save. The registry guarantees the record
    /// exists; if it does not, the cache starts at 0.
    pub async fn attach(store: SharedStore, id: &str, name: &str) -> Result<Self> {
        let doc = store.load().await?;
        let count = doc.record(id).map(|r| r.count).unwrap_or(0);
        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            count: AtomicU64::new(count),
            store,
            observers: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cached value; side-effect free.
    pub fn current_count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    /// Attach an observer for count changes.
    pub fn subscribe(&mut self, handler: PropertyChangeHandler) {
        self.observers.push(handler);
    }

    /// Registration metadata for this counter.
    pub fn descriptor(&self) -> DeviceDescriptor {
        DeviceDescriptor::counter(&self.id, &self.name)
    }

    pub async fn reset(&self) -> Result<u64> {
        self.apply(Operation::Reset).await
    }

    pub async fn increment(&self) -> Result<u64> {
        self.apply(Operation::Increment).await
    }

    /// Run one synchronized read-modify-write against the store.
    ///
    /// The new count derives from the persisted value, not the cache. A
    /// record that vanished from the document is fatal configuration drift:
    /// nothing is written and the cache keeps its last-known value. Cache
    /// and observers are updated under the store lock so their order always
    /// matches save order.
    pub async fn apply(&self, operation: Operation) -> Result<u64> {
        let mut store = self.store.lock().await;
        store.open().await?;
        let mut doc = store.load().await?;

        let record = doc
            .record_mut(&self.id)
            .ok_or_else(|| AdapterError::RecordMissing(self.id.clone()))?;
        record.count = operation.apply(record.count);
        let new_count = record.count;

        store.save(&doc).await?;

        self.count.store(new_count, Ordering::SeqCst);
        for observer in &self.observers {
            observer(PROP_COUNT, new_count);
        }
        drop(store);

        debug!(id = %self.id, operation = operation.name(), count = new_count, "counter updated");
        Ok(new_count)
    }
}
