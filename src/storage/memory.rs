use crate::core::{AdapterError, ConfigDocument, Result};
use crate::storage::ConfigStore;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct StoreState {
    document: Mutex<Option<ConfigDocument>>,
    opened: AtomicBool,
    saves: AtomicUsize,
    skip_before_fault: AtomicUsize,
    faults: AtomicUsize,
}

/// Config store living entirely in memory.
///
/// Clones share the same state, so a test can keep one handle to inspect
/// the stored document or arm faults while the adapter owns another.
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    state: Arc<StoreState>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: ConfigDocument) -> Self {
        let store = Self::new();
        if let Ok(mut slot) = store.state.document.lock() {
            *slot = Some(document);
        }
        store
    }

    /// Make the next `n` store operations fail with `StoreUnavailable`.
    pub fn fail_next(&self, n: usize) {
        self.fail_after(0, n);
    }

    /// Let `ok_ops` store operations succeed, then fail the following `n`.
    pub fn fail_after(&self, ok_ops: usize, n: usize) {
        self.state.skip_before_fault.store(ok_ops, Ordering::SeqCst);
        self.state.faults.store(n, Ordering::SeqCst);
    }

    pub fn is_opened(&self) -> bool {
        self.state.opened.load(Ordering::SeqCst)
    }

    /// Number of successful saves so far.
    pub fn saves(&self) -> usize {
        self.state.saves.load(Ordering::SeqCst)
    }

    /// Copy of the stored document, if any save has happened.
    pub fn snapshot(&self) -> Option<ConfigDocument> {
        self.state.document.lock().ok().and_then(|doc| doc.clone())
    }

    fn take_fault(&self) -> Result<()> {
        let skipped = self
            .state
            .skip_before_fault
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if skipped {
            return Ok(());
        }
        let armed = self
            .state
            .faults
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if armed {
            return Err(AdapterError::StoreUnavailable(
                "injected store fault".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn open(&mut self) -> Result<()> {
        self.take_fault()?;
        self.state.opened.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn load(&self) -> Result<ConfigDocument> {
        self.take_fault()?;
        Ok(self.state.document.lock()?.clone().unwrap_or_default())
    }

    async fn save(&mut self, doc: &ConfigDocument) -> Result<()> {
        self.take_fault()?;
        *self.state.document.lock()? = Some(doc.clone());
        self.state.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimerRecord;

    #[tokio::test]
    async fn test_load_before_any_save_is_default() {
        let store = InMemoryConfigStore::new();
        let doc = store.load().await.unwrap();
        assert!(doc.timers.is_none());
        assert!(store.snapshot().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryConfigStore::new();
        let mut writer = store.clone();

        writer.open().await.unwrap();
        writer
            .save(&ConfigDocument::with_timers(vec![TimerRecord::new("A")]))
            .await
            .unwrap();

        assert!(store.is_opened());
        assert_eq!(store.saves(), 1);
        assert_eq!(store.snapshot().unwrap().records().len(), 1);
    }

    #[tokio::test]
    async fn test_fault_injection_counts_down() {
        let mut store = InMemoryConfigStore::new();
        store.fail_next(2);

        assert!(store.open().await.is_err());
        assert!(store.load().await.is_err());
        assert!(store.open().await.is_ok());
    }

    #[tokio::test]
    async fn test_fault_after_skipping_ok_operations() {
        let mut store = InMemoryConfigStore::new();
        store.fail_after(2, 1);

        assert!(store.open().await.is_ok());
        assert!(store.load().await.is_ok());
        assert!(store.save(&ConfigDocument::default()).await.is_err());
        assert!(store.save(&ConfigDocument::default()).await.is_ok());
    }
}
