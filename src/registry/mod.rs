use crate::core::{Result, TimerRecord};
use crate::storage::SharedStore;
use tracing::debug;
use uuid::Uuid;

/// Prefix keeping counter ids visually distinguishable from other entity
/// kinds sharing the same document.
const ID_PREFIX: &str = "counter-";

/// Stable identifier for a freshly configured counter: 128 bits of
/// randomness, hex-encoded.
pub fn new_counter_id() -> String {
    format!("{}{}", ID_PREFIX, Uuid::new_v4().simple())
}

/// Reconciles the persisted timer list with runtime device identity.
pub struct TimerRegistry;

impl TimerRegistry {
    /// Assign ids to records that lack one and persist the result.
    ///
    /// The full list is saved back even when nothing changed, so the stored
    /// document always reflects the last known state. An absent list means
    /// "no timers configured" and is never written back; ids already present
    /// are never touched, so re-running on a normalized document is a no-op.
    pub async fn normalize(store: &SharedStore) -> Result<Vec<TimerRecord>> {
        let mut guard = store.lock().await;
        guard.open().await?;
        let mut doc = guard.load().await?;

        let Some(timers) = doc.timers.as_mut() else {
            return Ok(Vec::new());
        };

        for record in timers.iter_mut() {
            if !record.has_id() {
                record.id = new_counter_id();
                debug!(id = %record.id, name = %record.name, "assigned counter id");
            }
        }

        let records = timers.clone();
        guard.save(&doc).await?;
        Ok(records)
    }
}
