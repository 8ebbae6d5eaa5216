use crate::core::{AdapterError, Operation, Result};
use crate::device::{CounterEntity, DeviceDescriptor, PropertyChangeHandler};
use crate::registry::TimerRegistry;
use crate::storage::{ConfigStore, SharedStore};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Host-side registration capability handed to the adapter at startup.
///
/// The host framework owns discovery and the UI; the adapter only reports
/// the devices it materialized. The returned handler, if any, receives
/// `(property_name, new_value)` notifications for that device.
pub trait DeviceRegistrar: Send + Sync {
    fn register(&self, device: &DeviceDescriptor) -> Option<PropertyChangeHandler>;
}

/// Start/finish signals for one routed action, used by the host for
/// progress indication only. There is no return payload.
pub trait ActionProgress: Send {
    fn name(&self) -> &str;
    fn start(&mut self) {}
    fn finish(&mut self) {}
}

/// Minimal [`ActionProgress`] carrier for callers that do not track
/// progress.
pub struct ActionRequest {
    name: String,
}

impl ActionRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ActionProgress for ActionRequest {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Owns the shared store and one device per persisted counter record, and
/// routes the host framework's named operations to them.
///
/// # Examples
///
/// ```
/// use counterhub::{
///     CounterAdapter, DeviceDescriptor, DeviceRegistrar, InMemoryConfigStore,
///     PropertyChangeHandler,
/// };
///
/// struct NullRegistrar;
///
/// impl DeviceRegistrar for NullRegistrar {
///     fn register(&self, _device: &DeviceDescriptor) -> Option<PropertyChangeHandler> {
///         None
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> counterhub::Result<()> {
/// // An unconfigured store materializes no devices.
/// let adapter = CounterAdapter::start(InMemoryConfigStore::new(), &NullRegistrar).await?;
/// assert_eq!(adapter.devices().count(), 0);
/// # Ok(())
/// # }
/// ```
pub struct CounterAdapter {
    store: SharedStore,
    devices: HashMap<String, Arc<CounterEntity>>,
}

impl CounterAdapter {
    /// Open the store, normalize the persisted timer list and materialize
    /// one counter device per record, registering each with the host.
    pub async fn start<S>(store: S, registrar: &dyn DeviceRegistrar) -> Result<Self>
    where
        S: ConfigStore + 'static,
    {
        Self::start_shared(SharedStore::new(store), registrar).await
    }

    pub async fn start_shared(store: SharedStore, registrar: &dyn DeviceRegistrar) -> Result<Self> {
        store.open().await?;
        let records = TimerRegistry::normalize(&store).await?;

        let mut devices = HashMap::new();
        for record in &records {
            let mut entity = CounterEntity::attach(store.clone(), &record.id, &record.name).await?;
            if let Some(handler) = registrar.register(&entity.descriptor()) {
                entity.subscribe(handler);
            }
            devices.insert(record.id.clone(), Arc::new(entity));
        }

        info!(devices = devices.len(), "counter adapter started");
        Ok(Self { store, devices })
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn device(&self, id: &str) -> Option<&Arc<CounterEntity>> {
        self.devices.get(id)
    }

    pub fn devices(&self) -> impl Iterator<Item = &Arc<CounterEntity>> {
        self.devices.values()
    }

    /// Route one named action to the matching device.
    ///
    /// An unknown device id is a routing failure and is surfaced. An unknown
    /// action name is not: it is logged and ignored, and the action still
    /// finishes. `finish` is signalled even when the operation fails so a
    /// caller waiting on the action never hangs.
    pub async fn perform_action(
        &self,
        device_id: &str,
        action: &mut dyn ActionProgress,
    ) -> Result<()> {
        let entity = self
            .devices
            .get(device_id)
            .ok_or_else(|| AdapterError::DeviceMissing(device_id.to_string()))?;

        action.start();
        let outcome = match Operation::parse(action.name()) {
            Some(operation) => entity.apply(operation).await.map(|_| ()),
            None => {
                warn!(action = action.name(), device = device_id, "unknown action");
                Ok(())
            }
        };
        action.finish();
        outcome
    }
}
