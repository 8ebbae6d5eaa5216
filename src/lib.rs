// ============================================================================
// counterhub Library
// ============================================================================

pub mod adapter;
pub mod core;
pub mod device;
pub mod registry;
pub mod storage;

// Re-export main types for convenience
pub use adapter::{ActionProgress, ActionRequest, CounterAdapter, DeviceRegistrar};
pub use crate::core::{AdapterError, ConfigDocument, Operation, Result, TimerRecord};
pub use device::{
    ActionDescriptor, CounterEntity, DeviceDescriptor, PropertyChangeHandler, PropertyDescriptor,
    PropertyKind,
};
pub use registry::{TimerRegistry, new_counter_id};
pub use storage::{ConfigStore, FileConfigStore, InMemoryConfigStore, SharedStore};
