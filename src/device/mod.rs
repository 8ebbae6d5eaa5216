pub mod descriptor;
pub mod entity;

pub use descriptor::{
    ActionDescriptor, DeviceDescriptor, PropertyDescriptor, PropertyKind, SCHEMA_CONTEXT,
};
pub use entity::{CounterEntity, PropertyChangeHandler};
