use crate::core::types::{ACTION_INCREMENT, ACTION_RESET, PROP_COUNT};
use serde::Serialize;

/// Capability schema the gateway uses to classify devices.
pub const SCHEMA_CONTEXT: &str = "https://iot.mozilla.org/schemas/";

/// Value type of a registered property.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Integer,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    pub title: String,
    #[serde(rename = "readOnly")]
    pub read_only: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub name: String,
    pub title: String,
    pub description: String,
}

/// Registration metadata for one device: everything the host framework needs
/// to make it discoverable, with no behavior attached.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub id: String,
    pub title: String,
    #[serde(rename = "@context")]
    pub schema_context: String,
    pub properties: Vec<PropertyDescriptor>,
    pub actions: Vec<ActionDescriptor>,
}

impl DeviceDescriptor {
    /// Metadata for one counter device: a read-only integer `count` property
    /// and the two zero-argument actions.
    pub fn counter(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            schema_context: SCHEMA_CONTEXT.to_string(),
            properties: vec![PropertyDescriptor {
                name: PROP_COUNT.to_string(),
                kind: PropertyKind::Integer,
                title: "Counter".to_string(),
                read_only: true,
            }],
            actions: vec![
                ActionDescriptor {
                    name: ACTION_RESET.to_string(),
                    title: "Reset".to_string(),
                    description: "Reset the counter".to_string(),
                },
                ActionDescriptor {
                    name: ACTION_INCREMENT.to_string(),
                    title: "Increment".to_string(),
                    description: "Increment the counter".to_string(),
                },
            ],
        }
    }
}
