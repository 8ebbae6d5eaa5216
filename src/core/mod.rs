pub mod error;
pub mod types;

pub use error::{AdapterError, Result};
pub use types::{ConfigDocument, Operation, TimerRecord};
