use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Config store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Counter record '{0}' is missing from the config document")]
    RecordMissing(String),

    #[error("Device '{0}' not found")]
    DeviceMissing(String),
}

pub type Result<T> = std::result::Result<T, AdapterError>;

impl<T> From<std::sync::PoisonError<T>> for AdapterError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}
