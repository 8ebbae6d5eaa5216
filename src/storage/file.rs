use crate::core::{AdapterError, ConfigDocument, Result};
use crate::storage::ConfigStore;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Config document stored as JSON in a single file.
///
/// Saves go to a sibling temp file first and are renamed over the target, so
/// a crashed save never leaves a truncated document behind.
pub struct FileConfigStore {
    path: PathBuf,
    opened: bool,
}

impl FileConfigStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            opened: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn open(&mut self) -> Result<()> {
        if self.opened {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AdapterError::StoreUnavailable(format!("Failed to create config directory: {}", e))
            })?;
        }
        self.opened = true;
        Ok(())
    }

    async fn load(&self) -> Result<ConfigDocument> {
        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ConfigDocument::default());
            }
            Err(e) => {
                return Err(AdapterError::StoreUnavailable(format!(
                    "Failed to read config: {}",
                    e
                )));
            }
        };

        serde_json::from_slice(&data)
            .map_err(|e| AdapterError::StoreUnavailable(format!("Failed to parse config: {}", e)))
    }

    async fn save(&mut self, doc: &ConfigDocument) -> Result<()> {
        let serialized = serde_json::to_vec_pretty(doc).map_err(|e| {
            AdapterError::StoreUnavailable(format!("Failed to serialize config: {}", e))
        })?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &serialized).await.map_err(|e| {
            AdapterError::StoreUnavailable(format!("Failed to write config: {}", e))
        })?;
        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            AdapterError::StoreUnavailable(format!("Failed to replace config: {}", e))
        })?;
        Ok(())
    }
}
