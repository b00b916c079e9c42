//! Local-disk blob store for report attachments
//!
//! Attachments are written once under a generated name and never modified
//! or deleted; downloads look the blob up by name alone.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::core::config::StorageConfig;
use crate::core::error::{AppError, Result};

/// Local filesystem attachment store
pub struct DiskStorage {
    base_path: PathBuf,
}

impl DiskStorage {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            base_path: PathBuf::from(&config.upload_dir),
        }
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_dir_exists(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Millisecond timestamp plus a random suffix: unique even when two
    /// uploads land within the same instant.
    fn generate_filename(extension: &str) -> String {
        format!(
            "{}-{}.{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            extension
        )
    }

    /// Write a blob and return its generated filename
    pub async fn put(&self, data: &[u8], extension: &str) -> Result<String> {
        let filename = Self::generate_filename(extension);
        let full_path = self.base_path.join(&filename);

        let mut file = fs::File::create(&full_path).await?;
        file.write_all(data).await?;
        file.flush().await?;

        tracing::debug!("Stored attachment {} ({} bytes)", filename, data.len());

        Ok(filename)
    }

    /// Read a blob back by its filename
    ///
    /// Names come from `put`; anything shaped like a path is refused before
    /// touching the filesystem.
    pub async fn get(&self, filename: &str) -> Result<Vec<u8>> {
        if !Self::is_valid_filename(filename) {
            return Err(AppError::NotFound(format!(
                "Attachment {} not found",
                filename
            )));
        }

        let full_path = self.base_path.join(filename);
        fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::NotFound(format!("Attachment {} not found", filename))
            } else {
                AppError::Storage(e)
            }
        })
    }

    fn is_valid_filename(filename: &str) -> bool {
        !filename.is_empty()
            && !filename.contains('/')
            && !filename.contains('\\')
            && !filename.contains("..")
    }
}
