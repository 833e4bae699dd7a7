//! Download sink writing into a directory

use super::traits::DownloadSink;
use crate::config::FileCollisionAction;
use crate::error::{Error, Result};
use crate::types::DownloadedFile;
use crate::utils::get_unique_path;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// Writes downloads into `dir`, creating it on first use
///
/// Name clashes are resolved with the configured [`FileCollisionAction`].
#[derive(Debug, Clone)]
pub struct FsDownloadSink {
    dir: PathBuf,
    collision: FileCollisionAction,
}

impl FsDownloadSink {
    /// Create a sink for `dir`
    pub fn new(dir: impl Into<PathBuf>, collision: FileCollisionAction) -> Self {
        Self {
            dir: dir.into(),
            collision,
        }
    }

    /// Target directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl DownloadSink for FsDownloadSink {
    async fn save(&self, filename: &str, body: Bytes) -> Result<DownloadedFile> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| Error::Materialize {
                path: self.dir.clone(),
                source,
            })?;

        let path = get_unique_path(&self.dir.join(filename), self.collision)?;

        tokio::fs::write(&path, &body)
            .await
            .map_err(|source| Error::Materialize {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), bytes = body.len(), "download written");

        Ok(DownloadedFile {
            path,
            bytes: body.len() as u64,
        })
    }

    fn name(&self) -> &'static str {
        "filesystem"
    }
}
