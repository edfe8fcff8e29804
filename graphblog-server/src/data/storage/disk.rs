use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::data::image_store::{ImageStore, ImageStoreError};

/// Stores images under a single directory that is also their public URL prefix.
#[derive(Debug, Clone)]
pub(crate) struct DiskImageStore {
    root: PathBuf,
    prefix: String,
}

impl DiskImageStore {
    pub(crate) fn new(images_dir: &str) -> Self {
        let prefix = images_dir.trim_end_matches('/').to_string();
        Self {
            root: PathBuf::from(&prefix),
            prefix,
        }
    }

    pub(crate) async fn ensure_root(&self) -> Result<(), ImageStoreError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, ImageStoreError> {
        let normalized = path.replace('\\', "/");
        let normalized = normalized.trim_start_matches('/');
        let name = normalized
            .strip_prefix(self.prefix.trim_start_matches('/'))
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| ImageStoreError::OutsideRoot(path.to_string()))?;

        if !is_plain_file_name(name) {
            return Err(ImageStoreError::OutsideRoot(path.to_string()));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl ImageStore for DiskImageStore {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<String, ImageStoreError> {
        if !is_plain_file_name(file_name) {
            return Err(ImageStoreError::OutsideRoot(file_name.to_string()));
        }
        self.ensure_root().await?;
        tokio::fs::write(self.root.join(file_name), bytes).await?;
        Ok(format!("{}/{}", self.prefix, file_name))
    }

    async fn delete(&self, path: &str) -> Result<(), ImageStoreError> {
        let target = self.resolve(path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path, "image already removed");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
