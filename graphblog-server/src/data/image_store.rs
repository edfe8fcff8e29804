use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum ImageStoreError {
    #[error("image path '{0}' is outside of the images directory")]
    OutsideRoot(String),

    #[error("image io failed: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub(crate) trait ImageStore: Send + Sync {
    /// Writes the file and returns its public path, e.g. `images/1700000000000-cat.png`.
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<String, ImageStoreError>;
    async fn delete(&self, path: &str) -> Result<(), ImageStoreError>;
}

#[async_trait]
impl<T: ImageStore + ?Sized> ImageStore for Arc<T> {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<String, ImageStoreError> {
        (**self).store(file_name, bytes).await
    }

    async fn delete(&self, path: &str) -> Result<(), ImageStoreError> {
        (**self).delete(path).await
    }
}
