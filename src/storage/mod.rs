// dbbackup/src/storage/mod.rs
pub(crate) mod s3;

pub use s3::S3Engine;

use async_trait::async_trait;

use crate::errors::Result;

/// Per-upload options. All fields default to the backend's own defaults;
/// extend here rather than widening the `upload_file` signature.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    pub content_type: Option<String>,
    pub acl: Option<String>,
}

/// Capability of validating a remote container and uploading bytes to a
/// named object inside it.
#[async_trait]
pub trait StorageEngine {
    /// Returns `Ok(true)` only on confirmed existence, `Ok(false)` when the
    /// bucket definitively does not exist or is not visible, and an error
    /// when transport or permission problems prevented a definitive answer.
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Uploads the payload under `key` inside `bucket`. `Ok(())` means the
    /// remote store durably accepted the object.
    async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        content: Vec<u8>,
        opts: UploadOptions,
    ) -> Result<()>;
}
