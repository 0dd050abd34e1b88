// dbbackup/src/storage/s3.rs
use async_trait::async_trait;
use aws_sdk_s3 as s3;
use s3::config::Region;
use s3::error::DisplayErrorContext;
use s3::primitives::ByteStream;
use s3::types::ObjectCannedAcl;

use crate::config::StorageConfig;
use crate::errors::{BackupError, Result};
use crate::storage::{StorageEngine, UploadOptions};

/// Storage engine for S3-compatible object stores (AWS S3, DigitalOcean
/// Spaces, MinIO). The client is built once at construction.
#[derive(Debug)]
pub struct S3Engine {
    client: s3::Client,
}

impl S3Engine {
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        if config.access_key_id.is_empty() || config.secret_access_key.is_empty() {
            return Err(BackupError::EngineInit(
                "S3 access key id and secret access key must be set".to_string(),
            ));
        }
        if config.bucket_name.is_empty() {
            return Err(BackupError::EngineInit(
                "S3 bucket name must be set".to_string(),
            ));
        }

        let mut loader = aws_config::defaults(s3::config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(s3::config::Credentials::new(
                &config.access_key_id,
                &config.secret_access_key,
                None,     // session_token
                None,     // expiry
                "Static", // provider_name
            ));
        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let sdk_config = loader.load().await;

        Ok(S3Engine {
            client: s3::Client::new(&sdk_config),
        })
    }
}

#[async_trait]
impl StorageEngine for S3Engine {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|service_err| service_err.is_not_found())
                {
                    return Ok(false);
                }
                Err(BackupError::Storage(format!(
                    "HeadBucket on {} failed: {}",
                    bucket,
                    DisplayErrorContext(&err)
                )))
            }
        }
    }

    async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        content: Vec<u8>,
        opts: UploadOptions,
    ) -> Result<()> {
        let mut request = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(content));
        if let Some(content_type) = opts.content_type {
            request = request.content_type(content_type);
        }
        if let Some(acl) = opts.acl {
            request = request.acl(ObjectCannedAcl::from(acl.as_str()));
        }

        request.send().await.map_err(|err| {
            BackupError::Upload(format!(
                "failed to upload {} to bucket {}: {}",
                key,
                bucket,
                DisplayErrorContext(&err)
            ))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn storage_config(access_key: &str, secret_key: &str, bucket: &str) -> StorageConfig {
        StorageConfig {
            endpoint_url: None,
            region: "us-east-1".to_string(),
            access_key_id: access_key.to_string(),
            secret_access_key: secret_key.to_string(),
            bucket_name: bucket.to_string(),
            dump_file: PathBuf::from("dump.sql.gz"),
        }
    }

    #[tokio::test]
    async fn test_new_rejects_missing_credentials() {
        let err = S3Engine::new(&storage_config("", "", "backups"))
            .await
            .unwrap_err();
        assert!(matches!(err, BackupError::EngineInit(_)));
    }

    #[tokio::test]
    async fn test_new_rejects_missing_bucket() {
        let err = S3Engine::new(&storage_config("key", "secret", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, BackupError::EngineInit(_)));
    }

    #[tokio::test]
    async fn test_new_accepts_complete_configuration() {
        assert!(S3Engine::new(&storage_config("key", "secret", "backups"))
            .await
            .is_ok());
    }
}
