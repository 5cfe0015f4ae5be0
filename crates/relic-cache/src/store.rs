//! Artifact storage backends.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use relic_core::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Trait for artifact storage backends.
///
/// Callers treat any `fetch` error as a cache miss; the trait does not
/// distinguish "object absent" from transport failure.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Fetch the full byte content of the object at `key`.
    async fn fetch(&self, key: &str) -> Result<Vec<u8>>;

    /// Store a local file at `key`, publicly readable, with the file's
    /// on-disk size as the declared content length.
    async fn put(&self, key: &str, file: &Path) -> Result<()>;
}

/// S3-backed artifact store. Credentials come from the ambient environment
/// (env vars, profile, instance role) via the SDK's default provider chain.
pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Store {
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: aws_sdk_s3::Client::new(&sdk_config),
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ArtifactStore for S3Store {
    async fn fetch(&self, key: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Fetch of {} failed: {}", key, e)))?;

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| Error::Storage(format!("Read of {} failed: {}", key, e)))?;
        Ok(body.into_bytes().to_vec())
    }

    async fn put(&self, key: &str, file: &Path) -> Result<()> {
        let size = tokio::fs::metadata(file)
            .await
            .map_err(|e| Error::Storage(format!("Stat of {} failed: {}", file.display(), e)))?
            .len();
        let body = ByteStream::from_path(file)
            .await
            .map_err(|e| Error::Storage(format!("Open of {} failed: {}", file.display(), e)))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_length(size as i64)
            .content_type("binary/octet-stream")
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Upload of {} failed: {}", key, e)))?;

        info!(key = %key, size, "uploaded artifact");
        Ok(())
    }
}

/// Filesystem-based artifact store for local development and tests.
pub struct FilesystemStore {
    root_dir: PathBuf,
}

impl FilesystemStore {
    pub fn new(root_dir: PathBuf) -> Self {
        Self { root_dir }
    }
}

#[async_trait]
impl ArtifactStore for FilesystemStore {
    async fn fetch(&self, key: &str) -> Result<Vec<u8>> {
        tokio::fs::read(self.root_dir.join(key))
            .await
            .map_err(|e| Error::Storage(format!("Fetch of {} failed: {}", key, e)))
    }

    async fn put(&self, key: &str, file: &Path) -> Result<()> {
        let target = self.root_dir.join(key);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Storage(format!("Store of {} failed: {}", key, e)))?;
        }
        tokio::fs::copy(file, &target)
            .await
            .map_err(|e| Error::Storage(format!("Store of {} failed: {}", key, e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn filesystem_put_then_fetch() {
        let root = tempfile::tempdir().unwrap();
        let store = FilesystemStore::new(root.path().to_path_buf());

        let artifact = root.path().join("artifact.bin");
        std::fs::write(&artifact, b"payload").unwrap();

        store.put("abc123/out.tar.gz", &artifact).await.unwrap();
        let bytes = store.fetch("abc123/out.tar.gz").await.unwrap();
        assert_eq!(bytes, b"payload");
    }

    #[tokio::test]
    async fn filesystem_fetch_of_absent_key_errors() {
        let root = tempfile::tempdir().unwrap();
        let store = FilesystemStore::new(root.path().to_path_buf());

        let err = store.fetch("missing/out.tar.gz").await.unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }
}
