use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::IntegrationError;
use crate::app_system::UploadConfig;

/// Metadata the client computes before uploading a file.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub filename: String,
    pub byte_size: u64,
    /// Base64 MD5 of the file, computed client-side.
    pub checksum: String,
    pub content_type: Option<String>,
}

/// Where and how the client should upload the bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectUpload {
    pub signed_id: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub blob_id: u64,
    pub filename: String,
    pub byte_size: u64,
    pub checksum: String,
    pub content_type: Option<String>,
}

/// A blob known to the storage service.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobRef {
    pub blob_id: u64,
    pub signed_id: String,
    pub filename: String,
    pub content_type: Option<String>,
}

/// Upload broker with signed-URL semantics.
///
/// The backend never sees or re-verifies the uploaded bytes; it trusts the
/// storage service to check them against the declared checksum.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    async fn create_signed_upload(&self, request: UploadRequest) -> Result<DirectUpload, IntegrationError>;

    /// Looks up a blob by the signed id handed out at upload time.
    async fn resolve(&self, signed_id: &str) -> Result<Option<BlobRef>, IntegrationError>;
}

impl UploadRequest {
    pub fn validate(&self) -> Result<(), IntegrationError> {
        if self.filename.trim().is_empty() {
            return Err(IntegrationError::InvalidRequest("filename is blank".to_string()));
        }
        if self.byte_size == 0 {
            return Err(IntegrationError::InvalidRequest("byte size must be positive".to_string()));
        }
        if self.checksum.trim().is_empty() {
            return Err(IntegrationError::InvalidRequest("checksum is blank".to_string()));
        }
        Ok(())
    }
}

/// Blob storage kept in memory, for local runs and tests.
pub struct InMemoryBlobStorage {
    base_url: String,
    url_ttl_secs: u64,
    next_id: AtomicU64,
    blobs: RwLock<HashMap<String, BlobRef>>,
    fail_on_upload: RwLock<bool>,
}

impl InMemoryBlobStorage {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            url_ttl_secs: config.url_ttl_secs,
            next_id: AtomicU64::new(1),
            blobs: RwLock::new(HashMap::new()),
            fail_on_upload: RwLock::new(false),
        }
    }

    pub async fn set_fail_on_upload(&self, fail: bool) {
        *self.fail_on_upload.write().await = fail;
    }

    pub async fn blob_count(&self) -> usize {
        self.blobs.read().await.len()
    }
}

#[async_trait]
impl BlobStorage for InMemoryBlobStorage {
    async fn create_signed_upload(&self, request: UploadRequest) -> Result<DirectUpload, IntegrationError> {
        request.validate()?;
        if *self.fail_on_upload.read().await {
            return Err(IntegrationError::Storage("upload service unavailable".to_string()));
        }

        let blob_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let key = Uuid::new_v4().simple().to_string();
        let signed_id = format!("{}--{}", blob_id, key);

        let mut headers = BTreeMap::new();
        headers.insert(
            "Content-Type".to_string(),
            request
                .content_type
                .clone()
                .unwrap_or_else(|| "application/octet-stream".to_string()),
        );
        headers.insert("Content-MD5".to_string(), request.checksum.clone());

        self.blobs.write().await.insert(
            signed_id.clone(),
            BlobRef {
                blob_id,
                signed_id: signed_id.clone(),
                filename: request.filename.clone(),
                content_type: request.content_type.clone(),
            },
        );

        Ok(DirectUpload {
            url: format!("{}/{}?expires_in={}", self.base_url, key, self.url_ttl_secs),
            signed_id,
            headers,
            blob_id,
            filename: request.filename,
            byte_size: request.byte_size,
            checksum: request.checksum,
            content_type: request.content_type,
        })
    }

    async fn resolve(&self, signed_id: &str) -> Result<Option<BlobRef>, IntegrationError> {
        Ok(self.blobs.read().await.get(signed_id).cloned())
    }
}
