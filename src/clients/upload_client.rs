use std::sync::Arc;

use tracing::{info, instrument};

use crate::app_system::{EntityPayload, MutationError};
use crate::domain::Identity;
use crate::integrations::{BlobStorage, DirectUpload, UploadRequest};

/// Hands out signed upload URLs so clients can send files straight to blob
/// storage.
#[derive(Clone)]
pub struct UploadClient {
    blobs: Arc<dyn BlobStorage>,
}

impl UploadClient {
    pub fn new(blobs: Arc<dyn BlobStorage>) -> Self {
        Self { blobs }
    }

    #[instrument(
        skip(self, identity, request),
        fields(identity = %identity, filename = %request.filename, byte_size = request.byte_size)
    )]
    pub async fn create_direct_upload(&self, identity: &Identity, request: UploadRequest) -> EntityPayload<DirectUpload> {
        let result: Result<DirectUpload, MutationError> = self
            .blobs
            .create_signed_upload(request)
            .await
            .map_err(MutationError::from);
        if let Ok(upload) = &result {
            info!(blob_id = upload.blob_id, "Direct upload prepared");
        }
        EntityPayload::from_result(result, "Direct upload setup failed")
    }
}
