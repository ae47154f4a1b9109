use anyhow::Context as _;
use aws_sdk_s3::primitives::ByteStream;
use uuid::Uuid;

use crate::domain::repository::MediaStoragePort;
use crate::domain::types::MediaKind;
use crate::error::ApiError;

/// Media storage on S3-compatible object storage. Uploaded objects are served
/// from `public_base_url` (bucket website or CDN front).
#[derive(Clone)]
pub struct S3MediaStorage {
    pub client: aws_sdk_s3::Client,
    pub bucket: String,
    pub public_base_url: String,
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        "video/quicktime" => "mov",
        _ => "bin",
    }
}

impl MediaStoragePort for S3MediaStorage {
    async fn upload(
        &self,
        folder: &str,
        _kind: MediaKind,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let key = format!(
            "{folder}/{}.{}",
            Uuid::new_v4(),
            extension_for(content_type)
        );
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .context("upload object to S3")?;
        Ok(format!(
            "{}/{key}",
            self.public_base_url.trim_end_matches('/')
        ))
    }
}
