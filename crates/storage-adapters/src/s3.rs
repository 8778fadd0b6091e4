//! S3-compatible object storage adapter.
//!
//! Uploads are cheap to retry, so this adapter retries a bounded number of
//! times with each attempt under a timeout. Callers treat any error as
//! "ticket proceeds without an attachment URL".

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use bytes::Bytes;
use domains::error::{AppError, Result};
use domains::ports::ObjectStorage;
use tracing::warn;

const UPLOAD_ATTEMPTS: usize = 3;
const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct S3ObjectStorage {
    client: Client,
    bucket: String,
    /// Endpoint base used to assemble public URLs, without trailing slash.
    public_base: String,
}

impl S3ObjectStorage {
    pub fn new(client: Client, bucket: String, public_base: String) -> Self {
        let public_base = public_base.trim_end_matches('/').to_string();
        Self { client, bucket, public_base }
    }

    async fn put(&self, data: Bytes, key: &str) -> Result<()> {
        let send = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .acl(ObjectCannedAcl::PublicRead)
            .body(ByteStream::from(data))
            .send();
        match tokio::time::timeout(ATTEMPT_TIMEOUT, send).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(err)) => Err(AppError::internal(err)),
            Err(_) => Err(AppError::internal("object storage upload timed out")),
        }
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn store(&self, data: Bytes, key: &str) -> Result<String> {
        let mut last_err = AppError::internal("upload not attempted");
        for attempt in 1..=UPLOAD_ATTEMPTS {
            match self.put(data.clone(), key).await {
                Ok(()) => {
                    return Ok(format!("{}/{}/{}", self.public_base, self.bucket, key));
                }
                Err(err) => {
                    warn!(key, attempt, %err, "object storage upload attempt failed");
                    last_err = err;
                }
            }
        }
        Err(last_err)
    }
}
