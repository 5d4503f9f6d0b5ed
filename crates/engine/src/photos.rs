// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Photo upload adapter and best-effort batch upload.

use async_trait::async_trait;
use dispatch_core::{PhotoId, PhotoPhase, PhotoRef};
use thiserror::Error;

/// Errors from photo upload operations
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload failed: {0}")]
    Failed(String),
}

/// A photo captured on the device, not yet uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoCapture {
    pub id: PhotoId,
    pub phase: PhotoPhase,
    /// Device-local reference (file path or content URI).
    pub source: String,
}

impl PhotoCapture {
    pub fn new(source: impl Into<String>, phase: PhotoPhase) -> Self {
        Self { id: PhotoId::new(), phase, source: source.into() }
    }
}

/// Adapter that turns a local capture into a remote URL.
#[async_trait]
pub trait PhotoUploader: Clone + Send + Sync + 'static {
    async fn upload(&self, capture: &PhotoCapture) -> Result<String, UploadError>;
}

/// Uploader for captures whose `source` is already a remote URL
/// (e.g. photos synced by the device gallery before completion).
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectUrlUploader;

#[async_trait]
impl PhotoUploader for DirectUrlUploader {
    async fn upload(&self, capture: &PhotoCapture) -> Result<String, UploadError> {
        Ok(capture.source.clone())
    }
}

/// Upload a batch best-effort: failures are logged and skipped, never
/// propagated. Returns the successfully uploaded refs (in capture order)
/// and the failure count.
pub async fn upload_all<U: PhotoUploader>(
    uploader: &U,
    captures: &[PhotoCapture],
) -> (Vec<PhotoRef>, usize) {
    let mut uploaded = Vec::with_capacity(captures.len());
    let mut failed = 0;
    for capture in captures {
        match uploader.upload(capture).await {
            Ok(url) => uploaded.push(PhotoRef {
                id: capture.id.clone(),
                url,
                phase: capture.phase,
            }),
            Err(e) => {
                failed += 1;
                tracing::warn!(photo_id = %capture.id, error = %e, "photo upload failed");
            }
        }
    }
    (uploaded, failed)
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{PhotoCapture, PhotoUploader, UploadError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashSet;
    use std::sync::Arc;

    /// Fake uploader that mints URLs from capture sources and can be told
    /// to fail specific captures.
    #[derive(Clone, Default)]
    pub struct FakePhotoUploader {
        failing: Arc<Mutex<HashSet<String>>>,
    }

    impl FakePhotoUploader {
        pub fn new() -> Self {
            Self::default()
        }

        /// Fail every upload whose capture source equals `source`.
        pub fn fail_source(&self, source: impl Into<String>) {
            self.failing.lock().insert(source.into());
        }
    }

    #[async_trait]
    impl PhotoUploader for FakePhotoUploader {
        async fn upload(&self, capture: &PhotoCapture) -> Result<String, UploadError> {
            if self.failing.lock().contains(&capture.source) {
                return Err(UploadError::Failed(format!("unreachable: {}", capture.source)));
            }
            Ok(format!("https://cdn.test/{}", capture.source))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakePhotoUploader;

#[cfg(test)]
#[path = "photos_tests.rs"]
mod tests;
