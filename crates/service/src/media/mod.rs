//! Image hosting collaborator: accepts raw image bytes and hands back a stable
//! retrieval URL.

pub mod cloudinary;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use cloudinary::CloudinaryUploader;

/// An image received from a client, not yet uploaded.
#[derive(Clone, Debug, PartialEq)]
pub struct ImagePayload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl ImagePayload {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { file_name: None, content_type: None, data: data.into() }
    }

    pub fn len(&self) -> usize { self.data.len() }

    pub fn is_empty(&self) -> bool { self.data.is_empty() }
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("invalid payload: {0}")]
    Payload(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("upload rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected upload response: {0}")]
    InvalidResponse(String),
}

/// Synchronous upload of one image into a logical folder.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Returns the secure URL the image can be retrieved from.
    async fn upload(&self, image: ImagePayload, folder: &str) -> Result<String, MediaError>;
}

/// In-memory uploader for tests and local runs without media credentials.
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Clone, Debug, PartialEq)]
    pub struct RecordedUpload {
        pub folder: String,
        pub file_name: Option<String>,
        pub size: usize,
        pub url: String,
    }

    #[derive(Default)]
    pub struct MockMediaUploader {
        uploads: Mutex<Vec<RecordedUpload>>,
        fail: AtomicBool,
    }

    impl MockMediaUploader {
        /// An uploader whose every call fails.
        pub fn failing() -> Self {
            let m = Self::default();
            m.set_failing(true);
            m
        }

        pub fn set_failing(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        pub fn uploads(&self) -> Vec<RecordedUpload> {
            self.uploads.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MediaUploader for MockMediaUploader {
        async fn upload(&self, image: ImagePayload, folder: &str) -> Result<String, MediaError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(MediaError::Rejected { status: 503, message: "media service unavailable".into() });
            }
            if image.is_empty() {
                return Err(MediaError::Payload("empty image".into()));
            }
            let mut uploads = self.uploads.lock().unwrap();
            let url = format!("https://media.test/{}/{}.jpg", folder, uploads.len() + 1);
            uploads.push(RecordedUpload {
                folder: folder.to_string(),
                file_name: image.file_name.clone(),
                size: image.len(),
                url: url.clone(),
            });
            Ok(url)
        }
    }
}
