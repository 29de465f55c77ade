use async_trait::async_trait;
use configs::MediaConfig;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, error, instrument};

use super::{ImagePayload, MediaError, MediaUploader};

/// Signed uploads to the Cloudinary upload API.
#[derive(Clone)]
pub struct CloudinaryUploader {
    client: reqwest::Client,
    cfg: MediaConfig,
}

#[derive(Debug, Deserialize)]
struct UploadReply {
    secure_url: Option<String>,
    error: Option<ErrorReply>,
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
    message: String,
}

impl CloudinaryUploader {
    pub fn new(client: reqwest::Client, cfg: MediaConfig) -> Self {
        Self { client, cfg }
    }

    fn upload_url(&self) -> String {
        format!("{}/{}/image/upload", self.cfg.api_base_url.trim_end_matches('/'), self.cfg.cloud_name)
    }
}

/// SHA-256 hex signature over `k=v` pairs joined by `&` in key order, followed
/// by the API secret.
pub fn sign_params(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    #[instrument(skip(self, image, folder), fields(size = image.len(), folder = %folder))]
    async fn upload(&self, image: ImagePayload, folder: &str) -> Result<String, MediaError> {
        if image.is_empty() {
            return Err(MediaError::Payload("empty image".into()));
        }

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signed = [("folder", folder.to_string()), ("timestamp", timestamp.clone())];
        let signature = sign_params(&signed, &self.cfg.api_secret);

        let file_name = image.file_name.clone().unwrap_or_else(|| "upload".to_string());
        let mut part = Part::bytes(image.data.to_vec()).file_name(file_name);
        if let Some(ct) = image.content_type.as_deref() {
            part = part.mime_str(ct).map_err(|e| MediaError::Payload(e.to_string()))?;
        }
        let form = Form::new()
            .part("file", part)
            .text("api_key", self.cfg.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let resp = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| MediaError::Transport(e.to_string()))?;
        debug!(status = status.as_u16(), "media upload reply");

        let reply: Option<UploadReply> = serde_json::from_str(&body).ok();
        if !status.is_success() {
            let message = reply
                .and_then(|r| r.error)
                .map(|e| e.message)
                .unwrap_or(body);
            error!(status = status.as_u16(), %message, "media upload rejected");
            return Err(MediaError::Rejected { status: status.as_u16(), message });
        }

        reply
            .and_then(|r| r.secure_url)
            .ok_or_else(|| MediaError::InvalidResponse("secure_url missing".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Multipart, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    fn cfg(base: String) -> MediaConfig {
        MediaConfig {
            cloud_name: "demo".into(),
            api_key: "key-123".into(),
            api_secret: "s3cret".into(),
            folder: "news_images".into(),
            api_base_url: base,
        }
    }

    async fn spawn(router: Router) -> String {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        format!("http://{}", addr)
    }

    #[test]
    fn signature_is_order_independent_and_hex() {
        let a = sign_params(&[("timestamp", "1700000000".into()), ("folder", "news_images".into())], "s3cret");
        let b = sign_params(&[("folder", "news_images".into()), ("timestamp", "1700000000".into())], "s3cret");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));

        let expected = Sha256::digest(b"folder=news_images&timestamp=1700000000s3cret")
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<String>();
        assert_eq!(a, expected);
    }

    #[tokio::test]
    async fn upload_returns_secure_url_and_sends_signed_form() {
        async fn handler(mut mp: Multipart) -> Json<Value> {
            let mut fields = serde_json::Map::new();
            while let Some(field) = mp.next_field().await.unwrap() {
                let name = field.name().unwrap_or_default().to_string();
                let data = field.bytes().await.unwrap();
                fields.insert(name, json!(data.len()));
            }
            let ok = ["file", "api_key", "timestamp", "folder", "signature"]
                .iter()
                .all(|k| fields.contains_key(*k));
            Json(json!({ "secure_url": if ok { "https://res.example.com/img.jpg" } else { "missing" } }))
        }
        let base = spawn(Router::new().route("/demo/image/upload", post(handler))).await;
        let uploader = CloudinaryUploader::new(reqwest::Client::new(), cfg(base));

        let url = uploader.upload(ImagePayload::new(vec![1u8, 2, 3]), "news_images").await.unwrap();
        assert_eq!(url, "https://res.example.com/img.jpg");
    }

    #[tokio::test]
    async fn rejected_upload_carries_status_and_message() {
        async fn handler() -> (StatusCode, Json<Value>) {
            (StatusCode::UNAUTHORIZED, Json(json!({ "error": { "message": "Invalid Signature" } })))
        }
        let base = spawn(Router::new().route("/demo/image/upload", post(handler))).await;
        let uploader = CloudinaryUploader::new(reqwest::Client::new(), cfg(base));

        let err = uploader.upload(ImagePayload::new(vec![9u8; 16]), "news_images").await.unwrap_err();
        match err {
            MediaError::Rejected { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid Signature");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_secure_url_is_invalid_response() {
        async fn handler() -> Json<Value> { Json(json!({ "public_id": "abc" })) }
        let base = spawn(Router::new().route("/demo/image/upload", post(handler))).await;
        let uploader = CloudinaryUploader::new(reqwest::Client::new(), cfg(base));

        let err = uploader.upload(ImagePayload::new(vec![1u8]), "news_images").await.unwrap_err();
        assert!(matches!(err, MediaError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn empty_payload_is_rejected_before_sending() {
        let uploader = CloudinaryUploader::new(reqwest::Client::new(), cfg("http://127.0.0.1:9".into()));
        let err = uploader.upload(ImagePayload::new(Vec::<u8>::new()), "news_images").await.unwrap_err();
        assert!(matches!(err, MediaError::Payload(_)));
    }
}
