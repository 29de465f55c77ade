use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use service::errors::ServiceError;
use tracing::{error, warn};

/// Error body shared by every endpoint: `{"error": <title>, "detail": <message>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: String,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, title: title.into(), detail }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(detail.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), title = %self.title, detail = ?self.detail, "request failed");
        } else {
            warn!(status = self.status.as_u16(), title = %self.title, detail = ?self.detail, "request rejected");
        }
        let body = serde_json::json!({ "error": self.title, "detail": self.detail });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg)),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ServiceError::Upload(msg) => Self::new(StatusCode::BAD_GATEWAY, "Upload Failed", Some(msg)),
            ServiceError::Db(msg) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Database Error", Some(msg)),
            ServiceError::Model(ModelError::Validation(msg)) => {
                Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg))
            }
            ServiceError::Model(ModelError::Db(msg)) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Database Error", Some(msg))
            }
        }
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(e: QueryRejection) -> Self { Self::bad_request(e.body_text()) }
}

impl From<PathRejection> for JsonApiError {
    fn from(e: PathRejection) -> Self { Self::bad_request(e.body_text()) }
}

impl From<JsonRejection> for JsonApiError {
    fn from(e: JsonRejection) -> Self { Self::bad_request(e.body_text()) }
}

impl From<MultipartRejection> for JsonApiError {
    fn from(e: MultipartRejection) -> Self { Self::bad_request(e.body_text()) }
}

impl From<MultipartError> for JsonApiError {
    fn from(e: MultipartError) -> Self {
        // Oversized bodies keep their 413.
        let status = e.status();
        let title = if status == StatusCode::PAYLOAD_TOO_LARGE { "Payload Too Large" } else { "Bad Request" };
        Self::new(status, title, Some(e.body_text()))
    }
}
