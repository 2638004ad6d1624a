//! Custom extractors for the HTTP server.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ErrorResponse;

/// Message for any body that carries no usable data
pub const NO_DATA_MESSAGE: &str = "No data provided";

/// Message for bodies over the configured size limit
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Payload too large";

/// Rejection type for `JsonBody`
pub struct JsonBodyRejection {
    status: StatusCode,
    detail: String,
}

impl From<JsonRejection> for JsonBodyRejection {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        debug!(status = %self.status, detail = %self.detail, "Rejected request body");
        let message = if self.status == StatusCode::PAYLOAD_TOO_LARGE {
            PAYLOAD_TOO_LARGE_MESSAGE
        } else {
            NO_DATA_MESSAGE
        };
        let body = ErrorResponse {
            error: message.to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}

/// Extractor for JSON request bodies.
///
/// Like `axum::Json`, but a missing, mistyped or unparsable body is always
/// answered with `400 {"error": "No data provided"}`. Oversized bodies keep
/// their `413`.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| JsonBody(value))
            .map_err(JsonBodyRejection::from)
    }
}
