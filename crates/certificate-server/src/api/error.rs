//! API error types and responses
//!
//! Every error is answered with a plain-text body terminated by a newline.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use certificate_core::CertificateError;
use thiserror::Error;

use crate::storage::StorageError;

/// API error type
#[derive(Error, Debug)]
pub enum ApiError {
    /// A registry precondition failed
    #[error("{0}")]
    Rejected(CertificateError),

    /// The request body could not be decoded
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Every failure is a rejected precondition
        (StatusCode::BAD_REQUEST, format!("{}\n", self)).into_response()
    }
}

impl From<CertificateError> for ApiError {
    fn from(err: CertificateError) -> Self {
        ApiError::Rejected(err)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Rejected(err) => ApiError::Rejected(err),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidBody(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_rejection_is_plain_text_400() {
        let err: ApiError = CertificateError::NoActiveTransfer { id: "2".into() }.into();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            body_text(response).await,
            "No transfer has been requested for certificate 2.\n"
        );
    }

    #[tokio::test]
    async fn test_decode_failure_is_reported() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.starts_with("Invalid request body: "));
    }
}
