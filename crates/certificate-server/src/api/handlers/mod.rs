//! API request handlers

pub mod certificates;
pub mod transfers;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;
use crate::storage::CertificateStore;

pub use certificates::{
    create_certificate, delete_certificate, get_certificate, list_certificates, update_certificate,
};
pub use transfers::{accept_transfer, request_transfer};

/// Application state shared across handlers
#[derive(Debug)]
pub struct AppState {
    /// Certificate and user storage
    pub store: Arc<dyn CertificateStore>,
    /// When this server instance started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: Arc<dyn CertificateStore>) -> Self {
        Self {
            store,
            started_at: Utc::now(),
        }
    }
}

/// Decode a JSON request body, reporting malformed input as a 400
pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    Ok(serde_json::from_slice(body)?)
}
