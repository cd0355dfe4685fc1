//! Transfer Handlers
//!
//! Two-step ownership transfer: the owner requests a transfer to a
//! recipient's email, then the transfer is accepted.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use certificate_core::Certificate;
use std::sync::Arc;

use super::AppState;
use crate::api::error::ApiError;

/// POST /certificates/{id}/transfers
///
/// Body: `{"to": "<recipient email>", "status": "Requested"}`. The body is
/// decoded after the certificate checks, so a missing certificate or a
/// pending transfer is reported even when the body is malformed. Returns
/// the updated certificate.
pub async fn request_transfer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Certificate>, ApiError> {
    let certificate = state.store.request_transfer(&id, &body).await?;
    Ok(Json(certificate))
}

/// PUT /certificates/{id}/transfers
///
/// Accepts the pending transfer. Responds 200 with an empty body; the new
/// owner is visible through the list endpoint.
pub async fn accept_transfer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.accept_transfer(&id).await?;
    Ok(StatusCode::OK)
}
