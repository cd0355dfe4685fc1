//! Certificate Handlers
//!
//! Create, update, delete, fetch and list certificates.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use certificate_core::{Certificate, CertificateMap};
use std::sync::Arc;
use tracing::{info, warn};

use super::{decode_body, AppState};
use crate::api::error::ApiError;

/// POST /certificates/{id}
///
/// The certificate is stored under the `id` in the body, not the path.
/// Returns every registered certificate.
pub async fn create_certificate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<CertificateMap>, ApiError> {
    let certificate = decode_certificate(&id, &body)?;
    let certificates = state.store.create_certificate(certificate).await?;
    Ok(Json(certificates))
}

/// PUT /certificates/{id}
///
/// Full replacement of an existing certificate. Returns every registered
/// certificate.
pub async fn update_certificate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<CertificateMap>, ApiError> {
    let certificate = decode_certificate(&id, &body)?;
    let certificates = state.store.update_certificate(certificate).await?;
    Ok(Json(certificates))
}

/// DELETE /certificates/{id}
///
/// Any request body is ignored. Returns the remaining certificates.
pub async fn delete_certificate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CertificateMap>, ApiError> {
    let certificates = state.store.delete_certificate(&id).await?;
    Ok(Json(certificates))
}

/// GET /certificates/{id}
pub async fn get_certificate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Certificate>, ApiError> {
    let certificate = state.store.get_certificate(&id).await?;
    Ok(Json(certificate))
}

/// GET /users/{id}/certificates
///
/// Certificates owned by the user; `{}` when the user owns none.
pub async fn list_certificates(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<CertificateMap>, ApiError> {
    let certificates = state.store.list_certificates(&user_id).await?;
    info!(user_id = %user_id, count = certificates.len(), "Listed certificates");
    Ok(Json(certificates))
}

fn decode_certificate(path_id: &str, body: &[u8]) -> Result<Certificate, ApiError> {
    let certificate: Certificate = decode_body(body)?;
    if certificate.id != path_id {
        warn!(
            path_id = %path_id,
            body_id = %certificate.id,
            "Path ID differs from body ID; using body ID"
        );
    }
    Ok(certificate)
}
