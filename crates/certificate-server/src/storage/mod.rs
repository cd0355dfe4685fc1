//! Storage abstraction for the certificate service
//!
//! Handlers only see the [`CertificateStore`] trait. The in-memory backend
//! is the only one shipped; state is lost on restart.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use certificate_core::{Certificate, CertificateError, CertificateMap};
use serde::Serialize;
use std::fmt::Debug;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The registry refused the operation; the message is caller-facing
    #[error(transparent)]
    Rejected(#[from] CertificateError),
}

/// Registry sizes, reported by the readiness endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    pub certificates: usize,
    pub users: usize,
}

/// Storage backend trait for certificates and users
///
/// Each method is one complete operation. Implementations must make the
/// checks and the write of an operation atomic with respect to every
/// other call.
#[async_trait]
pub trait CertificateStore: Send + Sync + Debug {
    // =========================================================================
    // Certificates
    // =========================================================================

    /// Insert a new certificate and return the whole registry
    async fn create_certificate(&self, certificate: Certificate) -> Result<CertificateMap, StorageError>;

    /// Replace an existing certificate and return the whole registry
    async fn update_certificate(&self, certificate: Certificate) -> Result<CertificateMap, StorageError>;

    /// Remove a certificate and return the remaining registry
    async fn delete_certificate(&self, id: &str) -> Result<CertificateMap, StorageError>;

    async fn get_certificate(&self, id: &str) -> Result<Certificate, StorageError>;

    /// Certificates owned by a registered user
    async fn list_certificates(&self, user_id: &str) -> Result<CertificateMap, StorageError>;

    // =========================================================================
    // Transfers
    // =========================================================================

    /// Mark a certificate as being transferred, returning the updated certificate
    ///
    /// `body` is the JSON transfer request. It is decoded only after the
    /// certificate is known to exist with no pending transfer.
    async fn request_transfer(&self, id: &str, body: &[u8]) -> Result<Certificate, StorageError>;

    /// Move ownership to the pending recipient
    async fn accept_transfer(&self, id: &str) -> Result<Certificate, StorageError>;

    async fn counts(&self) -> Result<StoreCounts, StorageError>;
}
