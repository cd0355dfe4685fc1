//! In-memory storage backend
//!
//! A single mutex guards the whole [`Registry`], so each operation's
//! existence checks and its write happen as one step. Data is lost on
//! restart.

use async_trait::async_trait;
use certificate_core::{Certificate, CertificateMap, Registry, TransferRequest, User};
use tokio::sync::Mutex;

use super::{CertificateStore, StorageError, StoreCounts};

/// In-memory certificate store
#[derive(Debug, Default)]
pub struct MemoryStore {
    registry: Mutex<Registry>,
}

impl MemoryStore {
    /// Create an empty store with no users
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty certificate store with the given users registered
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            registry: Mutex::new(Registry::with_users(users)),
        }
    }
}

#[async_trait]
impl CertificateStore for MemoryStore {
    async fn create_certificate(&self, certificate: Certificate) -> Result<CertificateMap, StorageError> {
        let mut registry = self.registry.lock().await;
        Ok(registry.create(certificate)?.clone())
    }

    async fn update_certificate(&self, certificate: Certificate) -> Result<CertificateMap, StorageError> {
        let mut registry = self.registry.lock().await;
        Ok(registry.update(certificate)?.clone())
    }

    async fn delete_certificate(&self, id: &str) -> Result<CertificateMap, StorageError> {
        let mut registry = self.registry.lock().await;
        Ok(registry.delete(id)?.clone())
    }

    async fn get_certificate(&self, id: &str) -> Result<Certificate, StorageError> {
        let registry = self.registry.lock().await;
        Ok(registry.get(id)?.clone())
    }

    async fn list_certificates(&self, user_id: &str) -> Result<CertificateMap, StorageError> {
        let registry = self.registry.lock().await;
        Ok(registry.list_for_user(user_id)?)
    }

    async fn request_transfer(&self, id: &str, body: &[u8]) -> Result<Certificate, StorageError> {
        let mut registry = self.registry.lock().await;
        let certificate = registry.request_transfer_with(id, || TransferRequest::from_json(body))?;
        Ok(certificate.clone())
    }

    async fn accept_transfer(&self, id: &str) -> Result<Certificate, StorageError> {
        let mut registry = self.registry.lock().await;
        Ok(registry.accept_transfer(id)?.clone())
    }

    async fn counts(&self) -> Result<StoreCounts, StorageError> {
        let registry = self.registry.lock().await;
        Ok(StoreCounts {
            certificates: registry.certificates().len(),
            users: registry.users().len(),
        })
    }
}
