//! In-memory certificate and user registries
//!
//! The [`Registry`] owns both keyed stores and implements every operation on
//! them, including the two-step transfer workflow:
//!
//! ```text
//! Idle --request_transfer(to)--> Requested{to} --accept_transfer--> Idle
//! ```
//!
//! A second request while `Requested` and an accept while `Idle` are
//! rejected without a transition. Every check runs before anything is
//! written, so a rejected operation never mutates the registry.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::error::{Action, CertificateError, Result};
use crate::types::{Certificate, Transfer, TransferRequest, User};

/// Certificates keyed by certificate ID
pub type CertificateMap = BTreeMap<String, Certificate>;

/// Users keyed by user ID
pub type UserMap = BTreeMap<String, User>;

/// The certificate registry together with the user registry it validates against
#[derive(Debug, Clone, Default)]
pub struct Registry {
    certificates: CertificateMap,
    users: UserMap,
}

impl Registry {
    /// Create an empty registry with no users
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty certificate registry seeded with `users`
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let mut registry = Self::new();
        for user in users {
            registry.seed_user(user);
        }
        registry
    }

    /// Add a user, replacing any user with the same ID
    pub fn seed_user(&mut self, user: User) -> Option<User> {
        info!(user_id = %user.id, email = %user.email, "Seeding user");
        self.users.insert(user.id.clone(), user)
    }

    pub fn certificates(&self) -> &CertificateMap {
        &self.certificates
    }

    pub fn users(&self) -> &UserMap {
        &self.users
    }

    /// Insert a new certificate under its payload `id`
    ///
    /// Returns the whole certificate registry after the insert.
    pub fn create(&mut self, certificate: Certificate) -> Result<&CertificateMap> {
        if self.certificates.contains_key(&certificate.id) {
            warn!(id = %certificate.id, "Rejected create: duplicate certificate ID");
            return Err(CertificateError::DuplicateId { id: certificate.id });
        }
        self.check_owner(&certificate, Action::CreateCertificate)?;

        info!(id = %certificate.id, owner_id = %certificate.owner_id, "Created certificate");
        self.certificates.insert(certificate.id.clone(), certificate);
        Ok(&self.certificates)
    }

    /// Replace an existing certificate entirely
    ///
    /// Never inserts: an unknown `id` is rejected.
    pub fn update(&mut self, certificate: Certificate) -> Result<&CertificateMap> {
        if !self.certificates.contains_key(&certificate.id) {
            warn!(id = %certificate.id, "Rejected update: unknown certificate ID");
            return Err(CertificateError::unknown_id(
                certificate.id,
                Action::UpdateCertificate,
            ));
        }
        self.check_owner(&certificate, Action::UpdateCertificate)?;

        info!(id = %certificate.id, owner_id = %certificate.owner_id, "Updated certificate");
        self.certificates.insert(certificate.id.clone(), certificate);
        Ok(&self.certificates)
    }

    /// Remove a certificate, returning the remaining registry
    pub fn delete(&mut self, id: &str) -> Result<&CertificateMap> {
        if self.certificates.remove(id).is_none() {
            warn!(id = %id, "Rejected delete: unknown certificate ID");
            return Err(CertificateError::unknown_id(id, Action::DeleteCertificate));
        }

        info!(id = %id, "Deleted certificate");
        Ok(&self.certificates)
    }

    pub fn get(&self, id: &str) -> Result<&Certificate> {
        self.certificates
            .get(id)
            .ok_or_else(|| CertificateError::unknown_id(id, Action::GetCertificate))
    }

    /// Certificates currently owned by `user_id`
    ///
    /// An existing user with no certificates yields an empty map.
    pub fn list_for_user(&self, user_id: &str) -> Result<CertificateMap> {
        if !self.users.contains_key(user_id) {
            warn!(user_id = %user_id, "Rejected list: unknown user");
            return Err(CertificateError::UnknownUser {
                user_id: user_id.to_string(),
            });
        }

        Ok(self
            .certificates
            .iter()
            .filter(|(_, cert)| cert.is_owned_by(user_id))
            .map(|(id, cert)| (id.clone(), cert.clone()))
            .collect())
    }

    /// Start transferring a certificate to the user whose email is `request.to`
    ///
    /// Returns the updated certificate.
    pub fn request_transfer(&mut self, id: &str, request: TransferRequest) -> Result<&Certificate> {
        self.request_transfer_with(id, || Ok(request))
    }

    /// Like [`Registry::request_transfer`], decoding the request lazily
    ///
    /// `decode` runs only once the certificate exists and has no pending
    /// transfer, so those rejections take precedence over a bad body.
    pub fn request_transfer_with(
        &mut self,
        id: &str,
        decode: impl FnOnce() -> Result<TransferRequest>,
    ) -> Result<&Certificate> {
        let users = &self.users;
        let certificate = self
            .certificates
            .get_mut(id)
            .ok_or_else(|| CertificateError::unknown_id(id, Action::RequestTransfer))?;

        if let Transfer::Requested { to } = &certificate.transfer {
            warn!(id = %id, to = %to, "Rejected transfer: already in progress");
            return Err(CertificateError::TransferInProgress {
                id: id.to_string(),
                to: to.clone(),
            });
        }

        let request = decode()?;

        // An empty recipient cannot be stored as a pending transfer
        if request.to.is_empty() || find_by_email(users, &request.to).is_none() {
            warn!(id = %id, to = %request.to, "Rejected transfer: unknown recipient");
            return Err(CertificateError::InvalidTarget { to: request.to });
        }

        info!(id = %id, to = %request.to, "Transfer requested");
        certificate.transfer = Transfer::requested(request.to);
        Ok(&*certificate)
    }

    /// Complete a pending transfer
    ///
    /// Ownership moves to the recipient and the transfer returns to idle.
    /// If the recipient is no longer registered the transfer stays pending
    /// and the call fails with [`CertificateError::InvalidTarget`].
    pub fn accept_transfer(&mut self, id: &str) -> Result<&Certificate> {
        let users = &self.users;
        let certificate = self
            .certificates
            .get_mut(id)
            .ok_or_else(|| CertificateError::unknown_id(id, Action::AcceptTransfer))?;

        let Transfer::Requested { to } = &certificate.transfer else {
            warn!(id = %id, "Rejected accept: no transfer requested");
            return Err(CertificateError::NoActiveTransfer { id: id.to_string() });
        };

        let Some(recipient) = find_by_email(users, to) else {
            warn!(id = %id, to = %to, "Rejected accept: recipient no longer registered");
            return Err(CertificateError::InvalidTarget { to: to.clone() });
        };

        info!(
            id = %id,
            from = %certificate.owner_id,
            to = %recipient.id,
            "Transfer accepted"
        );
        certificate.owner_id = recipient.id.clone();
        certificate.transfer = Transfer::Idle;
        Ok(&*certificate)
    }

    fn check_owner(&self, certificate: &Certificate, action: Action) -> Result<()> {
        if self.users.contains_key(&certificate.owner_id) {
            return Ok(());
        }
        warn!(
            id = %certificate.id,
            owner_id = %certificate.owner_id,
            %action,
            "Rejected certificate: unknown owner"
        );
        Err(CertificateError::invalid_owner(
            certificate.owner_id.clone(),
            action,
        ))
    }
}

fn find_by_email<'a>(users: &'a UserMap, email: &str) -> Option<&'a User> {
    users.values().find(|user| user.email == email)
}
