//! Error types for certificate registry operations
//!
//! Every variant is a rejected precondition. The `Display` output is the
//! exact message reported to callers.

use std::fmt;

use thiserror::Error;

/// Result type alias using CertificateError
pub type Result<T> = std::result::Result<T, CertificateError>;

/// The operation a rejection was raised from, as it reads in messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateCertificate,
    UpdateCertificate,
    DeleteCertificate,
    GetCertificate,
    ListCertificates,
    RequestTransfer,
    AcceptTransfer,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Action::CreateCertificate => "create certificate",
            Action::UpdateCertificate => "update certificate",
            Action::DeleteCertificate => "delete certificate",
            Action::GetCertificate => "get certificate",
            Action::ListCertificates => "list certificates",
            Action::RequestTransfer => "request transfer",
            Action::AcceptTransfer => "accept transfer",
        };
        f.write_str(text)
    }
}

/// Errors that can occur when operating on the registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CertificateError {
    /// A certificate with this ID is already registered
    #[error("Certificate ID {id} already exists. Cannot create certificate.")]
    DuplicateId { id: String },

    /// No certificate is registered under this ID
    #[error("Certificate ID {id} doesn't exist. Cannot {action}.")]
    UnknownId { id: String, action: Action },

    /// The certificate payload names an owner that is not a known user
    #[error("User ID {owner_id} is invalid. Cannot {action}.")]
    InvalidOwner { owner_id: String, action: Action },

    /// Listing was requested for a user that is not registered
    #[error("User ID {user_id} is invalid. Cannot list certificates.")]
    UnknownUser { user_id: String },

    /// The certificate already has a pending transfer
    #[error("Certificate {id} is already being transferred to {to}.")]
    TransferInProgress { id: String, to: String },

    /// No registered user has this email address
    #[error("Target {to} isn't valid.")]
    InvalidTarget { to: String },

    /// Accept was called on a certificate without a pending transfer
    #[error("No transfer has been requested for certificate {id}.")]
    NoActiveTransfer { id: String },

    /// A transfer request body could not be decoded
    #[error("Invalid request body: {reason}")]
    InvalidBody { reason: String },
}

impl CertificateError {
    pub(crate) fn unknown_id(id: impl Into<String>, action: Action) -> Self {
        CertificateError::UnknownId {
            id: id.into(),
            action,
        }
    }

    pub(crate) fn invalid_owner(owner_id: impl Into<String>, action: Action) -> Self {
        CertificateError::InvalidOwner {
            owner_id: owner_id.into(),
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_wire_text() {
        assert_eq!(
            CertificateError::DuplicateId { id: "1".into() }.to_string(),
            "Certificate ID 1 already exists. Cannot create certificate."
        );
        assert_eq!(
            CertificateError::unknown_id("11", Action::UpdateCertificate).to_string(),
            "Certificate ID 11 doesn't exist. Cannot update certificate."
        );
        assert_eq!(
            CertificateError::unknown_id("4", Action::AcceptTransfer).to_string(),
            "Certificate ID 4 doesn't exist. Cannot accept transfer."
        );
        assert_eq!(
            CertificateError::invalid_owner("100", Action::CreateCertificate).to_string(),
            "User ID 100 is invalid. Cannot create certificate."
        );
        assert_eq!(
            CertificateError::UnknownUser { user_id: "100".into() }.to_string(),
            "User ID 100 is invalid. Cannot list certificates."
        );
        assert_eq!(
            CertificateError::TransferInProgress {
                id: "1".into(),
                to: "test12@test.com".into()
            }
            .to_string(),
            "Certificate 1 is already being transferred to test12@test.com."
        );
        assert_eq!(
            CertificateError::InvalidTarget { to: "x@test.com".into() }.to_string(),
            "Target x@test.com isn't valid."
        );
        assert_eq!(
            CertificateError::NoActiveTransfer { id: "2".into() }.to_string(),
            "No transfer has been requested for certificate 2."
        );
        assert_eq!(
            CertificateError::InvalidBody {
                reason: "EOF while parsing a value at line 1 column 0".into()
            }
            .to_string(),
            "Invalid request body: EOF while parsing a value at line 1 column 0"
        );
    }
}
