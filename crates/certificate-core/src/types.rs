//! Certificate, transfer and user records

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire value of the `status` field while a transfer is pending
pub const STATUS_REQUESTED: &str = "Requested";

/// A certificate record, keyed by `id` in the registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certificate {
    pub id: String,
    pub title: String,
    pub created_at: String,
    /// Must name a registered user when the certificate is created or updated
    pub owner_id: String,
    pub year: i64,
    pub note: String,
    pub transfer: Transfer,
}

impl Certificate {
    /// Create an untitled certificate owned by `owner_id`
    pub fn new(id: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }

    pub fn with_year(mut self, year: i64) -> Self {
        self.year = year;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Whether `user_id` currently owns this certificate
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}

/// Ownership transfer state embedded in a certificate
///
/// On the wire this is always `{"to": ..., "status": ...}`: the idle state
/// is two empty strings, a pending transfer carries the recipient's email
/// and the status `"Requested"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransferRecord", into = "TransferRecord")]
pub enum Transfer {
    /// No transfer in progress
    #[default]
    Idle,
    /// Waiting for the recipient to accept
    Requested {
        /// Recipient's email address
        to: String,
    },
}

impl Transfer {
    /// Start a transfer to the user with email `to`
    pub fn requested(to: impl Into<String>) -> Self {
        Transfer::Requested { to: to.into() }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Transfer::Idle)
    }

    /// Recipient email, or `""` when idle
    pub fn to(&self) -> &str {
        match self {
            Transfer::Idle => "",
            Transfer::Requested { to } => to,
        }
    }

    /// Wire status, `""` when idle
    pub fn status(&self) -> &str {
        match self {
            Transfer::Idle => "",
            Transfer::Requested { .. } => STATUS_REQUESTED,
        }
    }
}

/// Error returned when a `{to, status}` pair names no valid transfer state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidTransfer {
    #[error("unknown transfer status '{0}'")]
    UnknownStatus(String),

    #[error("transfer to '{0}' has no status")]
    MissingStatus(String),

    #[error("requested transfer has no recipient")]
    MissingRecipient,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct TransferRecord {
    to: String,
    status: String,
}

impl TryFrom<TransferRecord> for Transfer {
    type Error = InvalidTransfer;

    fn try_from(record: TransferRecord) -> Result<Self, Self::Error> {
        match (record.status.as_str(), record.to.is_empty()) {
            ("", true) => Ok(Transfer::Idle),
            ("", false) => Err(InvalidTransfer::MissingStatus(record.to)),
            (STATUS_REQUESTED, false) => Ok(Transfer::Requested { to: record.to }),
            (STATUS_REQUESTED, true) => Err(InvalidTransfer::MissingRecipient),
            (other, _) => Err(InvalidTransfer::UnknownStatus(other.to_string())),
        }
    }
}

impl From<Transfer> for TransferRecord {
    fn from(transfer: Transfer) -> Self {
        match transfer {
            Transfer::Idle => TransferRecord::default(),
            Transfer::Requested { to } => TransferRecord {
                to,
                status: STATUS_REQUESTED.to_string(),
            },
        }
    }
}

/// Body of a transfer request
///
/// The client-supplied `status` is accepted for compatibility and ignored;
/// a stored request always has status `"Requested"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferRequest {
    /// Recipient's email address
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl TransferRequest {
    pub fn to(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            status: None,
        }
    }

    /// Decode a JSON request body
    pub fn from_json(body: &[u8]) -> crate::Result<Self> {
        serde_json::from_slice(body).map_err(|err| crate::CertificateError::InvalidBody {
            reason: err.to_string(),
        })
    }
}

/// A registered user
///
/// Users are seeded at startup and never modified by registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_certificate_wire_shape() {
        let cert = Certificate::new("1", "10")
            .with_title("first cert")
            .with_created_at("29 MAR 2019")
            .with_year(2019)
            .with_note("This is the first certificate");

        let value = serde_json::to_value(&cert).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "1",
                "title": "first cert",
                "createdAt": "29 MAR 2019",
                "ownerId": "10",
                "year": 2019,
                "note": "This is the first certificate",
                "transfer": {"to": "", "status": ""}
            })
        );
    }

    #[test]
    fn test_requested_transfer_serializes_status() {
        let value = serde_json::to_value(Transfer::requested("test12@test.com")).unwrap();
        assert_eq!(value, json!({"to": "test12@test.com", "status": "Requested"}));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let cert: Certificate = serde_json::from_str(r#"{"id":"7","ownerId":"10"}"#).unwrap();
        assert_eq!(cert.id, "7");
        assert_eq!(cert.year, 0);
        assert!(cert.transfer.is_idle());
    }

    #[test]
    fn test_transfer_decoding() {
        let idle: Transfer = serde_json::from_str(r#"{"to":"","status":""}"#).unwrap();
        assert_eq!(idle, Transfer::Idle);

        let pending: Transfer =
            serde_json::from_str(r#"{"to":"a@test.com","status":"Requested"}"#).unwrap();
        assert_eq!(pending.to(), "a@test.com");
        assert_eq!(pending.status(), STATUS_REQUESTED);
    }

    #[test]
    fn test_transfer_rejects_inconsistent_pairs() {
        assert!(serde_json::from_str::<Transfer>(r#"{"to":"a@test.com","status":""}"#).is_err());
        assert!(serde_json::from_str::<Transfer>(r#"{"to":"","status":"Requested"}"#).is_err());
        assert!(serde_json::from_str::<Transfer>(r#"{"to":"a@test.com","status":"Done"}"#).is_err());
    }

    #[test]
    fn test_transfer_request_from_json() {
        let request = TransferRequest::from_json(br#"{"to":"a@test.com","status":"Requested"}"#)
            .unwrap();
        assert_eq!(request.to, "a@test.com");

        let err = TransferRequest::from_json(b"").unwrap_err();
        assert!(err.to_string().starts_with("Invalid request body: "));
    }

    #[test]
    fn test_transfer_request_ignores_missing_status() {
        let request: TransferRequest = serde_json::from_str(r#"{"to":"a@test.com"}"#).unwrap();
        assert_eq!(request, TransferRequest::to("a@test.com"));
    }
}
