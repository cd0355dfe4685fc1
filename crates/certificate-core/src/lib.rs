//! # Certificate Core
//!
//! Domain types and the in-memory registry for a small certificate
//! ownership service.
//!
//! ## Key Concepts
//!
//! - **Certificate**: the managed record, owned by exactly one user
//! - **Transfer**: a pending ownership change embedded in a certificate
//! - **Registry**: the keyed stores of certificates and users
//!
//! ## Transfer Workflow
//!
//! A transfer is requested to a recipient's email address and later
//! accepted, at which point ownership moves to the recipient. Only one
//! transfer can be pending per certificate.

pub mod error;
pub mod registry;
pub mod types;

pub use error::{Action, CertificateError, Result};
pub use registry::{CertificateMap, Registry, UserMap};
pub use types::{Certificate, InvalidTransfer, Transfer, TransferRequest, User, STATUS_REQUESTED};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
