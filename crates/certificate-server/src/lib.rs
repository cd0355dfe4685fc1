//! Certificate Server
//!
//! HTTP service that manages certificate records and a two-step ownership
//! transfer between users. All state is held in memory.
//!
//! ## API Endpoints
//!
//! ### Service Endpoints
//! - `GET /health` - Liveness check
//! - `GET /ready` - Readiness check with registry sizes
//!
//! ### Certificate Endpoints
//! - `POST /certificates/{id}` - Create a certificate
//! - `PUT /certificates/{id}` - Replace a certificate
//! - `DELETE /certificates/{id}` - Delete a certificate
//! - `GET /certificates/{id}` - Fetch a certificate
//! - `GET /users/{id}/certificates` - List a user's certificates
//!
//! ### Transfer Endpoints
//! - `POST /certificates/{id}/transfers` - Request a transfer to another user
//! - `PUT /certificates/{id}/transfers` - Accept the pending transfer
//!
//! Rejected requests answer 400 with a plain-text message.

pub mod api;
pub mod config;
pub mod storage;

pub use api::create_router;
pub use api::handlers::AppState;
pub use config::{ConfigError, ServerConfig};
pub use storage::{CertificateStore, MemoryStore, StorageError, StoreCounts};
