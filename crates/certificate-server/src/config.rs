//! Server configuration from environment variables

use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use certificate_core::User;
use thiserror::Error;
use tracing::Level;

pub const PORT_VAR: &str = "CERTIFICATE_SERVER_PORT";
pub const LOG_LEVEL_VAR: &str = "CERTIFICATE_SERVER_LOG_LEVEL";
pub const USERS_FILE_VAR: &str = "CERTIFICATE_SERVER_USERS_FILE";

const DEFAULT_PORT: u16 = 8080;

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("CERTIFICATE_SERVER_PORT must be a valid port number, got '{value}'")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Failed to read users file {}", path.display())]
    UsersFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Users file {} is not a JSON array of users", path.display())]
    UsersFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Certificate server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub log_level: Level,
    /// JSON file with the users registered at startup
    pub users_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            log_level: Level::INFO,
            users_file: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup(PORT_VAR) {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };

        // Unparseable levels fall back to info rather than refusing to start
        let log_level = lookup(LOG_LEVEL_VAR)
            .and_then(|value| value.parse().ok())
            .unwrap_or(Level::INFO);

        let users_file = lookup(USERS_FILE_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            port,
            log_level,
            users_file,
        })
    }

    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Users to seed at startup; none when no users file is configured
    pub fn load_users(&self) -> Result<Vec<User>, ConfigError> {
        match &self.users_file {
            Some(path) => load_users_file(path),
            None => Ok(Vec::new()),
        }
    }
}

/// Read a JSON array of `{id, email, name}` users
pub fn load_users_file(path: &Path) -> Result<Vec<User>, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::UsersFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::UsersFormat {
        path: path.to_path_buf(),
        source,
    })
}
