use std::fmt::{self, Display};

use super::net_connection::OperationalStatus;

/// A central error enum for everything that can stop a sharing command.
#[derive(Debug)]
pub enum SharingError {
    /// The process is not running elevated.
    PrivilegeRequired,
    ConnectionNotFound(String),
    AmbiguousConnectionName {
        pattern: String,
        matches: Vec<String>,
    },
    /// The private side of a pair is not operationally up.
    ConnectionNotEnabled {
        name: String,
        status: OperationalStatus,
    },
    /// The same connection was requested for both roles.
    SameConnection(String),
    /// A call into the OS sharing component failed.
    UnderlyingServiceFailure {
        operation: String,
        connection: Option<String>,
        message: String,
    },
    /// The OS sharing component does not exist on this platform.
    Unsupported,
    ProfileNotFound(String),
    Storage(std::io::Error),
    Other(String),
}

impl SharingError {
    pub fn service_failure(operation: impl Into<String>, message: impl Into<String>) -> Self {
        SharingError::UnderlyingServiceFailure {
            operation: operation.into(),
            connection: None,
            message: message.into(),
        }
    }

    /// Attach the connection name to a service failure that lacks one.
    pub fn on_connection(self, name: &str) -> Self {
        match self {
            SharingError::UnderlyingServiceFailure {
                operation,
                connection: None,
                message,
            } => SharingError::UnderlyingServiceFailure {
                operation,
                connection: Some(name.to_string()),
                message,
            },
            other => other,
        }
    }
}

/// Convert from std::io::Error.
impl From<std::io::Error> for SharingError {
    fn from(err: std::io::Error) -> SharingError {
        SharingError::Storage(err)
    }
}

/// Convert from serde_json::Error.
/// Malformed settings or profile files surface as storage errors.
impl From<serde_json::Error> for SharingError {
    fn from(err: serde_json::Error) -> Self {
        SharingError::Storage(err.into())
    }
}

impl Display for SharingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SharingError::PrivilegeRequired => write!(
                f,
                "Administrator privileges are required, run this command from an elevated prompt"
            ),
            SharingError::ConnectionNotFound(name) => {
                write!(f, "No network connection named '{}' was found", name)
            }
            SharingError::AmbiguousConnectionName { pattern, matches } => write!(
                f,
                "'{}' matches more than one connection: {}",
                pattern,
                matches.join(", ")
            ),
            SharingError::ConnectionNotEnabled { name, status } => write!(
                f,
                "Connection '{}' is {}, sharing can only be enabled on a connection that is up",
                name, status
            ),
            SharingError::SameConnection(name) => write!(
                f,
                "Connection '{}' cannot be both the public and the private connection",
                name
            ),
            SharingError::UnderlyingServiceFailure {
                operation,
                connection: Some(name),
                message,
            } => write!(f, "{} failed for '{}': {}", operation, name, message),
            SharingError::UnderlyingServiceFailure {
                operation,
                connection: None,
                message,
            } => write!(f, "{} failed: {}", operation, message),
            SharingError::Unsupported => write!(
                f,
                "Internet Connection Sharing is only available on Windows"
            ),
            SharingError::ProfileNotFound(name) => write!(f, "No profile named '{}'", name),
            SharingError::Storage(e) => write!(f, "Storage error: {}", e),
            SharingError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SharingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SharingError::Storage(e) => Some(e),
            _ => None,
        }
    }
}
