//! Error types for veil-core.

/// Errors that can occur while authorizing and presenting objects.
///
/// Denials are not errors: an object the caller may not read is dropped
/// from find results, and a targeted get reports [`Error::NotFound`] so
/// that the caller cannot tell a hidden object from a missing one.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The presented session token does not resolve to a user.
    #[error("Invalid session token")]
    InvalidSession,

    /// A role lookup failed while computing a principal's role closure.
    #[error("Role resolution failed: {message}")]
    RoleResolution {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Object is absent, or present but not readable by the caller.
    #[error("Object not found: {class}/{id}")]
    NotFound {
        /// Class of the requested object
        class: String,
        /// Requested object ID
        id: String,
    },

    /// A storage collaborator failed.
    #[error("Storage error: {message}")]
    Storage {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error (reading configuration files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience `Result` type alias for Veil operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error was caused by the request itself.
    ///
    /// Client errors map to 4xx responses; everything else is a server
    /// failure and must not be reported as a denial.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::InvalidSession => true,
            Error::NotFound { .. } => true,
            Error::RoleResolution { .. } => false,
            Error::Storage { .. } => false,
            Error::Config { .. } => false,
            Error::Io(_) => false,
            Error::Serialization(_) => false,
            Error::Toml(_) => false,
        }
    }

    /// Creates a not-found error for a class and object ID.
    pub fn not_found(class: impl Into<String>, id: impl Into<String>) -> Self {
        Error::NotFound {
            class: class.into(),
            id: id.into(),
        }
    }

    /// Creates a role resolution error with a message.
    pub fn role_resolution<S: Into<String>>(message: S) -> Self {
        Error::RoleResolution {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a role resolution error with a message and source error.
    pub fn role_resolution_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::RoleResolution {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a storage error with a message.
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Error::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a storage error with a message and source error.
    pub fn storage_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::InvalidSession.to_string(), "Invalid session token");
        assert_eq!(
            Error::not_found("_User", "abc").to_string(),
            "Object not found: _User/abc"
        );
        assert_eq!(
            Error::role_resolution("store offline").to_string(),
            "Role resolution failed: store offline"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(Error::InvalidSession.is_client_error());
        assert!(Error::not_found("_User", "x").is_client_error());
        assert!(!Error::role_resolution("x").is_client_error());
        assert!(!Error::storage("x").is_client_error());
        assert!(!Error::config("x").is_client_error());
    }

    #[test]
    fn test_role_resolution_keeps_source() {
        let io_error = std::io::Error::other("connection reset");
        let err = Error::role_resolution_with_source("roles containing 'Administrator'", io_error);
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "connection reset");
    }

    #[test]
    fn test_storage_with_source() {
        let err = Error::storage_with_source("read failed", std::io::Error::other("disk"));
        assert!(err.to_string().contains("read failed"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Table>("= nope").unwrap_err();
        let err: Error = toml_err.into();
        assert!(err.to_string().starts_with("TOML error"));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_error_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
