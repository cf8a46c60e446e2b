//! Error types for the SkillBridge client

use thiserror::Error;

/// Result type alias for SkillBridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

impl Error {
    /// The API error behind this error, if any.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// True when the server reported an expired credential.
    pub fn is_expiration(&self) -> bool {
        self.as_api().is_some_and(ApiError::is_expiration)
    }
}

/// API-related errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered 401. The local session has already been cleared.
    #[error("Authentication failed: {0}. Run `skillbridge login` to sign in again.")]
    Unauthorized(String),

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("JWT token expired or invalid")]
    InvalidToken,

    #[error("Not logged in. Run `skillbridge login` first.")]
    NotLoggedIn,

    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Build an error for a non-success status using the server-supplied message.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            400 | 422 => ApiError::BadRequest(message),
            500..=599 => ApiError::ServerError(message),
            _ => ApiError::Http { status, message },
        }
    }

    /// The message carried by this error, without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::ServerError(msg)
            | ApiError::Network(msg)
            | ApiError::InvalidResponse(msg) => msg.clone(),
            ApiError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// True when the message indicates an expired credential.
    pub fn is_expiration(&self) -> bool {
        self.message().to_lowercase().contains("expired")
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Local key-value storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Storage file is corrupt: {0}")]
    Corrupt(String),

    #[error("Failed to serialize stored value: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_unauthorized_message() {
        let err = ApiError::Unauthorized("Invalid token".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Invalid token"));
        assert!(msg.contains("skillbridge login"));
    }

    #[test]
    fn test_from_status_mapping() {
        assert_eq!(
            ApiError::from_status(401, "x".into()),
            ApiError::Unauthorized("x".into())
        );
        assert_eq!(
            ApiError::from_status(403, "x".into()),
            ApiError::Forbidden("x".into())
        );
        assert_eq!(
            ApiError::from_status(404, "x".into()),
            ApiError::NotFound("x".into())
        );
        assert_eq!(
            ApiError::from_status(422, "x".into()),
            ApiError::BadRequest("x".into())
        );
        assert_eq!(
            ApiError::from_status(503, "x".into()),
            ApiError::ServerError("x".into())
        );
        assert_eq!(
            ApiError::from_status(409, "x".into()),
            ApiError::Http {
                status: 409,
                message: "x".into()
            }
        );
    }

    #[test]
    fn test_message_strips_variant_prefix() {
        let err = ApiError::BadRequest("Already applied".to_string());
        assert_eq!(err.message(), "Already applied");
        assert!(err.to_string().starts_with("Bad request"));
    }

    #[test]
    fn test_expiration_detection() {
        assert!(ApiError::Unauthorized("Token has EXPIRED".into()).is_expiration());
        assert!(ApiError::BadRequest("token expired".into()).is_expiration());
        assert!(!ApiError::Unauthorized("Invalid token".into()).is_expiration());
        assert!(!ApiError::Cancelled.is_expiration());
    }

    #[test]
    fn test_error_is_expiration_passthrough() {
        let err: Error = ApiError::Unauthorized("expired".into()).into();
        assert!(err.is_expiration());

        let err = Error::Other("expired".into());
        assert!(!err.is_expiration());
    }

    #[test]
    fn test_api_error_network() {
        let err = ApiError::Network("Connection refused".to_string());
        assert!(err.to_string().contains("Connection refused"));
    }

    #[test]
    fn test_config_error_parse() {
        let err = ConfigError::ParseError("unexpected key".to_string());
        assert!(err.to_string().contains("unexpected key"));
    }

    #[test]
    fn test_storage_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StorageError = io.into();
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[test]
    fn test_error_from_api_error() {
        let err: Error = ApiError::NotLoggedIn.into();

        match err {
            Error::Api(ApiError::NotLoggedIn) => (),
            _ => panic!("Expected Error::Api(ApiError::NotLoggedIn)"),
        }
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
