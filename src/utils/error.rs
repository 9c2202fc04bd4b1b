use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid cart data: {message}")]
    InvalidCartError { message: String },

    #[error("Lookup failed: {message}")]
    LookupError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CartError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CartError::ApiError(_) | CartError::LookupError { .. } => ErrorSeverity::Medium,
            CartError::ConfigError { .. }
            | CartError::ConfigValidationError { .. }
            | CartError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            CartError::SerializationError(_) | CartError::InvalidCartError { .. } => {
                ErrorSeverity::High
            }
            CartError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::ApiError(e) if e.is_timeout() => {
                "The store API did not answer in time".to_string()
            }
            CartError::ApiError(_) | CartError::LookupError { .. } => {
                "Could not reach the store API".to_string()
            }
            CartError::IoError(e) => format!("Could not access the cart storage: {}", e),
            CartError::SerializationError(_) | CartError::InvalidCartError { .. } => {
                "The saved cart is corrupted and could not be loaded".to_string()
            }
            CartError::ConfigError { message } => format!("Configuration problem: {}", message),
            CartError::ConfigValidationError { field, .. }
            | CartError::InvalidConfigValueError { field, .. } => {
                format!("Configuration value '{}' is invalid", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.severity() {
            ErrorSeverity::Medium => "Check that the store API is running and try again",
            ErrorSeverity::High => match self {
                CartError::SerializationError(_) | CartError::InvalidCartError { .. } => {
                    "Delete the stored cart file to start with an empty cart"
                }
                _ => "Fix the configuration file or command line flags",
            },
            ErrorSeverity::Critical => "Check permissions and free space of the storage path",
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;
