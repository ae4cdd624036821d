//! Error types for the Contractor application.

use thiserror::Error;

/// A shared error type for the entire Contractor application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone)]
pub enum ContractorError {
    /// Template required for generation is missing from the template store
    #[error("Шаблон {template_id} не найден")]
    TemplateNotFound { template_id: String },

    /// Contract type tag that no catalog knows about
    #[error("Неизвестный тип договора: {0}")]
    UnknownContractType(String),

    /// Event does not fit the current form state
    #[error("Invalid form state: {0}")]
    State(String),

    /// Caller lacks the admin flag
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ContractorError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a TemplateNotFound error
    pub fn template_not_found(template_id: impl Into<String>) -> Self {
        Self::TemplateNotFound {
            template_id: template_id.into(),
        }
    }

    /// Creates a State error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Serialization error
    pub fn serialization(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a missing template error
    pub fn is_template_not_found(&self) -> bool {
        matches!(self, Self::TemplateNotFound { .. })
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a data access error
    pub fn is_data_access(&self) -> bool {
        matches!(self, Self::DataAccess(_))
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a permission error
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ContractorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<toml::de::Error> for ContractorError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ContractorError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ContractorError>`.
pub type Result<T> = std::result::Result<T, ContractorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ContractorError = io.into();
        assert!(err.is_io());
        assert!(err.to_string().contains("NotFound"));
    }

    #[test]
    fn test_template_not_found_message_names_template() {
        let err = ContractorError::template_not_found("agent_template");
        assert!(err.is_template_not_found());
        assert!(err.to_string().contains("agent_template"));
    }

    #[test]
    fn test_toml_error_is_serialization() {
        let parse = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: ContractorError = parse.into();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_serialization_helper_names_format() {
        let err = ContractorError::serialization("JSON", "unexpected end of input");
        assert!(err.is_serialization());
        assert_eq!(
            err.to_string(),
            "Serialization error: JSON - unexpected end of input"
        );
    }
}
