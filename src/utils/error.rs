use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Snapshot load failed: {message}")]
    LoadError { message: String },

    #[error("Medal update failed: {message}")]
    ReconcileError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, PoolError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Io,
    Data,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PoolError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PoolError::ApiError(_) => ErrorCategory::Network,
            PoolError::IoError(_) => ErrorCategory::Io,
            PoolError::SerializationError(_)
            | PoolError::CsvError(_)
            | PoolError::LoadError { .. }
            | PoolError::ReconcileError { .. }
            | PoolError::ProcessingError { .. } => ErrorCategory::Data,
            PoolError::ConfigError { .. }
            | PoolError::InvalidConfigValueError { .. }
            | PoolError::MissingConfigError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Transient: the next refresh cycle may succeed.
            PoolError::ApiError(_) | PoolError::LoadError { .. } => ErrorSeverity::Medium,
            PoolError::IoError(_)
            | PoolError::CsvError(_)
            | PoolError::SerializationError(_)
            | PoolError::ReconcileError { .. }
            | PoolError::ProcessingError { .. } => ErrorSeverity::High,
            PoolError::ConfigError { .. }
            | PoolError::InvalidConfigValueError { .. }
            | PoolError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PoolError::ApiError(_) => {
                "Check network connectivity and endpoint URLs, then retry".to_string()
            }
            PoolError::IoError(_) => {
                "Check that the pool and output paths exist and are writable".to_string()
            }
            PoolError::SerializationError(_) => {
                "Inspect the pool file for malformed JSON".to_string()
            }
            PoolError::CsvError(_) => "Inspect the rendered standings data".to_string(),
            PoolError::ConfigError { .. }
            | PoolError::InvalidConfigValueError { .. }
            | PoolError::MissingConfigError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
            PoolError::LoadError { .. } => {
                "Verify the pool source contains a teams array or a bare entry array".to_string()
            }
            PoolError::ReconcileError { .. } => {
                "Retry later; the previous pool snapshot is untouched".to_string()
            }
            PoolError::ProcessingError { .. } => {
                "Re-run with --verbose and inspect the logs".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PoolError::ApiError(e) => format!("A network request failed: {}", e),
            PoolError::IoError(e) => format!("A file operation failed: {}", e),
            PoolError::SerializationError(e) => format!("JSON data could not be processed: {}", e),
            PoolError::CsvError(e) => format!("CSV output could not be written: {}", e),
            PoolError::ConfigError { message } => format!("Configuration problem: {}", message),
            PoolError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' is not a valid {}: {}", value, field, reason),
            PoolError::MissingConfigError { field } => {
                format!("Required configuration '{}' was not provided", field)
            }
            PoolError::LoadError { message } => {
                format!("The pool snapshot could not be loaded: {}", message)
            }
            PoolError::ReconcileError { message } => {
                format!("The medal update did not complete: {}", message)
            }
            PoolError::ProcessingError { message } => {
                format!("Data processing failed: {}", message)
            }
        }
    }
}
