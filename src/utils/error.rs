use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClimateError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("geospatial service returned HTTP {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("no climate data found for the requested location and period")]
    NoData,

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Service,
    Data,
    Config,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning-level outcome, the run is still considered successful.
    Low,
    /// Transient remote failure, retrying the whole run may help.
    Medium,
    /// Processing failed, input or data problem.
    High,
    /// Environment problem (filesystem, configuration).
    Critical,
}

impl ClimateError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClimateError::ApiError(_) => ErrorCategory::Network,
            ClimateError::ServiceError { .. } => ErrorCategory::Service,
            ClimateError::NoData | ClimateError::ProcessingError { .. } => ErrorCategory::Data,
            ClimateError::CsvError(_) | ClimateError::SerializationError(_) => ErrorCategory::Data,
            ClimateError::ConfigValidationError { .. }
            | ClimateError::InvalidConfigValueError { .. }
            | ClimateError::MissingConfigError { .. }
            | ClimateError::ValidationError { .. } => ErrorCategory::Config,
            ClimateError::IoError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ClimateError::NoData => ErrorSeverity::Low,
            ClimateError::ApiError(_) | ClimateError::ServiceError { .. } => ErrorSeverity::Medium,
            ClimateError::CsvError(_)
            | ClimateError::SerializationError(_)
            | ClimateError::ProcessingError { .. } => ErrorSeverity::High,
            ClimateError::ConfigValidationError { .. }
            | ClimateError::InvalidConfigValueError { .. }
            | ClimateError::MissingConfigError { .. }
            | ClimateError::ValidationError { .. } => ErrorSeverity::High,
            ClimateError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ClimateError::ApiError(_) => {
                "Check network connectivity and the service endpoint, then run the analysis again"
            }
            ClimateError::ServiceError { .. } => {
                "The geospatial service rejected the request; verify the auth token and dataset availability"
            }
            ClimateError::NoData => {
                "Try a different location or a year range inside the dataset coverage (1979-2022)"
            }
            ClimateError::CsvError(_) | ClimateError::SerializationError(_) => {
                "This is likely a bug in the data handling; rerun with --verbose and report the log"
            }
            ClimateError::IoError(_) => "Check that the output directory exists and is writable",
            ClimateError::ConfigValidationError { .. }
            | ClimateError::InvalidConfigValueError { .. }
            | ClimateError::MissingConfigError { .. }
            | ClimateError::ValidationError { .. } => {
                "Fix the reported configuration value and run again"
            }
            ClimateError::ProcessingError { .. } => {
                "Rerun with --verbose to see which step failed"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ClimateError::NoData => {
                "No climate data found for the specified location and period".to_string()
            }
            ClimateError::ApiError(_) | ClimateError::ServiceError { .. } => {
                format!("Climate analysis failed: {}", self)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClimateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_data_is_a_warning() {
        assert_eq!(ClimateError::NoData.severity(), ErrorSeverity::Low);
        assert_eq!(ClimateError::NoData.category(), ErrorCategory::Data);
    }

    #[test]
    fn service_errors_are_retryable() {
        let err = ClimateError::ServiceError {
            status: 503,
            message: "backend overloaded".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.category(), ErrorCategory::Service);
    }

    #[test]
    fn validation_errors_are_config_category() {
        let err = ClimateError::ValidationError {
            message: "start year after end year".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Config);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
