use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Service manager unavailable: {message}")]
    ManagerUnavailable { message: String },

    #[error("Permission denied while querying service '{service}'")]
    PermissionDenied { service: String },

    #[error("Service '{service}' is not known to the service manager")]
    ServiceNotFound { service: String },

    #[error("Unrecognized status output for service '{service}': {output}")]
    UnexpectedOutput { service: String, output: String },

    #[error("Status query for service '{service}' timed out after {seconds}s")]
    QueryTimeout { service: String, seconds: u64 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 錯誤分類，用於決定處理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Query,
    System,
}

/// 錯誤嚴重程度，對應 CLI 退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ProbeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::ServiceNotFound { .. }
            | Self::UnexpectedOutput { .. }
            | Self::QueryTimeout { .. } => ErrorCategory::Query,
            Self::IoError(_)
            | Self::SerializationError(_)
            | Self::ManagerUnavailable { .. }
            | Self::PermissionDenied { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ServiceNotFound { .. } => ErrorSeverity::Low,
            Self::QueryTimeout { .. } | Self::UnexpectedOutput { .. } => ErrorSeverity::Medium,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::SerializationError(_) => ErrorSeverity::High,
            Self::IoError(_) | Self::ManagerUnavailable { .. } | Self::PermissionDenied { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::IoError(_) => "Check filesystem permissions and file paths".to_string(),
            Self::SerializationError(_) => {
                "Report output could not be rendered; check the fact catalog for unusual names"
                    .to_string()
            }
            Self::ManagerUnavailable { .. } => {
                "Verify the service manager is installed and reachable (is systemctl on PATH?)"
                    .to_string()
            }
            Self::PermissionDenied { service } => format!(
                "Run with sufficient privileges to query service '{}'",
                service
            ),
            Self::ServiceNotFound { service } => format!(
                "Check that service unit '{}' is registered with the service manager",
                service
            ),
            Self::UnexpectedOutput { .. } => {
                "The service manager returned output this tool does not recognize; check its version"
                    .to_string()
            }
            Self::QueryTimeout { seconds, .. } => format!(
                "The service manager did not answer within {}s; increase the timeout",
                seconds
            ),
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Review the configuration file and fix the reported field".to_string()
            }
            Self::InvalidConfigValueError { field, .. } => {
                format!("Provide a valid value for '{}'", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Query => format!("Status query problem: {}", self),
            ErrorCategory::System => format!("System problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
