use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Aggregation failed: {message}")]
    AggregationError { message: String },
}

impl ScoutError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            ScoutError::HttpError(_) => "Could not reach a remote site".to_string(),
            ScoutError::MissingConfigError { .. }
            | ScoutError::InvalidConfigValueError { .. }
            | ScoutError::ConfigValidationError { .. } => {
                format!("Configuration problem: {}", self)
            }
            ScoutError::ValidationError { message } => message.clone(),
            ScoutError::AggregationError { .. } => "Search could not be completed".to_string(),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScoutError::HttpError(_) => "Check network connectivity and the provider base URLs",
            ScoutError::MissingConfigError { .. }
            | ScoutError::InvalidConfigValueError { .. }
            | ScoutError::ConfigValidationError { .. } => {
                "Review the providers TOML file against the sample in config/providers.toml"
            }
            ScoutError::ValidationError { .. } => {
                "Pass a non-empty phone model, e.g. \"iPhone 15\""
            }
            ScoutError::AggregationError { .. } => {
                "Make sure at least one provider is configured and provider ids are unique"
            }
            ScoutError::IoError(_) => "Check file paths and permissions",
            _ => "Re-run with --verbose for more detail",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
