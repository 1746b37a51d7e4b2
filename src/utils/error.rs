use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Empty CSV: found {lines} line(s) after trimming, too few for the configured parse policy")]
    EmptyInput { lines: usize },

    #[error("Malformed row at line {line}: expected {expected} value(s), found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid number in record {index}: field '{field}' has value '{value}'")]
    InvalidNumber {
        index: usize,
        field: String,
        value: String,
    },

    #[error("Missing field '{field}' in record {index}")]
    MissingField { index: usize, field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    /// Data errors are recoverable by fixing the input, configuration errors
    /// by fixing the invocation, IO errors are environmental.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::EmptyInput { .. } => ErrorSeverity::Medium,
            EtlError::MalformedRow { .. }
            | EtlError::InvalidNumber { .. }
            | EtlError::MissingField { .. } => ErrorSeverity::High,
            EtlError::ConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ValidationError { .. } => ErrorSeverity::High,
            EtlError::CsvError(_) | EtlError::SerializationError(_) => ErrorSeverity::High,
            EtlError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::EmptyInput { .. } => {
                "Provide a header row followed by data rows, or allow header-only input \
                 (--allow-header-only on the command line, allow_header_only = true under [parse] in a job file)"
                    .to_string()
            }
            EtlError::MalformedRow { line, .. } => {
                format!(
                    "Fix the column count on line {}, or turn off strict columns \
                     (--strict-columns on the command line, strict_columns under [parse] in a job file)",
                    line
                )
            }
            EtlError::InvalidNumber { field, .. } => {
                format!("Make sure every '{}' value is a plain number", field)
            }
            EtlError::MissingField { field, .. } => {
                format!("Add a '{}' column to the input header", field)
            }
            EtlError::IoError(_) => "Check that the input file exists and the output path is writable".to_string(),
            EtlError::CsvError(_) | EtlError::SerializationError(_) => {
                "Try a different output format".to_string()
            }
            EtlError::ConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ValidationError { .. } => "Check the command line arguments or job file".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
