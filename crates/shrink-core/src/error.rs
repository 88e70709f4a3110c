use thiserror::Error;

/// The encoded stream does not match the token vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputFormatError {
    #[error("Unrecognized token discriminator {unit:#06x} at offset {offset}")]
    UnknownToken { unit: u16, offset: usize },
    #[error("Token {token} is not allowed at offset {offset}")]
    MisplacedToken { token: &'static str, offset: usize },
    #[error("Unrecognized numeric literal marker {marker:#06x} at offset {offset}")]
    BadNumberMarker { marker: u16, offset: usize },
    #[error("Unrecognized function kind {kind} at offset {offset}")]
    BadFunctionKind { kind: u16, offset: usize },
    #[error("Stream truncated at offset {offset}: {needed} more unit(s) expected")]
    Truncated { offset: usize, needed: usize },
    #[error("Invalid UTF-16 identifier or regexp payload at offset {offset}")]
    InvalidText { offset: usize },
    #[error("Closing brace at offset {offset} has no matching opening brace")]
    UnbalancedBrace { offset: usize },
    #[error("Function end marker at offset {offset} has no open function")]
    UnbalancedFunction { offset: usize },
    #[error("{open} function scope(s) still open at end of stream")]
    UnclosedScope { open: usize },
    #[error("No function metadata for the function at offset {offset}")]
    MissingFunction { offset: usize },
    #[error("Odd byte count {len} for a stream of 16-bit units")]
    OddByteCount { len: usize },
}

/// Compressor settings rejected before any pass runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Unrecognised value for stripConsole: {0}")]
    UnknownStripLevel(String),
    #[error("Negative {field}: {value}")]
    NegativeIndent { field: &'static str, value: i64 },
    #[error("Cannot read configuration {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

#[derive(Error, Debug)]
pub enum ShrinkError {
    #[error("Input format error: {0}")]
    InputFormat(#[from] InputFormatError),
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ShrinkError {
    pub fn is_input_format(&self) -> bool {
        matches!(self, Self::InputFormat(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, ShrinkError>;
