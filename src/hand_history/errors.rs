use thiserror::Error;

/// Errors surfaced while reading a hand history.
///
/// Malformed or unexpected lines are never errors, they are skipped. Only a
/// failing reader or an unusable configuration stops the parser.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Error reading hand history caused by IO error")]
    Io(#[from] std::io::Error),

    #[error("Invalid parser configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for hand history parsing
pub type Result<T> = std::result::Result<T, ParseError>;
