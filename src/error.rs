//! Per-message errors
use std::fmt;

use thiserror::Error;

/// Failure while handling a single message. Never fatal to the ingester:
/// the message is logged and dropped.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("empty payload")]
    EmptyPayload,
    #[error("payload is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),
    #[error("error decoding JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("expected JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("missing key in JSON data: '{0}'")]
    MissingField(String),
    #[error("formatting row: {0}")]
    Format(#[from] csv::Error),
    #[error("writing row: {0}")]
    Write(#[from] std::io::Error),
}

/// Coarse classification used to tag log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ParseError,
    MissingFieldError,
    OtherError,
}

impl IngestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IngestError::Parse(_) => ErrorKind::ParseError,
            IngestError::MissingField(_) => ErrorKind::MissingFieldError,
            _ => ErrorKind::OtherError,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::ParseError => "ParseError",
            ErrorKind::MissingFieldError => "MissingFieldError",
            ErrorKind::OtherError => "OtherError",
        };
        f.write_str(s)
    }
}
