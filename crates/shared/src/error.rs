use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Status,
    Transport,
    Io,
    Parse,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("not found: {path}")]
    NotFound { path: String },
    #[error("HTTP error! status: {status}")]
    Status { path: String, status: u16 },
    #[error("request for {path} failed: {message}")]
    Transport { path: String, message: String },
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

impl FetchError {
    pub fn code(&self) -> ErrorCode {
        match self {
            FetchError::NotFound { .. } | FetchError::Status { status: 404, .. } => {
                ErrorCode::NotFound
            }
            FetchError::Status { .. } => ErrorCode::Status,
            FetchError::Transport { .. } => ErrorCode::Transport,
            FetchError::Io { .. } => ErrorCode::Io,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            FetchError::NotFound { path }
            | FetchError::Status { path, .. }
            | FetchError::Transport { path, .. }
            | FetchError::Io { path, .. } => path,
        }
    }
}

/// A JSON-lines record that failed to parse. `line` is 1-based and counts
/// blank lines, so it points at the offending line of the source file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        ErrorCode::Parse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_404_shares_the_missing_file_code() {
        let missing = FetchError::NotFound {
            path: "data/a.jsonl".to_string(),
        };
        let http_404 = FetchError::Status {
            path: "data/a.jsonl".to_string(),
            status: 404,
        };
        let http_500 = FetchError::Status {
            path: "data/a.jsonl".to_string(),
            status: 500,
        };
        assert_eq!(missing.code(), ErrorCode::NotFound);
        assert_eq!(http_404.code(), ErrorCode::NotFound);
        assert_eq!(http_500.code(), ErrorCode::Status);
        assert_eq!(http_500.path(), "data/a.jsonl");
    }

    #[test]
    fn parse_errors_point_at_the_line() {
        let err = ParseError::new(3, "EOF while parsing");
        assert_eq!(err.to_string(), "line 3: EOF while parsing");
        assert_eq!(err.code(), ErrorCode::Parse);
    }
}
