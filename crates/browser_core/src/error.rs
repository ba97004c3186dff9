use shared::error::{ErrorCode, FetchError, ParseError};
use thiserror::Error;

/// Failure of a single load operation. The `Display` form is what the page
/// shows in its error placeholder.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("{0}")]
    Fetch(#[from] FetchError),
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("invalid catalog JSON: {0}")]
    Catalog(String),
}

impl LoadError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LoadError::Fetch(err) => err.code(),
            LoadError::Parse(err) => err.code(),
            LoadError::Catalog(_) => ErrorCode::Parse,
        }
    }
}
