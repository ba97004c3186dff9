//! Backend-to-UI events and error modeling for the desktop page.

use browser_core::PageUpdate;
use shared::error::ErrorCode;

pub enum UiEvent {
    Page(PageUpdate),
    DatesLoaded(Vec<String>),
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    NotFound,
    Server,
    Transport,
    Data,
    Unknown,
}

impl UiErrorCategory {
    pub fn from_code(code: ErrorCode) -> Self {
        match code {
            ErrorCode::NotFound => UiErrorCategory::NotFound,
            ErrorCode::Status => UiErrorCategory::Server,
            ErrorCode::Transport | ErrorCode::Io => UiErrorCategory::Transport,
            ErrorCode::Parse => UiErrorCategory::Data,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UiErrorCategory::NotFound => "Missing file",
            UiErrorCategory::Server => "Server error",
            UiErrorCategory::Transport => "Connection error",
            UiErrorCategory::Data => "Bad data",
            UiErrorCategory::Unknown => "Error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Settings,
    ConferenceLoad,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(
        context: UiErrorContext,
        category: UiErrorCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    /// Error from a failed load, classified by its code.
    pub fn from_code(context: UiErrorContext, code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(context, UiErrorCategory::from_code(code), message)
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn banner_text(&self) -> String {
        let prefix = match self.context {
            UiErrorContext::BackendStartup => "Backend startup failed",
            UiErrorContext::Settings => "Settings error",
            UiErrorContext::ConferenceLoad => self.category.label(),
        };
        format!("{prefix}: {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_404_and_missing_file_classify_alike() {
        let err = UiError::from_code(
            UiErrorContext::ConferenceLoad,
            ErrorCode::NotFound,
            "HTTP error! status: 404",
        );
        assert_eq!(err.category(), UiErrorCategory::NotFound);
        assert_eq!(err.banner_text(), "Missing file: HTTP error! status: 404");
    }

    #[test]
    fn server_status_is_not_a_connection_failure() {
        let err = UiError::from_code(
            UiErrorContext::ConferenceLoad,
            ErrorCode::Status,
            "HTTP error! status: 500",
        );
        assert_eq!(err.category(), UiErrorCategory::Server);
    }

    #[test]
    fn parse_failures_are_data_errors_whatever_the_message() {
        let err = UiError::from_code(
            UiErrorContext::ConferenceLoad,
            ErrorCode::Parse,
            "request timed out while parsing",
        );
        assert_eq!(err.category(), UiErrorCategory::Data);
    }

    #[test]
    fn startup_banner_names_the_context() {
        let err = UiError::new(
            UiErrorContext::BackendStartup,
            UiErrorCategory::Unknown,
            "failed to build runtime",
        );
        assert_eq!(err.context(), UiErrorContext::BackendStartup);
        assert!(err.banner_text().starts_with("Backend startup failed: "));
    }
}
