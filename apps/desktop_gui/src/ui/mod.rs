//! UI layer for the desktop paper browser.

pub mod app;
pub mod panels;

pub use app::PaperBrowserApp;
