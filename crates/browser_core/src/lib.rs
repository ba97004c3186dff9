pub mod controller;
pub mod error;
pub mod host;
pub mod markup;
pub mod page;
pub mod papers;
pub mod ready;
pub mod settings;
pub mod source;
pub mod verify;
pub mod view;

pub use controller::{LoadOutcome, ModeController};
pub use host::{AppHost, SitePaths, StaticSiteHost};
pub use page::{PageModel, PageSink, PageUpdate, PaperArea, Region, SharedPage};
pub use papers::{PaperStore, ALL_CATEGORY};
pub use ready::ReadySignal;
pub use source::{AssetSource, DirAssetSource, HttpAssetSource, SiteRoot};

pub const CATALOG_PATH: &str = "assets/conference-list.json";
pub const DAILY_INDEX_PATH: &str = "assets/file-list.txt";
pub const DATA_DIR: &str = "data";

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod source_tests;
