//! The application around the mode controller: daily date index, paper
//! store and paper rendering.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::domain::PaperRecord;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::{
    error::LoadError,
    page::{PageSink, PageUpdate, PaperArea},
    papers::{parse_paper_lines, PaperStore},
    source::AssetSource,
    view::{paper_cards, Placeholder},
};

#[async_trait]
pub trait AppHost: Send + Sync {
    /// Known dates, most recent first.
    async fn available_dates(&self) -> Vec<String>;
    async fn load_papers_by_date(&self, date: &str);
    async fn render_papers(&self, papers: &[PaperRecord]);
}

/// Parses the daily index: one `<YYYY-MM-DD>.jsonl` (or bare date) per
/// line. Unparseable lines are skipped; duplicates collapse; the result is
/// newest first.
pub fn parse_daily_index(text: &str) -> Vec<String> {
    let mut dates: Vec<NaiveDate> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let stem = line.rsplit('/').next().unwrap_or(line);
            let stem = stem.strip_suffix(".jsonl").unwrap_or(stem);
            match NaiveDate::parse_from_str(stem, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    warn!(entry = line, "skipping unrecognized daily index entry");
                    None
                }
            }
        })
        .collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();
    dates
        .into_iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect()
}

#[derive(Debug, Clone)]
pub struct SitePaths {
    pub catalog: String,
    pub data_dir: String,
    pub daily_index: String,
}

impl Default for SitePaths {
    fn default() -> Self {
        Self {
            catalog: crate::CATALOG_PATH.to_string(),
            data_dir: crate::DATA_DIR.to_string(),
            daily_index: crate::DAILY_INDEX_PATH.to_string(),
        }
    }
}

impl SitePaths {
    pub fn data_file(&self, file: &str) -> String {
        let dir = self.data_dir.trim_end_matches('/');
        if dir.is_empty() {
            file.to_string()
        } else {
            format!("{dir}/{file}")
        }
    }
}

/// Host backed by the static site layout: daily files under the data
/// directory, listed by the daily index.
pub struct StaticSiteHost {
    source: Arc<dyn AssetSource>,
    page: Arc<dyn PageSink>,
    store: Arc<Mutex<PaperStore>>,
    paths: SitePaths,
    dates: Mutex<Vec<String>>,
}

impl StaticSiteHost {
    pub fn new(
        source: Arc<dyn AssetSource>,
        page: Arc<dyn PageSink>,
        store: Arc<Mutex<PaperStore>>,
        paths: SitePaths,
    ) -> Self {
        Self {
            source,
            page,
            store,
            paths,
            dates: Mutex::new(Vec::new()),
        }
    }

    /// Reloads the daily index. A missing or unreadable index leaves the host
    /// with no dates.
    pub async fn refresh_dates(&self) -> Vec<String> {
        let dates = match self.source.fetch_text(&self.paths.daily_index).await {
            Ok(text) => parse_daily_index(&text),
            Err(err) => {
                warn!(path = %self.paths.daily_index, "failed to load daily index: {err}");
                Vec::new()
            }
        };
        info!("loaded {} daily dates", dates.len());
        *self.dates.lock().await = dates.clone();
        dates
    }

    async fn fetch_day(&self, path: &str) -> Result<Vec<PaperRecord>, LoadError> {
        let text = self.source.fetch_text(path).await?;
        Ok(parse_paper_lines(&text)?)
    }
}

#[async_trait]
impl AppHost for StaticSiteHost {
    async fn available_dates(&self) -> Vec<String> {
        self.dates.lock().await.clone()
    }

    async fn load_papers_by_date(&self, date: &str) {
        let path = self.paths.data_file(&format!("{date}.jsonl"));
        self.page
            .push(PageUpdate::PaperArea(PaperArea::Placeholder(Placeholder::Loading {
                name: date.to_string(),
            })));
        match self.fetch_day(&path).await {
            Ok(papers) => {
                info!("loaded {} papers for {date}", papers.len());
                self.store.lock().await.commit_all(date, papers.clone());
                self.render_papers(&papers).await;
            }
            Err(err) => {
                error!(%path, "failed to load daily papers: {err}");
                self.page
                    .push(PageUpdate::PaperArea(PaperArea::Placeholder(
                        Placeholder::DailyLoadFailed {
                            date: date.to_string(),
                            message: err.to_string(),
                            path,
                        },
                    )));
            }
        }
    }

    async fn render_papers(&self, papers: &[PaperRecord]) {
        self.page
            .push(PageUpdate::PaperArea(PaperArea::Papers(paper_cards(papers))));
    }
}
