//! Daily/conference mode switching and conference loading.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use shared::{
    domain::{CatalogFile, ConferenceDescriptor, PaperRecord, ViewMode},
    error::ErrorCode,
};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::{
    error::LoadError,
    host::{AppHost, SitePaths},
    page::{PageSink, PageUpdate, PaperArea, Region},
    papers::{parse_paper_lines, PaperStore},
    ready::ReadySignal,
    source::AssetSource,
    view::{conference_list_view, Placeholder},
};

/// How a single conference load ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Displayed { papers: usize },
    Failed { message: String, code: ErrorCode },
    /// A newer load started before this one finished; its result was dropped.
    Superseded,
}

#[derive(Debug, Default)]
struct Session {
    view_mode: ViewMode,
    catalog: Vec<ConferenceDescriptor>,
    current_conference: Option<ConferenceDescriptor>,
    picker_open: bool,
}

pub struct ModeController {
    source: Arc<dyn AssetSource>,
    host: Arc<dyn AppHost>,
    page: Arc<dyn PageSink>,
    store: Arc<Mutex<PaperStore>>,
    paths: SitePaths,
    session: Mutex<Session>,
    load_seq: AtomicU64,
    // Serializes the check-and-commit step of conference loads.
    commit_gate: Mutex<()>,
}

impl ModeController {
    pub fn new(
        source: Arc<dyn AssetSource>,
        host: Arc<dyn AppHost>,
        page: Arc<dyn PageSink>,
        store: Arc<Mutex<PaperStore>>,
        paths: SitePaths,
    ) -> Self {
        Self {
            source,
            host,
            page,
            store,
            paths,
            session: Mutex::new(Session::default()),
            load_seq: AtomicU64::new(0),
            commit_gate: Mutex::new(()),
        }
    }

    /// Waits for the host to come up, then loads the catalog.
    pub async fn init(&self, ready: &ReadySignal) -> Vec<ConferenceDescriptor> {
        ready.wait().await;
        self.load_catalog().await
    }

    pub async fn view_mode(&self) -> ViewMode {
        self.session.lock().await.view_mode
    }

    pub async fn catalog(&self) -> Vec<ConferenceDescriptor> {
        self.session.lock().await.catalog.clone()
    }

    pub async fn current_conference(&self) -> Option<ConferenceDescriptor> {
        self.session.lock().await.current_conference.clone()
    }

    pub async fn is_picker_open(&self) -> bool {
        self.session.lock().await.picker_open
    }

    /// Loads the catalog and replaces the session's copy. Failures are logged
    /// and yield an empty catalog.
    pub async fn load_catalog(&self) -> Vec<ConferenceDescriptor> {
        let catalog = match self.fetch_catalog().await {
            Ok(catalog) => {
                info!("loaded {} conferences", catalog.len());
                catalog
            }
            Err(err) => {
                error!(path = %self.paths.catalog, "failed to load conference list: {err}");
                Vec::new()
            }
        };

        let mut session = self.session.lock().await;
        if let Some(current) = session.current_conference.take() {
            match catalog.iter().find(|c| c.id == current.id) {
                Some(fresh) => session.current_conference = Some(fresh.clone()),
                None => info!(
                    conference = %current.id,
                    "current conference is no longer listed; clearing selection"
                ),
            }
        }
        session.catalog = catalog.clone();
        catalog
    }

    async fn fetch_catalog(&self) -> Result<Vec<ConferenceDescriptor>, LoadError> {
        let text = self.source.fetch_text(&self.paths.catalog).await?;
        let file: CatalogFile =
            serde_json::from_str(&text).map_err(|err| LoadError::Catalog(err.to_string()))?;
        Ok(file.conferences)
    }

    /// Switches the page to `target` and loads what the new mode shows.
    /// Switching to the active mode does nothing.
    pub async fn switch_mode(&self, target: ViewMode) {
        if self.enter_mode(target).await {
            self.activate_mode(target).await;
        }
    }

    /// The synchronous half of a mode switch: records the mode, flips the
    /// mode buttons and selectors, and on a switch to daily mode drops any
    /// conference load still in flight. Returns false when `target` is
    /// already active.
    pub async fn enter_mode(&self, target: ViewMode) -> bool {
        {
            let mut session = self.session.lock().await;
            if session.view_mode == target {
                return false;
            }
            session.view_mode = target;
        }
        if target == ViewMode::Daily {
            // Waits out a commit in progress so its render lands first.
            let _gate = self.commit_gate.lock().await;
            self.load_seq.fetch_add(1, Ordering::SeqCst);
        }

        let daily = target == ViewMode::Daily;
        self.page.push(PageUpdate::SetActive {
            region: Region::DailyModeButton,
            active: daily,
        });
        self.page.push(PageUpdate::SetActive {
            region: Region::ConferenceModeButton,
            active: !daily,
        });
        self.show_selectors(daily);
        info!("switched to {} mode", target.label());
        true
    }

    /// Loads the content of `target` mode. Does nothing if another mode has
    /// been entered since.
    pub async fn activate_mode(&self, target: ViewMode) {
        if self.view_mode().await != target {
            debug!("skipping activation of {} mode; mode changed", target.label());
            return;
        }
        match target {
            ViewMode::Daily => self.show_daily_mode().await,
            ViewMode::Conference => self.show_conference_mode().await,
        }
    }

    fn show_selectors(&self, daily: bool) {
        self.page.push(PageUpdate::SetVisible {
            region: Region::DailySelector,
            visible: daily,
        });
        self.page.push(PageUpdate::SetVisible {
            region: Region::ConferenceSelector,
            visible: !daily,
        });
    }

    async fn show_daily_mode(&self) {
        let dates = self.host.available_dates().await;
        if let Some(latest) = dates.first() {
            self.host.load_papers_by_date(latest).await;
        }
    }

    async fn show_conference_mode(&self) {
        let target = {
            let session = self.session.lock().await;
            session
                .current_conference
                .clone()
                .or_else(|| session.catalog.first().cloned())
        };
        match target {
            Some(conference) => {
                self.start_load(conference, Some(ViewMode::Conference)).await;
            }
            None => self.show_no_conferences(),
        }
    }

    fn show_no_conferences(&self) {
        self.page
            .push(PageUpdate::PaperArea(PaperArea::Placeholder(
                Placeholder::NoConferences {
                    catalog_path: self.paths.catalog.clone(),
                },
            )));
    }

    /// Opens or closes the conference picker. The list is re-rendered from
    /// the current catalog every time it opens.
    pub async fn toggle_picker(&self) {
        let mut session = self.session.lock().await;
        if session.picker_open {
            session.picker_open = false;
            self.page.push(PageUpdate::SetVisible {
                region: Region::ConferencePickerModal,
                visible: false,
            });
        } else {
            self.page
                .push(PageUpdate::ConferenceList(conference_list_view(&session.catalog)));
            session.picker_open = true;
            self.page.push(PageUpdate::SetVisible {
                region: Region::ConferencePickerModal,
                visible: true,
            });
        }
    }

    /// Click on the picker modal; closes it only when the click landed on the
    /// backdrop rather than the dialog content.
    pub async fn click_picker_backdrop(&self, on_backdrop: bool) {
        if on_backdrop && self.is_picker_open().await {
            self.toggle_picker().await;
        }
    }

    /// Picks a conference from the modal list. Unknown ids are ignored.
    pub async fn select_from_list(&self, conference_id: &str) -> Option<LoadOutcome> {
        let conference = {
            let session = self.session.lock().await;
            session
                .catalog
                .iter()
                .find(|c| c.id == conference_id)
                .cloned()
        };
        let Some(conference) = conference else {
            debug!(conference = conference_id, "ignoring selection of unknown conference");
            return None;
        };
        if self.is_picker_open().await {
            self.toggle_picker().await;
        }
        Some(self.load_conference(conference).await)
    }

    /// Loads and displays one conference's papers. Only the most recently
    /// started load may write its result to the store or the page, and a
    /// switch to daily mode discards loads still in flight.
    pub async fn load_conference(&self, conference: ConferenceDescriptor) -> LoadOutcome {
        self.start_load(conference, None).await
    }

    /// `required_mode`, when set, must still be the session's mode at commit
    /// time.
    async fn start_load(
        &self,
        conference: ConferenceDescriptor,
        required_mode: Option<ViewMode>,
    ) -> LoadOutcome {
        let token = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let path = self.paths.data_file(&conference.file);

        self.session.lock().await.current_conference = Some(conference.clone());
        self.page.push(PageUpdate::SetText {
            region: Region::CurrentConference,
            text: conference.name.clone(),
        });
        self.page
            .push(PageUpdate::PaperArea(PaperArea::Placeholder(Placeholder::Loading {
                name: conference.name.clone(),
            })));

        let result = self.fetch_papers(&path).await;

        let _gate = self.commit_gate.lock().await;
        let mode_changed = match required_mode {
            Some(mode) => self.session.lock().await.view_mode != mode,
            None => false,
        };
        if mode_changed || self.load_seq.load(Ordering::SeqCst) != token {
            debug!(conference = %conference.id, token, "discarding superseded conference load");
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(papers) => {
                let count = papers.len();
                self.store
                    .lock()
                    .await
                    .commit_all(&conference.id, papers.clone());
                self.host.render_papers(&papers).await;
                info!("loaded {count} papers from {}", conference.name);
                LoadOutcome::Displayed { papers: count }
            }
            Err(err) => {
                let message = err.to_string();
                let code = err.code();
                error!(%path, conference = %conference.id, "failed to load conference papers: {message}");
                self.page
                    .push(PageUpdate::PaperArea(PaperArea::Placeholder(
                        Placeholder::LoadFailed {
                            message: message.clone(),
                            path,
                        },
                    )));
                LoadOutcome::Failed { message, code }
            }
        }
    }

    async fn fetch_papers(&self, path: &str) -> Result<Vec<PaperRecord>, LoadError> {
        let text = self.source.fetch_text(path).await?;
        Ok(parse_paper_lines(&text)?)
    }
}
