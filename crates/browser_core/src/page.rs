//! The page as a set of named regions driven by [`PageUpdate`]s.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use crate::view::{ConferenceListView, PaperCard, Placeholder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    DailyModeButton,
    ConferenceModeButton,
    DailySelector,
    ConferenceSelector,
    ConferenceButton,
    ConferencePickerModal,
    ConferenceList,
    CurrentConference,
    PaperContainer,
}

impl Region {
    pub const ALL: [Region; 9] = [
        Region::DailyModeButton,
        Region::ConferenceModeButton,
        Region::DailySelector,
        Region::ConferenceSelector,
        Region::ConferenceButton,
        Region::ConferencePickerModal,
        Region::ConferenceList,
        Region::CurrentConference,
        Region::PaperContainer,
    ];

    pub fn dom_id(self) -> &'static str {
        match self {
            Region::DailyModeButton => "dailyModeButton",
            Region::ConferenceModeButton => "conferenceModeButton",
            Region::DailySelector => "dailySelector",
            Region::ConferenceSelector => "conferenceSelector",
            Region::ConferenceButton => "conferenceButton",
            Region::ConferencePickerModal => "conferencePickerModal",
            Region::ConferenceList => "conferenceList",
            Region::CurrentConference => "currentConference",
            Region::PaperContainer => "paperContainer",
        }
    }

    pub fn from_dom_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.dom_id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaperArea {
    Placeholder(Placeholder),
    Papers(Vec<PaperCard>),
}

impl Default for PaperArea {
    fn default() -> Self {
        PaperArea::Placeholder(Placeholder::Blank)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageUpdate {
    SetActive { region: Region, active: bool },
    SetVisible { region: Region, visible: bool },
    SetText { region: Region, text: String },
    ConferenceList(ConferenceListView),
    PaperArea(PaperArea),
}

/// Receiver of page updates. Implementations must not block: the controller
/// pushes from inside async tasks.
pub trait PageSink: Send + Sync {
    fn push(&self, update: PageUpdate);
}

/// In-memory page state. `mutations` counts every applied update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageModel {
    active: HashSet<Region>,
    hidden: HashSet<Region>,
    texts: HashMap<Region, String>,
    conference_list: ConferenceListView,
    paper_area: PaperArea,
    mutations: u64,
}

impl Default for PageModel {
    fn default() -> Self {
        Self {
            active: HashSet::from([Region::DailyModeButton]),
            hidden: HashSet::from([Region::ConferenceSelector, Region::ConferencePickerModal]),
            texts: HashMap::new(),
            conference_list: ConferenceListView::Empty,
            paper_area: PaperArea::default(),
            mutations: 0,
        }
    }
}

impl PageModel {
    pub fn apply(&mut self, update: PageUpdate) {
        self.mutations += 1;
        match update {
            PageUpdate::SetActive { region, active } => {
                if active {
                    self.active.insert(region);
                } else {
                    self.active.remove(&region);
                }
            }
            PageUpdate::SetVisible { region, visible } => {
                if visible {
                    self.hidden.remove(&region);
                } else {
                    self.hidden.insert(region);
                }
            }
            PageUpdate::SetText { region, text } => {
                self.texts.insert(region, text);
            }
            PageUpdate::ConferenceList(view) => self.conference_list = view,
            PageUpdate::PaperArea(area) => self.paper_area = area,
        }
    }

    pub fn is_active(&self, region: Region) -> bool {
        self.active.contains(&region)
    }

    pub fn is_visible(&self, region: Region) -> bool {
        !self.hidden.contains(&region)
    }

    pub fn text(&self, region: Region) -> Option<&str> {
        self.texts.get(&region).map(String::as_str)
    }

    pub fn conference_list(&self) -> &ConferenceListView {
        &self.conference_list
    }

    pub fn paper_area(&self) -> &PaperArea {
        &self.paper_area
    }

    pub fn mutations(&self) -> u64 {
        self.mutations
    }
}

/// Thread-safe handle to a [`PageModel`], usable as a [`PageSink`].
#[derive(Debug, Clone, Default)]
pub struct SharedPage {
    inner: Arc<Mutex<PageModel>>,
}

impl SharedPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> PageModel {
        match self.inner.lock() {
            Ok(page) => page.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl PageSink for SharedPage {
    fn push(&self, update: PageUpdate) {
        let mut page = match self.inner.lock() {
            Ok(page) => page,
            Err(poisoned) => poisoned.into_inner(),
        };
        page.apply(update);
    }
}
