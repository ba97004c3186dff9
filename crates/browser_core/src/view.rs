//! Pure view-models for the page regions. Nothing here touches a page; the
//! page layer and `markup` turn these into pixels or HTML.

use serde::Serialize;
use serde_json::Value;
use shared::domain::{ConferenceDescriptor, PaperRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConferenceListItem {
    pub id: String,
    pub name: String,
    pub count_label: String,
    pub date: String,
    pub category: String,
    pub year_label: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum ConferenceListView {
    Empty,
    Items(Vec<ConferenceListItem>),
}

impl ConferenceListView {
    pub fn len(&self) -> usize {
        match self {
            ConferenceListView::Empty => 0,
            ConferenceListView::Items(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn conference_list_item(conference: &ConferenceDescriptor) -> ConferenceListItem {
    ConferenceListItem {
        id: conference.id.clone(),
        name: conference.name.clone(),
        count_label: format!("{} papers", conference.count),
        date: conference.date.clone(),
        category: conference.category.clone(),
        year_label: format!("Year: {}", conference.year),
        description: conference
            .description
            .as_ref()
            .filter(|d| !d.trim().is_empty())
            .cloned(),
    }
}

pub fn conference_list_view(catalog: &[ConferenceDescriptor]) -> ConferenceListView {
    if catalog.is_empty() {
        return ConferenceListView::Empty;
    }
    ConferenceListView::Items(catalog.iter().map(conference_list_item).collect())
}

pub const CRAWLER_README: &str = "specs/neurips-paper-crawler/README.md";

/// Content of the paper area when no paper list is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placeholder {
    Blank,
    Loading { name: String },
    /// A conference data file could not be loaded.
    LoadFailed { message: String, path: String },
    DailyLoadFailed { date: String, message: String, path: String },
    NoConferences { catalog_path: String },
}

impl Placeholder {
    pub fn headline(&self) -> String {
        match self {
            Placeholder::Blank => String::new(),
            Placeholder::Loading { name } => format!("Loading {name}..."),
            Placeholder::LoadFailed { .. } => "Failed to load conference papers".to_string(),
            Placeholder::DailyLoadFailed { date, .. } => {
                format!("Failed to load papers for {date}")
            }
            Placeholder::NoConferences { .. } => "No Conference Papers Available".to_string(),
        }
    }

    pub fn details(&self) -> Vec<String> {
        match self {
            Placeholder::Blank | Placeholder::Loading { .. } => Vec::new(),
            Placeholder::LoadFailed { message, path }
            | Placeholder::DailyLoadFailed { message, path, .. } => {
                vec![message.clone(), format!("File: {path}")]
            }
            Placeholder::NoConferences { catalog_path } => vec![
                format!("Add conferences to {catalog_path} to get started."),
                format!("See the NeurIPS Crawler README ({CRAWLER_README}) for instructions."),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PaperCard {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub summary: String,
    pub abs_url: Option<String>,
    pub pdf_url: Option<String>,
    pub categories: Vec<String>,
}

fn text_field(record: &PaperRecord, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn list_field(record: &PaperRecord, key: &str) -> Vec<String> {
    match record.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Lenient extraction: records are opaque, so every field falls back to a
/// default instead of failing.
pub fn paper_card(record: &PaperRecord) -> PaperCard {
    PaperCard {
        id: text_field(record, "id").unwrap_or_default(),
        title: text_field(record, "title").unwrap_or_else(|| "(untitled)".to_string()),
        authors: list_field(record, "authors"),
        summary: text_field(record, "summary").unwrap_or_default(),
        abs_url: text_field(record, "abs"),
        pdf_url: text_field(record, "pdf"),
        categories: list_field(record, "categories"),
    }
}

pub fn paper_cards(records: &[PaperRecord]) -> Vec<PaperCard> {
    records.iter().map(paper_card).collect()
}
