use serde::{Deserialize, Serialize};

/// One paper as stored in a JSON-lines data file. The schema belongs to the
/// rendering side; loaders treat it as an opaque object.
pub type PaperRecord = serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Daily,
    Conference,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Daily => "daily",
            ViewMode::Conference => "conference",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceDescriptor {
    pub id: String,
    pub name: String,
    pub file: String,
    pub date: String,
    pub category: String,
    pub year: i64,
    pub count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Wire shape of `assets/conference-list.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub conferences: Vec<ConferenceDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_without_conferences_key_is_empty() {
        let parsed: CatalogFile = serde_json::from_str("{}").expect("parse");
        assert!(parsed.conferences.is_empty());
    }

    #[test]
    fn descriptor_description_is_optional() {
        let raw = r#"{"id":"neurips2024","name":"NeurIPS 2024","file":"neurips2024.jsonl",
            "date":"2024-12-10","category":"ML","year":2024,"count":61}"#;
        let parsed: ConferenceDescriptor = serde_json::from_str(raw).expect("parse");
        assert_eq!(parsed.id, "neurips2024");
        assert_eq!(parsed.year, 2024);
        assert_eq!(parsed.description, None);
    }
}
