use std::collections::HashMap;

use shared::{domain::PaperRecord, error::ParseError};

/// Category key meaning "every paper of the loaded set".
pub const ALL_CATEGORY: &str = "all";

/// Parses a JSON-lines body. Whitespace-only lines are skipped; any other
/// line must hold exactly one JSON value.
pub fn parse_paper_lines(text: &str) -> Result<Vec<PaperRecord>, ParseError> {
    let mut papers = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = serde_json::from_str::<PaperRecord>(line)
            .map_err(|err| ParseError::new(idx + 1, err.to_string()))?;
        papers.push(record);
    }
    Ok(papers)
}

/// Shared paper store of the page: paper sets keyed by category, conference
/// id or date, plus the current selection.
#[derive(Debug, Clone, Default)]
pub struct PaperStore {
    pub paper_data: HashMap<String, Vec<PaperRecord>>,
    pub current_category: Option<String>,
    pub current_filtered_papers: Vec<PaperRecord>,
}

impl PaperStore {
    pub fn papers(&self, key: &str) -> Option<&[PaperRecord]> {
        self.paper_data.get(key).map(Vec::as_slice)
    }

    /// Stores `papers` under `key` and selects all of them for display.
    pub fn commit_all(&mut self, key: &str, papers: Vec<PaperRecord>) {
        self.current_category = Some(ALL_CATEGORY.to_string());
        self.current_filtered_papers = papers.clone();
        self.paper_data.insert(key.to_string(), papers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_and_whitespace_lines() {
        let papers = parse_paper_lines("{\"id\":1}\n\n   \n{\"id\":2}\n").expect("parse");
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[1]["id"], 2);
    }

    #[test]
    fn handles_crlf_line_endings() {
        let papers = parse_paper_lines("{\"id\":1}\r\n{\"id\":2}\r\n").expect("parse");
        assert_eq!(papers.len(), 2);
    }

    #[test]
    fn reports_one_based_line_of_malformed_record() {
        let err = parse_paper_lines("{\"id\":1}\n\n{\"id\":").expect_err("malformed");
        assert_eq!(err.line, 3);
        assert!(err.to_string().starts_with("line 3: "));
    }

    #[test]
    fn commit_all_selects_every_paper() {
        let mut store = PaperStore::default();
        let papers = parse_paper_lines("{\"id\":1}\n{\"id\":2}").expect("parse");
        store.commit_all("neurips2024", papers);
        assert_eq!(store.current_category.as_deref(), Some(ALL_CATEGORY));
        assert_eq!(store.current_filtered_papers.len(), 2);
        assert_eq!(store.papers("neurips2024").map(<[_]>::len), Some(2));
    }
}
