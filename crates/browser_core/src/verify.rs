//! Quality checks for conference JSON-lines files before they are published.

use serde::Serialize;
use serde_json::Value;
use shared::domain::PaperRecord;

pub const REQUIRED_FIELDS: [&str; 8] = [
    "id",
    "title",
    "authors",
    "summary",
    "abs",
    "pdf",
    "categories",
    "source",
];

#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    pub expected_source: Option<String>,
    pub id_prefix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordIssues {
    /// 1-based position among the parsed records.
    pub index: usize,
    pub id: Option<String>,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub total: usize,
    pub missing_pdf: usize,
    pub records: Vec<RecordIssues>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.records.is_empty()
    }

    pub fn with_pdf(&self) -> usize {
        self.total - self.missing_pdf
    }
}

fn type_issues(record: &PaperRecord, options: &VerifyOptions) -> Vec<String> {
    let mut issues = Vec::new();
    if !record["authors"].is_array() {
        issues.push("authors should be an array".to_string());
    }
    if !record["categories"].is_array() {
        issues.push("categories should be an array".to_string());
    }
    if let Some(comment) = record.get("comment") {
        if !(comment.is_null() || comment.is_string()) {
            issues.push("comment should be null or a string".to_string());
        }
    }
    if let Some(expected) = &options.expected_source {
        let actual = record["source"].as_str().unwrap_or_default();
        if actual != expected {
            issues.push(format!("source should be '{expected}', got '{actual}'"));
        }
    }
    if let Some(prefix) = &options.id_prefix {
        let id = record["id"].as_str().unwrap_or_default();
        if !id.starts_with(prefix.as_str()) {
            issues.push(format!("id '{id}' does not start with '{prefix}'"));
        }
    }
    issues
}

fn has_pdf(record: &PaperRecord) -> bool {
    match record.get("pdf") {
        Some(Value::String(s)) => !s.trim().is_empty(),
        _ => false,
    }
}

pub fn verify_records(records: &[PaperRecord], options: &VerifyOptions) -> VerifyReport {
    let mut report = VerifyReport {
        total: records.len(),
        ..VerifyReport::default()
    };
    for (idx, record) in records.iter().enumerate() {
        if !has_pdf(record) {
            report.missing_pdf += 1;
        }
        let id = record
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string);

        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| record.get(*field).is_none())
            .collect();
        let issues = if missing.is_empty() {
            type_issues(record, options)
        } else {
            vec![format!("missing fields: {}", missing.join(", "))]
        };
        if !issues.is_empty() {
            report.records.push(RecordIssues {
                index: idx + 1,
                id,
                issues,
            });
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete(id: &str, pdf: &str) -> PaperRecord {
        json!({
            "id": id,
            "title": "t",
            "authors": ["a"],
            "summary": "s",
            "abs": "https://neurips.cc/virtual/2024/oral/1",
            "pdf": pdf,
            "categories": ["NeurIPS"],
            "source": "neurips",
            "comment": null
        })
    }

    #[test]
    fn clean_records_pass_and_count_missing_pdfs() {
        let records = vec![
            complete("neurips2024_oral_1", "https://x/1.pdf"),
            complete("neurips2024_oral_2", ""),
        ];
        let report = verify_records(
            &records,
            &VerifyOptions {
                expected_source: Some("neurips".to_string()),
                id_prefix: Some("neurips2024_oral_".to_string()),
            },
        );
        assert!(report.is_clean());
        assert_eq!(report.total, 2);
        assert_eq!(report.missing_pdf, 1);
        assert_eq!(report.with_pdf(), 1);
    }

    #[test]
    fn missing_fields_skip_type_checks() {
        let report = verify_records(&[json!({"id": "x", "title": "t"})], &VerifyOptions::default());
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].id.as_deref(), Some("x"));
        assert_eq!(
            report.records[0].issues,
            vec!["missing fields: authors, summary, abs, pdf, categories, source"]
        );
    }

    #[test]
    fn flags_wrong_types_source_and_prefix() {
        let mut record = complete("icml_1", "p");
        record["authors"] = json!("a, b");
        record["comment"] = json!(3);
        record["source"] = json!("icml");
        let report = verify_records(
            &[record],
            &VerifyOptions {
                expected_source: Some("neurips".to_string()),
                id_prefix: Some("neurips2024_".to_string()),
            },
        );
        let issues = &report.records[0].issues;
        assert_eq!(issues.len(), 4);
        assert!(issues.contains(&"authors should be an array".to_string()));
        assert!(issues.contains(&"comment should be null or a string".to_string()));
    }
}
