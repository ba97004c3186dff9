//! HTML fragments for the static page regions.

use crate::view::{ConferenceListView, PaperCard, Placeholder};

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn render_conference_list(view: &ConferenceListView) -> String {
    let items = match view {
        ConferenceListView::Empty => {
            return concat!(
                "<div class=\"conference-list-empty\">\n",
                "  <p>No conferences available</p>\n",
                "  <p>Add conferences to assets/conference-list.json</p>\n",
                "</div>\n"
            )
            .to_string();
        }
        ConferenceListView::Items(items) => items,
    };

    let mut out = String::new();
    for item in items {
        out.push_str(&format!(
            "<div class=\"conference-item\" data-id=\"{}\">\n",
            escape_html(&item.id)
        ));
        out.push_str("  <div class=\"conference-item-header\">\n");
        out.push_str(&format!(
            "    <div class=\"conference-item-name\">{}</div>\n",
            escape_html(&item.name)
        ));
        out.push_str(&format!(
            "    <div class=\"conference-item-count\">{}</div>\n",
            escape_html(&item.count_label)
        ));
        out.push_str("  </div>\n");
        out.push_str("  <div class=\"conference-item-meta\">\n");
        for meta in [&item.date, &item.category, &item.year_label] {
            out.push_str(&format!("    <span>{}</span>\n", escape_html(meta)));
        }
        out.push_str("  </div>\n");
        if let Some(description) = &item.description {
            out.push_str(&format!(
                "  <div class=\"conference-item-description\">{}</div>\n",
                escape_html(description)
            ));
        }
        out.push_str("</div>\n");
    }
    out
}

pub fn render_placeholder(placeholder: &Placeholder) -> String {
    let class = match placeholder {
        Placeholder::Blank => return String::new(),
        Placeholder::Loading { .. } => "loading-container",
        Placeholder::LoadFailed { .. } | Placeholder::DailyLoadFailed { .. } => "load-failed",
        Placeholder::NoConferences { .. } => "no-conferences",
    };
    let mut out = format!("<div class=\"{class}\">\n");
    if matches!(placeholder, Placeholder::Loading { .. }) {
        out.push_str("  <div class=\"loading-spinner\"></div>\n");
    }
    out.push_str(&format!(
        "  <p>{}</p>\n",
        escape_html(&placeholder.headline())
    ));
    for detail in placeholder.details() {
        out.push_str(&format!("  <p class=\"detail\">{}</p>\n", escape_html(&detail)));
    }
    out.push_str("</div>\n");
    out
}

pub fn render_paper_cards(cards: &[PaperCard]) -> String {
    let mut out = String::new();
    for card in cards {
        out.push_str(&format!(
            "<div class=\"paper-card\" data-id=\"{}\">\n",
            escape_html(&card.id)
        ));
        out.push_str(&format!(
            "  <div class=\"paper-card-title\">{}</div>\n",
            escape_html(&card.title)
        ));
        if !card.authors.is_empty() {
            out.push_str(&format!(
                "  <div class=\"paper-card-authors\">{}</div>\n",
                escape_html(&card.authors.join(", "))
            ));
        }
        if !card.summary.is_empty() {
            out.push_str(&format!(
                "  <div class=\"paper-card-summary\">{}</div>\n",
                escape_html(&card.summary)
            ));
        }
        out.push_str("</div>\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ConferenceListItem;

    #[test]
    fn escapes_catalog_text() {
        let view = ConferenceListView::Items(vec![ConferenceListItem {
            id: "x\"y".to_string(),
            name: "<b>ICML</b>".to_string(),
            count_label: "3 papers".to_string(),
            date: "2025-07-13".to_string(),
            category: "ML & AI".to_string(),
            year_label: "Year: 2025".to_string(),
            description: None,
        }]);
        let html = render_conference_list(&view);
        assert!(html.contains("data-id=\"x&quot;y\""));
        assert!(html.contains("&lt;b&gt;ICML&lt;/b&gt;"));
        assert!(html.contains("ML &amp; AI"));
        assert!(!html.contains("conference-item-description"));
    }

    #[test]
    fn failed_placeholder_lists_file_path() {
        let html = render_placeholder(&Placeholder::LoadFailed {
            message: "line 2: EOF while parsing".to_string(),
            path: "data/icml2025.jsonl".to_string(),
        });
        assert!(html.contains("File: data/icml2025.jsonl"));
        assert!(html.contains("line 2: EOF while parsing"));
    }
}
