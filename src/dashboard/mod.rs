//! The dashboard page: two charts and a message table, rendered once from
//! the scored records.

pub mod figures;

use crate::analysis::{summarize, Summary};
use crate::message::MessageRecord;
use anyhow::{Context, Result};
use axum::body::Bytes;
use handlebars::Handlebars;
use serde::Serialize;

pub use figures::Figures;

pub const TITLE: &str = "Workplace Toxicity Monitor";

const PAGE_TEMPLATE: &str = include_str!("page.hbs");
const TABLE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Serialize)]
struct Row<'a> {
    timestamp: String,
    sender: &'a str,
    message: &'a str,
    score: String,
    toxic: bool,
}

#[derive(Serialize)]
struct PageContext<'a> {
    title: &'a str,
    time_figure: String,
    sender_figure: String,
    rows: Vec<Row<'a>>,
}

/// Everything the HTTP layer serves, computed up front.
#[derive(Debug, Clone)]
pub struct Dashboard {
    records: Vec<MessageRecord>,
    figures: Figures,
    summary: Summary,
    page: Bytes,
}

impl Dashboard {
    pub fn build(records: Vec<MessageRecord>) -> Result<Self> {
        let figures = Figures::from_records(&records);
        let summary = summarize(&records);
        let page = Bytes::from(render_page(&records, &figures)?);

        Ok(Self {
            records,
            figures,
            summary,
            page,
        })
    }

    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    pub fn figures(&self) -> &Figures {
        &self.figures
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Rendered HTML. Clones share one buffer.
    pub fn page(&self) -> Bytes {
        self.page.clone()
    }
}

fn render_page(records: &[MessageRecord], figures: &Figures) -> Result<String> {
    let rows = records
        .iter()
        .map(|r| Row {
            timestamp: r.timestamp.format(TABLE_TIME_FORMAT).to_string(),
            sender: &r.sender,
            message: &r.message,
            score: format!("{:.2}", r.toxicity_score),
            toxic: r.is_toxic,
        })
        .collect();

    let context = PageContext {
        title: TITLE,
        time_figure: script_json(&figures.time)?,
        sender_figure: script_json(&figures.sender)?,
        rows,
    };

    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars
        .render_template(PAGE_TEMPLATE, &context)
        .context("Failed to render dashboard template")
}

/// JSON that can sit inside a `<script>` element without closing it early.
fn script_json(value: &impl Serialize) -> Result<String> {
    let json = serde_json::to_string(value).context("Failed to serialize figure")?;
    Ok(json.replace('<', "\\u003c"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use chrono::{TimeZone, Utc};

    fn record(day: u32, sender: &str, text: &str, score: f64) -> MessageRecord {
        let ts = Utc.with_ymd_and_hms(2023, 1, day, 0, 0, 0).unwrap();
        MessageRecord::scored(Message::new(ts, sender, text), score)
    }

    fn html(dashboard: &Dashboard) -> String {
        String::from_utf8(dashboard.page().to_vec()).unwrap()
    }

    #[test]
    fn page_contains_title_charts_and_rows() {
        let dashboard = Dashboard::build(vec![
            record(1, "Alice", "Great work team!", 0.0012),
            record(8, "Bob", "You're useless", 0.93),
        ])
        .unwrap();
        let html = html(&dashboard);

        assert!(html.contains("<h1>Workplace Toxicity Monitor</h1>"));
        assert!(html.contains("Message Details"));
        assert!(html.contains("id=\"fig-time\""));
        assert!(html.contains("id=\"fig-sender\""));
        assert!(html.contains("<td>2023-01-01 00:00</td>"));
        assert!(html.contains("<td>2023-01-08 00:00</td>"));
        assert!(html.contains("<td>0.00</td>"));
        assert!(html.contains("<td>0.93</td>"));
        assert!(html.contains("Toxicity Level Over Time"));
        assert!(html.contains("Toxicity Distribution by Sender"));
    }

    #[test]
    fn toxic_rows_are_highlighted() {
        let dashboard = Dashboard::build(vec![
            record(1, "Alice", "fine", 0.1),
            record(2, "Bob", "bad", 0.9),
        ])
        .unwrap();
        assert_eq!(html(&dashboard).matches("<tr class=\"toxic\">").count(), 1);
    }

    #[test]
    fn message_text_is_escaped() {
        let dashboard = Dashboard::build(vec![record(
            1,
            "<b>Mallory</b>",
            "</script><script>alert(1)</script>",
            0.2,
        )])
        .unwrap();
        let html = html(&dashboard);

        assert!(html.contains("&lt;b&gt;Mallory"));
        assert!(!html.contains("<b>Mallory"));
        // Exactly the two closing tags the template itself writes.
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn script_json_cannot_close_tag() {
        let out = script_json(&serde_json::json!({ "name": "</script>" })).unwrap();
        assert!(!out.contains('<'));
        let back: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(back["name"], "</script>");
    }

    #[test]
    fn exposes_precomputed_views() {
        let dashboard = Dashboard::build(vec![
            record(1, "Alice", "a", 0.2),
            record(2, "Alice", "b", 0.8),
        ])
        .unwrap();
        assert_eq!(dashboard.records().len(), 2);
        assert_eq!(dashboard.summary().toxic, 1);
        assert_eq!(dashboard.figures().sender.data.len(), 1);
    }

    #[test]
    fn page_is_shared_not_copied() {
        let dashboard = Dashboard::build(vec![record(1, "Alice", "a", 0.2)]).unwrap();
        let first = dashboard.page();
        let second = dashboard.page();
        assert_eq!(first.as_ptr(), second.as_ptr());
        assert_eq!(first.len(), second.len());
    }
}
