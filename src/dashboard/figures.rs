//! Plotly figure descriptions. The browser does the drawing.

use crate::analysis::{score_over_time, scores_by_sender};
use crate::message::MessageRecord;
use serde::Serialize;
use serde_json::{json, Value};

/// Plotly's default qualitative colour sequence.
const PALETTE: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

const PLOT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct Figures {
    pub time: Figure,
    pub sender: Figure,
}

impl Figures {
    pub fn from_records(records: &[MessageRecord]) -> Self {
        Self {
            time: time_figure(records),
            sender: sender_figure(records),
        }
    }
}

/// Bar chart of score against timestamp.
pub fn time_figure(records: &[MessageRecord]) -> Figure {
    let points = score_over_time(records);
    let x: Vec<String> = points
        .iter()
        .map(|p| p.timestamp.format(PLOT_TIME_FORMAT).to_string())
        .collect();
    let y: Vec<f64> = points.iter().map(|p| p.score).collect();

    Figure {
        data: vec![json!({
            "type": "bar",
            "x": x,
            "y": y,
            "marker": { "color": PALETTE[0] },
            "hovertemplate": "timestamp=%{x}<br>Toxicity Score=%{y:.2f}<extra></extra>",
        })],
        layout: json!({
            "title": { "text": "Toxicity Level Over Time" },
            "xaxis": { "title": { "text": "timestamp" } },
            "yaxis": { "title": { "text": "Toxicity Score" }, "range": [0, 1] },
            "margin": { "t": 60 },
        }),
    }
}

/// One box trace per sender, coloured by sender.
pub fn sender_figure(records: &[MessageRecord]) -> Figure {
    let data = scores_by_sender(records)
        .into_iter()
        .enumerate()
        .map(|(i, group)| {
            let x = vec![group.sender.clone(); group.scores.len()];
            json!({
                "type": "box",
                "name": group.sender,
                "x": x,
                "y": group.scores,
                "marker": { "color": PALETTE[i % PALETTE.len()] },
                "boxpoints": "all",
                "jitter": 0,
                "pointpos": 0,
            })
        })
        .collect();

    Figure {
        data,
        layout: json!({
            "title": { "text": "Toxicity Distribution by Sender" },
            "xaxis": { "title": { "text": "sender" } },
            "yaxis": { "title": { "text": "toxicity_score" }, "range": [0, 1] },
            "legend": { "title": { "text": "sender" } },
            "boxmode": "overlay",
            "margin": { "t": 60 },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use chrono::{TimeZone, Utc};

    fn records() -> Vec<MessageRecord> {
        [("Alice", 0.1), ("Bob", 0.9), ("Alice", 0.3)]
            .iter()
            .zip(1u32..)
            .map(|(&(sender, score), day)| {
                let ts = Utc.with_ymd_and_hms(2023, 1, day, 0, 0, 0).unwrap();
                MessageRecord::scored(Message::new(ts, sender, "msg"), score)
            })
            .collect()
    }

    #[test]
    fn bar_chart_has_one_point_per_record() {
        let fig = time_figure(&records());
        assert_eq!(fig.data.len(), 1);
        assert_eq!(fig.data[0]["type"], "bar");
        assert_eq!(fig.data[0]["x"][0], "2023-01-01 00:00:00");
        assert_eq!(fig.data[0]["y"], json!([0.1, 0.9, 0.3]));
        assert_eq!(fig.layout["title"]["text"], "Toxicity Level Over Time");
        assert_eq!(fig.layout["yaxis"]["title"]["text"], "Toxicity Score");
    }

    #[test]
    fn box_plot_has_one_trace_per_sender() {
        let fig = sender_figure(&records());
        assert_eq!(fig.data.len(), 2);
        assert_eq!(fig.data[0]["name"], "Alice");
        assert_eq!(fig.data[0]["y"], json!([0.1, 0.3]));
        assert_eq!(fig.data[1]["name"], "Bob");
        assert_ne!(fig.data[0]["marker"]["color"], fig.data[1]["marker"]["color"]);
        assert_eq!(fig.layout["title"]["text"], "Toxicity Distribution by Sender");
    }

    #[test]
    fn empty_records_give_empty_traces() {
        let figs = Figures::from_records(&[]);
        assert_eq!(figs.time.data[0]["x"], json!([]));
        assert!(figs.sender.data.is_empty());
    }
}
