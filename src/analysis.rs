//! Scoring pipeline and the aggregations the dashboard draws from.

use crate::message::MessageRecord;
use crate::scorer::Scorer;
use crate::store::SampleStore;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

/// Score every message in store order, one at a time.
///
/// The first classifier failure aborts the whole run.
pub async fn score_all(store: &SampleStore, scorer: &Scorer) -> Result<Vec<MessageRecord>> {
    if store.is_empty() {
        debug!("Nothing to score");
        return Ok(Vec::new());
    }

    let mut records = Vec::with_capacity(store.len());

    for message in store.messages() {
        let score = scorer.score(&message.message).await?;
        let record = MessageRecord::scored(message.clone(), score);
        info!(
            sender = %record.sender,
            score = record.toxicity_score,
            toxic = record.is_toxic,
            "{}",
            record.message
        );
        records.push(record);
    }

    Ok(records)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimePoint {
    pub timestamp: DateTime<Utc>,
    pub score: f64,
}

/// Score against timestamp, in record order.
pub fn score_over_time(records: &[MessageRecord]) -> Vec<TimePoint> {
    records
        .iter()
        .map(|r| TimePoint {
            timestamp: r.timestamp,
            score: r.toxicity_score,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SenderScores {
    pub sender: String,
    pub scores: Vec<f64>,
}

/// Scores grouped by sender. Senders appear in the order they first spoke.
pub fn scores_by_sender(records: &[MessageRecord]) -> Vec<SenderScores> {
    let mut groups: Vec<SenderScores> = Vec::new();

    for record in records {
        match groups.iter_mut().find(|g| g.sender == record.sender) {
            Some(group) => group.scores.push(record.toxicity_score),
            None => groups.push(SenderScores {
                sender: record.sender.clone(),
                scores: vec![record.toxicity_score],
            }),
        }
    }

    groups
}

/// Five-number summary plus a few counts, as a box plot would show it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    pub toxic_count: usize,
}

impl BoxStats {
    /// `None` for an empty slice.
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }

        let mut sorted = scores.to_vec();
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            count: sorted.len(),
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
            mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
            toxic_count: sorted.iter().filter(|&&s| crate::message::is_toxic(s)).count(),
        })
    }
}

/// Linear interpolation between closest ranks. `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

#[derive(Debug, Clone, Serialize)]
pub struct SenderSummary {
    pub sender: String,
    #[serde(flatten)]
    pub stats: BoxStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total: usize,
    pub toxic: usize,
    pub senders: Vec<SenderSummary>,
}

pub fn summarize(records: &[MessageRecord]) -> Summary {
    let senders = scores_by_sender(records)
        .into_iter()
        .filter_map(|group| {
            BoxStats::from_scores(&group.scores).map(|stats| SenderSummary {
                sender: group.sender,
                stats,
            })
        })
        .collect();

    Summary {
        total: records.len(),
        toxic: records.iter().filter(|r| r.is_toxic).count(),
        senders,
    }
}
