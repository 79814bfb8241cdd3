use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Messages scoring strictly above this are flagged as toxic.
pub const TOXIC_THRESHOLD: f64 = 0.5;

pub fn is_toxic(score: f64) -> bool {
    score > TOXIC_THRESHOLD
}

/// A chat message as it sits in the sample store, before scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub timestamp: DateTime<Utc>,
    pub sender: String,
    pub message: String,
}

impl Message {
    pub fn new(
        timestamp: DateTime<Utc>,
        sender: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            message: message.into(),
        }
    }
}

/// A message together with its toxicity score.
///
/// Only [`MessageRecord::scored`] builds one, so `is_toxic` always agrees
/// with `toxicity_score`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageRecord {
    pub timestamp: DateTime<Utc>,
    pub sender: String,
    pub message: String,
    pub toxicity_score: f64,
    pub is_toxic: bool,
}

impl MessageRecord {
    pub fn scored(message: Message, score: f64) -> Self {
        let toxicity_score = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 1.0)
        };

        Self {
            timestamp: message.timestamp,
            sender: message.sender,
            message: message.message,
            toxicity_score,
            is_toxic: is_toxic(toxicity_score),
        }
    }
}
