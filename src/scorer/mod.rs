//! Toxicity scoring.
//!
//! A [`ToxicityModel`] returns per-category scores for a piece of text; the
//! [`Scorer`] reduces them to a single severity in `[0, 1]`.

pub mod detoxify;
pub mod lexicon;

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::debug;

pub use detoxify::DetoxifyClient;
pub use lexicon::LexiconModel;

/// Sub-category name to score, e.g. `"insult" -> 0.71`.
pub type CategoryScores = BTreeMap<String, f64>;

/// Categories reported by the Detoxify "original" checkpoint.
pub const CATEGORIES: [&str; 6] = [
    "toxicity",
    "severe_toxicity",
    "obscene",
    "threat",
    "insult",
    "identity_attack",
];

#[async_trait]
pub trait ToxicityModel: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// True for rule-based fallbacks whose scores are not produced by a
    /// trained model.
    fn is_heuristic(&self) -> bool {
        false
    }

    async fn predict(&self, text: &str) -> Result<CategoryScores>;
}

/// Highest sub-category score, clamped to `[0, 1]`.
///
/// Non-finite values are skipped. An empty map scores 0.
pub fn severity(scores: &CategoryScores) -> f64 {
    scores
        .values()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max)
        .clamp(0.0, 1.0)
}

pub struct Scorer {
    model: Box<dyn ToxicityModel>,
}

impl Scorer {
    pub fn new(model: impl ToxicityModel + 'static) -> Self {
        Self {
            model: Box::new(model),
        }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn is_heuristic(&self) -> bool {
        self.model.is_heuristic()
    }

    pub async fn score(&self, text: &str) -> Result<f64> {
        let scores = self
            .model
            .predict(text)
            .await
            .with_context(|| format!("{} failed to score message", self.model.name()))?;
        debug!(?scores, "category scores");
        Ok(severity(&scores))
    }
}
