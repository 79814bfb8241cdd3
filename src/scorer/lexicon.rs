use super::{CategoryScores, ToxicityModel, CATEGORIES};
use anyhow::Result;
use async_trait::async_trait;

/// Score every category gets even with no matching phrase.
const BASELINE: f64 = 0.001;

/// (phrase, category, weight). Phrases are matched on word boundaries after
/// normalization.
const LEXICON: &[(&str, &str, f64)] = &[
    ("useless", "toxicity", 0.93),
    ("useless", "insult", 0.71),
    ("worthless", "toxicity", 0.90),
    ("worthless", "insult", 0.82),
    ("idiot", "toxicity", 0.95),
    ("idiot", "insult", 0.93),
    ("stupid", "toxicity", 0.90),
    ("stupid", "insult", 0.80),
    ("dumb", "toxicity", 0.85),
    ("dumb", "insult", 0.72),
    ("pathetic", "toxicity", 0.88),
    ("pathetic", "insult", 0.75),
    ("incompetent", "toxicity", 0.80),
    ("incompetent", "insult", 0.70),
    ("loser", "toxicity", 0.86),
    ("loser", "insult", 0.85),
    ("shut up", "toxicity", 0.85),
    ("hate", "toxicity", 0.80),
    ("unacceptable", "toxicity", 0.62),
    ("toxic", "toxicity", 0.58),
    ("can't you do anything right", "toxicity", 0.74),
    ("can't you do anything right", "insult", 0.42),
    ("not meeting expectations", "toxicity", 0.35),
    ("damn", "obscene", 0.50),
    ("crap", "obscene", 0.60),
    ("crap", "toxicity", 0.65),
    ("shit", "obscene", 0.90),
    ("shit", "toxicity", 0.92),
    ("fuck", "obscene", 0.97),
    ("fuck", "toxicity", 0.98),
    ("fuck", "severe_toxicity", 0.40),
    ("kill", "threat", 0.85),
    ("kill", "toxicity", 0.80),
    ("kill", "severe_toxicity", 0.30),
    ("hurt you", "threat", 0.80),
    ("destroy you", "threat", 0.75),
    ("watch your back", "threat", 0.70),
    ("your kind", "identity_attack", 0.60),
    ("people like you", "identity_attack", 0.45),
];

/// Offline fallback used when no classifier service is configured.
///
/// This is not a classifier and its output is not model output: the weights
/// are hand-picked heuristics. It matches a fixed phrase list and combines
/// the weights of every hit in a category as `1 - Π(1 - w)`, so scores stay in `[0, 1]` and grow with the
/// number of matches.
#[derive(Debug, Default, Clone)]
pub struct LexiconModel;

impl LexiconModel {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, text: &str) -> CategoryScores {
        let haystack = format!(" {} ", normalize(text));

        let mut misses: CategoryScores = CATEGORIES
            .iter()
            .map(|c| (c.to_string(), 1.0 - BASELINE))
            .collect();

        for &(phrase, category, weight) in LEXICON {
            if haystack.contains(&format!(" {} ", phrase)) {
                if let Some(miss) = misses.get_mut(category) {
                    *miss *= 1.0 - weight;
                }
            }
        }

        misses.into_iter().map(|(c, miss)| (c, 1.0 - miss)).collect()
    }
}

#[async_trait]
impl ToxicityModel for LexiconModel {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn is_heuristic(&self) -> bool {
        true
    }

    async fn predict(&self, text: &str) -> Result<CategoryScores> {
        Ok(self.classify(text))
    }
}

/// Lowercase, fold typographic apostrophes, and collapse everything that is
/// not a word character into single spaces.
fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' => '\'',
            c if c.is_alphanumeric() || c == '\'' => c,
            _ => ' ',
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
