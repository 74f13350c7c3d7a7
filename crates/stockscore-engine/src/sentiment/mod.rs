//! Lexicon-based news sentiment
//!
//! Scoring is deterministic: words are looked up in fixed finance
//! vocabularies, weighted by a preceding intensifier, and averaged over the
//! words that matched. Articles combine title and description, and a set of
//! articles is averaged with an exponential recency decay.

pub mod aggregator;
pub mod analyzer;
pub mod lexicon;

use serde::{Deserialize, Serialize};

use crate::models::SentimentLabel;

pub use aggregator::{
    aggregate_scored, calculate_overall_sentiment, calculate_overall_sentiment_at, recency_weight,
    sentiment_reasons, sentiment_to_score,
};
pub use analyzer::{analyze_article, analyze_news, analyze_sentiment, tokenize};
pub use lexicon::Lexicon;

/// Polarity and strength of a sentiment reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// -1 (most negative) to 1 (most positive)
    pub score: f64,
    /// 0 to 1, independent of polarity
    pub magnitude: f64,
    pub sentiment: SentimentLabel,
}

impl SentimentResult {
    /// The defined result for text or article sets with nothing to score
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// Tunables of the sentiment pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub lexicon: Lexicon,
    /// Weight applied to a word preceded by an intensifier
    pub intensifier_weight: f64,
    /// Tokens shorter than this are discarded
    pub min_token_len: usize,
    pub title_weight: f64,
    pub description_weight: f64,
    /// Scores above this are positive, below its negation negative
    pub classification_threshold: f64,
    /// e-folding time of the recency weight, in hours
    pub recency_decay_hours: f64,
    pub min_recency_weight: f64,
    /// Aggregate magnitude above which an extra "strong sentiment" reason is given
    pub strong_magnitude: f64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            lexicon: Lexicon::default(),
            intensifier_weight: 1.5,
            min_token_len: 3,
            title_weight: 0.7,
            description_weight: 0.3,
            classification_threshold: 0.1,
            recency_decay_hours: 48.0,
            min_recency_weight: 0.1,
            strong_magnitude: 0.6,
        }
    }
}

impl SentimentConfig {
    pub fn classify(&self, score: f64) -> SentimentLabel {
        SentimentLabel::classify(score, self.classification_threshold)
    }
}
