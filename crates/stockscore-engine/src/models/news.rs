//! News articles and sentiment labels

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Polarity bucket of a sentiment score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl SentimentLabel {
    /// Positive above `threshold`, negative below `-threshold`, neutral otherwise
    pub fn classify(score: f64, threshold: f64) -> Self {
        if score > threshold {
            Self::Positive
        } else if score < -threshold {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        })
    }
}

/// A news item about a security
///
/// `sentiment` and `sentiment_score` are derived by the sentiment analyzer
/// and are absent on provider input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
}

impl NewsArticle {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        source: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: None,
            published_at,
            source: source.into(),
            sentiment: None,
            sentiment_score: None,
        }
    }

    /// Hours elapsed between publication and `now`; negative for future dates
    pub fn hours_since(&self, now: DateTime<Utc>) -> f64 {
        (now - self.published_at).num_milliseconds() as f64 / 3_600_000.0
    }
}
