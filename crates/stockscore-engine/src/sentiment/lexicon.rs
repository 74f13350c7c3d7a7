//! Finance vocabulary used for sentiment scoring

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "outstanding", "fantastic", "wonderful",
    "profit", "growth", "increase", "rise", "gain", "bull", "bullish", "strong",
    "upgrade", "buy", "recommend", "positive", "optimistic", "robust", "solid",
    "beat", "exceed", "outperform", "success", "successful", "milestone",
    "breakthrough", "achievement", "record", "high", "soar", "surge", "rally",
    "boom", "expansion", "innovative", "advance", "progress", "opportunity",
    "dividend", "earnings", "revenue", "sales", "launch", "partnership",
    "acquisition", "merger", "deal", "contract", "approval", "recovery",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "disappointing", "poor", "weak",
    "loss", "decline", "decrease", "fall", "drop", "bear", "bearish", "crash",
    "downgrade", "sell", "avoid", "negative", "pessimistic", "concern", "worry",
    "miss", "below", "underperform", "failure", "failed", "risk", "threat",
    "warning", "alert", "problem", "issue", "challenge", "difficulty", "crisis",
    "recession", "bankruptcy", "debt", "lawsuit", "investigation", "scandal",
    "volatile", "volatility", "uncertainty", "plunge", "tumble", "slump",
];

const INTENSIFIERS: &[&str] = &[
    "very", "extremely", "highly", "significantly", "substantially", "greatly",
    "tremendously", "remarkably", "exceptionally", "considerably", "dramatically",
];

/// Polarity of a single lexicon hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

/// Case-insensitive word sets
///
/// Words are stored lowercased; lookups expect lowercased tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
    intensifiers: HashSet<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(
            POSITIVE_WORDS.iter().copied(),
            NEGATIVE_WORDS.iter().copied(),
            INTENSIFIERS.iter().copied(),
        )
    }
}

impl Lexicon {
    pub fn new<P, N, I>(positive: P, negative: N, intensifiers: I) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        fn lower<T: AsRef<str>>(words: impl IntoIterator<Item = T>) -> HashSet<String> {
            words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect()
        }

        Self {
            positive: lower(positive),
            negative: lower(negative),
            intensifiers: lower(intensifiers),
        }
    }

    /// Polarity of a lowercased token, positive taking precedence
    pub fn polarity(&self, token: &str) -> Option<Polarity> {
        if self.positive.contains(token) {
            Some(Polarity::Positive)
        } else if self.negative.contains(token) {
            Some(Polarity::Negative)
        } else {
            None
        }
    }

    pub fn is_intensifier(&self, token: &str) -> bool {
        self.intensifiers.contains(token)
    }

    pub fn positive_len(&self) -> usize {
        self.positive.len()
    }

    pub fn negative_len(&self) -> usize {
        self.negative.len()
    }
}
