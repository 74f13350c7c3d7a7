//! Text and article sentiment scoring

use regex::Regex;
use std::sync::LazyLock;

use super::lexicon::Polarity;
use super::{SentimentConfig, SentimentResult};
use crate::models::NewsArticle;

/// Anything that is neither an ASCII word character nor whitespace
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\s]").expect("static pattern is valid"));

/// Lowercase, replace punctuation with spaces, split on whitespace and drop
/// tokens shorter than `min_len` characters
pub fn tokenize(text: &str, min_len: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .replace_all(&lowered, " ")
        .split_whitespace()
        .filter(|token| token.chars().count() >= min_len)
        .map(str::to_owned)
        .collect()
}

/// Score a piece of text against the lexicon
///
/// Each matching word adds +/-1 to the score and 0.5 to the magnitude, both
/// scaled by the intensifier weight when the previous token is an
/// intensifier. Totals are averaged over the matching words only, so text
/// with no lexicon hits is neutral with zero magnitude.
pub fn analyze_sentiment(text: &str, config: &SentimentConfig) -> SentimentResult {
    let tokens = tokenize(text, config.min_token_len);

    let mut score = 0.0;
    let mut magnitude = 0.0;
    let mut matched = 0usize;

    for (i, token) in tokens.iter().enumerate() {
        let Some(polarity) = config.lexicon.polarity(token) else {
            continue;
        };

        let weight = match i.checked_sub(1).map(|prev| tokens[prev].as_str()) {
            Some(prev) if config.lexicon.is_intensifier(prev) => config.intensifier_weight,
            _ => 1.0,
        };

        score += match polarity {
            Polarity::Positive => weight,
            Polarity::Negative => -weight,
        };
        magnitude += 0.5 * weight;
        matched += 1;
    }

    if matched == 0 {
        return SentimentResult::neutral();
    }

    let count = matched as f64;
    let score = (score / count).clamp(-1.0, 1.0);
    let magnitude = (magnitude / count).clamp(0.0, 1.0);

    SentimentResult {
        score,
        magnitude,
        sentiment: config.classify(score),
    }
}

/// Combined title/description sentiment of one article
///
/// The score is the weighted sum of the two parts, the magnitude the larger
/// of the two magnitudes.
pub fn analyze_article(article: &NewsArticle, config: &SentimentConfig) -> SentimentResult {
    let title = analyze_sentiment(&article.title, config);
    let description = analyze_sentiment(&article.description, config);

    let score = title.score * config.title_weight + description.score * config.description_weight;

    SentimentResult {
        score,
        magnitude: title.magnitude.max(description.magnitude),
        sentiment: config.classify(score),
    }
}

/// Copies of `articles` with `sentiment` and `sentiment_score` filled in
pub fn analyze_news(articles: &[NewsArticle], config: &SentimentConfig) -> Vec<NewsArticle> {
    articles
        .iter()
        .map(|article| {
            let result = analyze_article(article, config);
            NewsArticle {
                sentiment: Some(result.sentiment),
                sentiment_score: Some(result.score),
                ..article.clone()
            }
        })
        .collect()
}
