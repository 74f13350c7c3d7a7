//! Recency-weighted aggregation over a set of articles

use chrono::{DateTime, Utc};

use super::analyzer::analyze_news;
use super::{SentimentConfig, SentimentResult};
use crate::models::{NewsArticle, SentimentLabel};

/// Weight of an article published `hours_ago` hours before the reference time
///
/// `exp(-hours / decay)`, floored at the configured minimum so that old
/// news still counts a little.
pub fn recency_weight(hours_ago: f64, config: &SentimentConfig) -> f64 {
    (-hours_ago / config.recency_decay_hours)
        .exp()
        .max(config.min_recency_weight)
}

/// Aggregate sentiment of `articles` relative to the current time
pub fn calculate_overall_sentiment(
    articles: &[NewsArticle],
    config: &SentimentConfig,
) -> SentimentResult {
    calculate_overall_sentiment_at(articles, config, Utc::now())
}

/// Aggregate sentiment of `articles` relative to `now`
///
/// An empty set yields the neutral zero result.
pub fn calculate_overall_sentiment_at(
    articles: &[NewsArticle],
    config: &SentimentConfig,
    now: DateTime<Utc>,
) -> SentimentResult {
    if articles.is_empty() {
        return SentimentResult::neutral();
    }
    aggregate_scored(&analyze_news(articles, config), config, now)
}

/// Aggregate articles whose `sentiment_score` is already filled in
///
/// Scores are averaged with [`recency_weight`]; the aggregate magnitude is
/// the weighted mean of absolute article scores. Unscored articles count as 0.
pub fn aggregate_scored(
    scored: &[NewsArticle],
    config: &SentimentConfig,
    now: DateTime<Utc>,
) -> SentimentResult {
    let (total_score, total_magnitude, total_weight) = scored.iter().fold(
        (0.0, 0.0, 0.0),
        |(score, magnitude, weight), article| {
            let article_score = article.sentiment_score.unwrap_or(0.0);
            let w = recency_weight(article.hours_since(now), config);
            (
                score + article_score * w,
                magnitude + article_score.abs() * w,
                weight + w,
            )
        },
    );

    let (score, magnitude) = if total_weight > 0.0 {
        (total_score / total_weight, total_magnitude / total_weight)
    } else {
        (0.0, 0.0)
    };

    tracing::debug!(
        articles = scored.len(),
        score,
        magnitude,
        "Aggregated news sentiment"
    );

    SentimentResult {
        score,
        magnitude,
        sentiment: config.classify(score),
    }
}

/// Map a sentiment reading onto 0-100
///
/// The score is rescaled from [-1, 1] to [0, 100] and then scaled by a
/// confidence multiplier of `0.5 + magnitude / 2`.
pub fn sentiment_to_score(result: &SentimentResult) -> u8 {
    let base = (result.score + 1.0) / 2.0 * 100.0;
    let confidence = 0.5 + result.magnitude * 0.5;
    (base * confidence).clamp(0.0, 100.0).round() as u8
}

/// Explanation lines for an aggregate reading over `article_count` articles
pub fn sentiment_reasons(
    result: &SentimentResult,
    article_count: usize,
    config: &SentimentConfig,
) -> Vec<String> {
    if article_count == 0 {
        return vec!["No recent news available for sentiment analysis".to_string()];
    }

    let strong = result.magnitude > config.strong_magnitude;
    match result.sentiment {
        SentimentLabel::Positive => {
            let mut reasons = vec![format!(
                "Positive news sentiment from {article_count} recent articles"
            )];
            if strong {
                reasons.push("Strong positive sentiment indicates market confidence".to_string());
            }
            reasons
        }
        SentimentLabel::Negative => {
            let mut reasons = vec![format!(
                "Negative news sentiment from {article_count} recent articles"
            )];
            if strong {
                reasons.push("Strong negative sentiment suggests market concerns".to_string());
            }
            reasons
        }
        SentimentLabel::Neutral => vec![format!(
            "Neutral news sentiment from {article_count} recent articles"
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const EPS: f64 = 1e-9;

    fn article(title: &str, hours_ago: i64, now: DateTime<Utc>) -> NewsArticle {
        NewsArticle::new(title, "", "Wire", now - Duration::hours(hours_ago))
    }

    #[test]
    fn test_empty_articles_are_neutral() {
        let result = calculate_overall_sentiment(&[], &SentimentConfig::default());
        assert_eq!(result.score, 0.0);
        assert_eq!(result.magnitude, 0.0);
        assert_eq!(result.sentiment, SentimentLabel::Neutral);
        // zero magnitude halves the neutral base; callers substitute their own fallback
        assert_eq!(sentiment_to_score(&result), 25);
    }

    #[test]
    fn test_aggregate_scored_matches_full_pipeline() {
        let config = SentimentConfig::default();
        let now = Utc::now();
        let articles = vec![article("Record profit", 3, now), article("Lawsuit risk", 30, now)];

        let scored = analyze_news(&articles, &config);
        assert_eq!(
            aggregate_scored(&scored, &config, now),
            calculate_overall_sentiment_at(&articles, &config, now)
        );
    }

    #[test]
    fn test_recency_weight() {
        let config = SentimentConfig::default();
        assert!((recency_weight(0.0, &config) - 1.0).abs() < EPS);
        assert!((recency_weight(48.0, &config) - (-1.0_f64).exp()).abs() < EPS);
        assert!((recency_weight(24.0 * 30.0, &config) - 0.1).abs() < EPS);
    }

    #[test]
    fn test_recent_articles_dominate() {
        let config = SentimentConfig::default();
        let now = Utc::now();
        let articles = vec![article("Stock surge", 0, now), article("Stock crash", 96, now)];

        let result = calculate_overall_sentiment_at(&articles, &config, now);
        // +0.7 at weight 1, -0.7 at weight e^-2
        let w = (-2.0_f64).exp();
        let expected = (0.7 - 0.7 * w) / (1.0 + w);
        assert!((result.score - expected).abs() < 1e-6);
        assert!((result.magnitude - 0.7).abs() < 1e-6);
        assert_eq!(result.sentiment, SentimentLabel::Positive);
    }

    #[test]
    fn test_old_articles_use_weight_floor() {
        let config = SentimentConfig::default();
        let now = Utc::now();
        let articles = vec![article("Shares soar", 1000, now), article("Shares plunge", 2000, now)];

        // both floored at 0.1, so they cancel
        let result = calculate_overall_sentiment_at(&articles, &config, now);
        assert!(result.score.abs() < EPS);
        assert_eq!(result.sentiment, SentimentLabel::Neutral);
    }

    #[test]
    fn test_sentiment_to_score_examples() {
        let score = |score: f64, magnitude: f64| {
            sentiment_to_score(&SentimentResult {
                score,
                magnitude,
                sentiment: SentimentLabel::classify(score, 0.1),
            })
        };
        assert_eq!(score(1.0, 1.0), 100);
        assert_eq!(score(1.0, 0.0), 50);
        assert_eq!(score(-1.0, 1.0), 0);
        assert_eq!(score(0.4, 0.5), 53);
    }

    #[test]
    fn test_sentiment_to_score_monotonic() {
        let at = |score: f64, magnitude: f64| {
            sentiment_to_score(&SentimentResult {
                score,
                magnitude,
                sentiment: SentimentLabel::Neutral,
            })
        };

        for m in [0.0, 0.3, 0.75, 1.0] {
            let mut previous = 0;
            for step in 0..=40_i32 {
                let s = -1.0 + f64::from(step) * 0.05;
                let current = at(s, m);
                assert!(current >= previous, "score {s} magnitude {m}");
                previous = current;
            }
        }

        for s in [0.05, 0.5, 1.0] {
            let mut previous = 0;
            for step in 0..=20_i32 {
                let m = f64::from(step) * 0.05;
                let current = at(s, m);
                assert!(current >= previous, "score {s} magnitude {m}");
                previous = current;
            }
        }
    }

    #[test]
    fn test_reasons() {
        let config = SentimentConfig::default();
        assert_eq!(
            sentiment_reasons(&SentimentResult::neutral(), 0, &config),
            vec!["No recent news available for sentiment analysis"]
        );

        let strong = SentimentResult {
            score: 0.8,
            magnitude: 0.8,
            sentiment: SentimentLabel::Positive,
        };
        assert_eq!(
            sentiment_reasons(&strong, 3, &config),
            vec![
                "Positive news sentiment from 3 recent articles",
                "Strong positive sentiment indicates market confidence",
            ]
        );

        let mild = SentimentResult {
            score: -0.3,
            magnitude: 0.3,
            sentiment: SentimentLabel::Negative,
        };
        assert_eq!(
            sentiment_reasons(&mild, 2, &config),
            vec!["Negative news sentiment from 2 recent articles"]
        );
    }
}
