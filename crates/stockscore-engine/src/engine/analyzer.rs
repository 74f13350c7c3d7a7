//! Aggregation of the fundamental, technical and sentiment analyses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::result::{AnalysisReport, AnalysisResult, Prediction, ReasonBreakdown};
use crate::config::{ConfidencePolicy, EngineConfig, ScoreWeights};
use crate::fundamental::{FundamentalScore, score_fundamentals};
use crate::models::{AnalysisSnapshot, FundamentalRatios, NewsArticle, PricePoint};
use crate::sentiment::{
    SentimentResult, aggregate_scored, analyze_news, sentiment_reasons, sentiment_to_score,
};
use crate::technical::{
    TechnicalIndicators, calculate_indicators, technical_reasons, technical_to_score,
};

/// Score used when the technical analysis cannot run
pub const FALLBACK_TECHNICAL_SCORE: u8 = 50;
/// Score used when there is no news to analyse
pub const FALLBACK_SENTIMENT_SCORE: u8 = 50;
const INSUFFICIENT_HISTORY_REASON: &str = "Insufficient historical data for technical analysis";

/// Technical half of an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalComponent {
    pub score: u8,
    pub reasons: Vec<String>,
    pub indicators: Option<TechnicalIndicators>,
}

impl TechnicalComponent {
    fn fallback() -> Self {
        Self {
            score: FALLBACK_TECHNICAL_SCORE,
            reasons: vec![INSUFFICIENT_HISTORY_REASON.to_string()],
            indicators: None,
        }
    }
}

/// Sentiment half of an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentComponent {
    pub score: u8,
    pub reasons: Vec<String>,
    pub result: SentimentResult,
    pub scored_articles: Vec<NewsArticle>,
}

/// Weighted blend of the three component scores, rounded
pub fn overall_score(fundamental: u8, technical: u8, sentiment: u8, weights: &ScoreWeights) -> u8 {
    let blended = f64::from(fundamental) * weights.fundamental
        + f64::from(technical) * weights.technical
        + f64::from(sentiment) * weights.sentiment;
    blended.round().clamp(0.0, 100.0) as u8
}

/// Highest confidence reported when the component scores differ at all
const MAX_SPREAD_CONFIDENCE: f64 = 0.99;

/// Agreement between component scores
///
/// `1 - variance / scale` of the population variance, clamped to the policy
/// bounds and rounded to two decimals. Only identical scores reach 1.0.
pub fn confidence(scores: &[u8], policy: &ConfidencePolicy) -> f64 {
    if scores.is_empty() {
        return policy.floor;
    }
    let n = scores.len() as f64;
    let mean = scores.iter().map(|&s| f64::from(s)).sum::<f64>() / n;
    let variance = scores
        .iter()
        .map(|&s| (f64::from(s) - mean).powi(2))
        .sum::<f64>()
        / n;

    let raw = (1.0 - variance / policy.variance_scale).clamp(policy.floor, policy.ceiling);
    let rounded = (raw * 100.0).round() / 100.0;
    // full confidence is reserved for identical scores
    if variance > 0.0 && rounded >= 1.0 {
        return MAX_SPREAD_CONFIDENCE;
    }
    rounded
}

/// Runs and combines the three analyses under one configuration
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: Arc<EngineConfig>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Arc::new(EngineConfig::default()))
    }
}

impl Analyzer {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyse one security as of now
    pub fn analyze_stock(
        &self,
        symbol: &str,
        fundamentals: &FundamentalRatios,
        price_history: &[PricePoint],
        articles: &[NewsArticle],
    ) -> AnalysisResult {
        self.analyze_stock_at(symbol, fundamentals, price_history, articles, Utc::now())
    }

    /// Analyse one security with news recency measured from `now`
    pub fn analyze_stock_at(
        &self,
        symbol: &str,
        fundamentals: &FundamentalRatios,
        price_history: &[PricePoint],
        articles: &[NewsArticle],
        now: DateTime<Utc>,
    ) -> AnalysisResult {
        self.analyze_detailed_at(symbol, fundamentals, price_history, articles, now)
            .result
    }

    pub fn analyze_snapshot(&self, snapshot: &AnalysisSnapshot) -> AnalysisResult {
        self.analyze_stock(
            &snapshot.symbol,
            &snapshot.fundamentals,
            &snapshot.price_history,
            &snapshot.articles,
        )
    }

    pub fn analyze_detailed(
        &self,
        symbol: &str,
        fundamentals: &FundamentalRatios,
        price_history: &[PricePoint],
        articles: &[NewsArticle],
    ) -> AnalysisReport {
        self.analyze_detailed_at(symbol, fundamentals, price_history, articles, Utc::now())
    }

    /// Full analysis including the intermediate values
    pub fn analyze_detailed_at(
        &self,
        symbol: &str,
        fundamentals: &FundamentalRatios,
        price_history: &[PricePoint],
        articles: &[NewsArticle],
        now: DateTime<Utc>,
    ) -> AnalysisReport {
        debug!(
            symbol,
            bars = price_history.len(),
            articles = articles.len(),
            "Starting analysis"
        );

        let fundamental = self.fundamental_component(fundamentals);
        let technical = self.technical_component(price_history);
        let sentiment = self.sentiment_component(articles, now);

        self.assemble(symbol, fundamental, technical, sentiment, now)
    }

    pub fn fundamental_component(&self, fundamentals: &FundamentalRatios) -> FundamentalScore {
        score_fundamentals(fundamentals, &self.config.fundamental)
    }

    /// Indicator scoring, or the neutral fallback when history is too short
    pub fn technical_component(&self, price_history: &[PricePoint]) -> TechnicalComponent {
        let technical = &self.config.technical;
        if price_history.len() <= technical.min_history {
            debug!(
                bars = price_history.len(),
                required = technical.min_history + 1,
                "Price history too short, using technical fallback"
            );
            return TechnicalComponent::fallback();
        }

        let indicators = match calculate_indicators(price_history) {
            Ok(indicators) => indicators,
            Err(err) => {
                warn!(error = %err, "Indicator pipeline failed, using technical fallback");
                return TechnicalComponent::fallback();
            }
        };

        let current_price = price_history
            .last()
            .map_or(0.0, |point| point.close);

        TechnicalComponent {
            score: technical_to_score(&indicators, current_price, &technical.weights),
            reasons: technical_reasons(&indicators, current_price, &technical.weights),
            indicators: Some(indicators),
        }
    }

    /// Aggregate news sentiment, or the neutral fallback when there is no news
    pub fn sentiment_component(
        &self,
        articles: &[NewsArticle],
        now: DateTime<Utc>,
    ) -> SentimentComponent {
        let config = &self.config.sentiment;

        if articles.is_empty() {
            debug!("No articles, using sentiment fallback");
            return SentimentComponent {
                score: FALLBACK_SENTIMENT_SCORE,
                reasons: sentiment_reasons(&SentimentResult::neutral(), 0, config),
                result: SentimentResult::neutral(),
                scored_articles: Vec::new(),
            };
        }

        let scored_articles = analyze_news(articles, config);
        let result = aggregate_scored(&scored_articles, config, now);

        SentimentComponent {
            score: sentiment_to_score(&result),
            reasons: sentiment_reasons(&result, articles.len(), config),
            result,
            scored_articles,
        }
    }

    /// Combine component outputs into the final report
    pub fn assemble(
        &self,
        symbol: &str,
        fundamental: FundamentalScore,
        technical: TechnicalComponent,
        sentiment: SentimentComponent,
        now: DateTime<Utc>,
    ) -> AnalysisReport {
        let config = &self.config;

        let overall = overall_score(
            fundamental.score,
            technical.score,
            sentiment.score,
            &config.weights,
        );
        let prediction = Prediction::from_score(overall, &config.prediction);
        let confidence = confidence(
            &[fundamental.score, technical.score, sentiment.score],
            &config.confidence,
        );

        let breakdown = ReasonBreakdown {
            fundamental: fundamental.reasons,
            technical: technical.reasons,
            sentiment: sentiment.reasons,
        };

        let result = AnalysisResult {
            symbol: symbol.to_string(),
            fundamental_score: fundamental.score,
            technical_score: technical.score,
            sentiment_score: sentiment.score,
            overall_score: overall,
            prediction,
            confidence,
            reasons: breakdown.merged(config.max_reasons),
        };

        info!(
            symbol,
            fundamental = result.fundamental_score,
            technical = result.technical_score,
            sentiment = result.sentiment_score,
            overall = result.overall_score,
            prediction = %result.prediction,
            confidence = result.confidence,
            "Analysis complete"
        );

        AnalysisReport {
            result,
            breakdown,
            indicators: technical.indicators,
            sentiment: sentiment.result,
            scored_articles: sentiment.scored_articles,
            generated_at: now,
        }
    }
}
