//! Analysis result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::PredictionBands;
use crate::models::NewsArticle;
use crate::sentiment::SentimentResult;
use crate::technical::TechnicalIndicators;

/// Discrete recommendation derived from the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prediction {
    Buy,
    Sell,
    Hold,
}

impl Prediction {
    /// Buy at or above `buy_at`, sell at or below `sell_at`, hold in between
    pub fn from_score(overall: u8, bands: &PredictionBands) -> Self {
        if overall >= bands.buy_at {
            Self::Buy
        } else if overall <= bands.sell_at {
            Self::Sell
        } else {
            Self::Hold
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Hold => "hold",
        })
    }
}

/// Seven-step recommendation on the confidence-adjusted score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecommendationStrength {
    StrongSell,
    Sell,
    WeakSell,
    Hold,
    WeakBuy,
    Buy,
    StrongBuy,
}

impl RecommendationStrength {
    pub fn from_score(overall: u8, confidence: f64) -> Self {
        let adjusted = f64::from(overall) * confidence;
        match adjusted {
            a if a >= 75.0 => Self::StrongBuy,
            a if a >= 65.0 => Self::Buy,
            a if a >= 55.0 => Self::WeakBuy,
            a if a >= 45.0 => Self::Hold,
            a if a >= 35.0 => Self::WeakSell,
            a if a >= 25.0 => Self::Sell,
            _ => Self::StrongSell,
        }
    }
}

impl fmt::Display for RecommendationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StrongBuy => "Strong Buy",
            Self::Buy => "Buy",
            Self::WeakBuy => "Weak Buy",
            Self::Hold => "Hold",
            Self::WeakSell => "Weak Sell",
            Self::Sell => "Sell",
            Self::StrongSell => "Strong Sell",
        })
    }
}

/// Display tier of a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreRating {
    Strong,
    Moderate,
    Weak,
}

impl ScoreRating {
    pub fn from_score(score: u8) -> Self {
        match score {
            70..=u8::MAX => Self::Strong,
            50..=69 => Self::Moderate,
            _ => Self::Weak,
        }
    }
}

impl fmt::Display for ScoreRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Weak => "weak",
        })
    }
}

/// Final analysis of one security
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub symbol: String,
    pub fundamental_score: u8,
    pub technical_score: u8,
    pub sentiment_score: u8,
    pub overall_score: u8,
    pub prediction: Prediction,
    /// Agreement of the three component scores, in [floor, 1]
    pub confidence: f64,
    pub reasons: Vec<String>,
}

impl AnalysisResult {
    pub fn recommendation_strength(&self) -> RecommendationStrength {
        RecommendationStrength::from_score(self.overall_score, self.confidence)
    }

    pub fn rating(&self) -> ScoreRating {
        ScoreRating::from_score(self.overall_score)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} {}/100 -> {} ({}, confidence {:.2})",
            self.symbol,
            self.overall_score,
            self.prediction,
            self.recommendation_strength(),
            self.confidence
        )
    }
}

/// Untruncated reasons per component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReasonBreakdown {
    pub fundamental: Vec<String>,
    pub technical: Vec<String>,
    pub sentiment: Vec<String>,
}

impl ReasonBreakdown {
    /// Reasons in reporting order, cut to `max`
    pub fn merged(&self, max: usize) -> Vec<String> {
        self.fundamental
            .iter()
            .chain(&self.technical)
            .chain(&self.sentiment)
            .take(max)
            .cloned()
            .collect()
    }
}

/// Result plus the intermediate values it was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub breakdown: ReasonBreakdown,
    /// Absent when history was too short for the indicator pipeline
    pub indicators: Option<TechnicalIndicators>,
    pub sentiment: SentimentResult,
    pub scored_articles: Vec<NewsArticle>,
    pub generated_at: DateTime<Utc>,
}

/// Several analyses side by side, best first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub symbols: Vec<String>,
    pub ranked: Vec<AnalysisResult>,
    /// Symbols that could not be analysed, with the reason
    pub failures: Vec<(String, String)>,
    pub timestamp: DateTime<Utc>,
}

impl ComparisonResult {
    pub fn new(symbols: Vec<String>) -> Self {
        Self {
            symbols,
            ranked: Vec::new(),
            failures: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Insert keeping descending overall score; ties keep arrival order
    pub fn add_analysis(&mut self, analysis: AnalysisResult) {
        let position = self
            .ranked
            .partition_point(|existing| existing.overall_score >= analysis.overall_score);
        self.ranked.insert(position, analysis);
    }

    pub fn add_failure(&mut self, symbol: impl Into<String>, reason: impl Into<String>) {
        self.failures.push((symbol.into(), reason.into()));
    }

    pub fn best(&self) -> Option<&AnalysisResult> {
        self.ranked.first()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.ranked.len() == self.symbols.len()
    }

    pub fn success_rate(&self) -> f64 {
        if self.symbols.is_empty() {
            return 0.0;
        }
        self.ranked.len() as f64 / self.symbols.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(symbol: &str, overall: u8) -> AnalysisResult {
        AnalysisResult {
            symbol: symbol.to_string(),
            fundamental_score: overall,
            technical_score: overall,
            sentiment_score: overall,
            overall_score: overall,
            prediction: Prediction::from_score(overall, &PredictionBands::default()),
            confidence: 1.0,
            reasons: Vec::new(),
        }
    }

    #[test]
    fn test_prediction_bands_exhaustive() {
        let bands = PredictionBands::default();
        for score in 0..=100u8 {
            let expected = match score {
                0..=40 => Prediction::Sell,
                41..=69 => Prediction::Hold,
                _ => Prediction::Buy,
            };
            assert_eq!(Prediction::from_score(score, &bands), expected, "score {score}");
        }
    }

    #[test]
    fn test_recommendation_strength() {
        assert_eq!(RecommendationStrength::from_score(80, 1.0), RecommendationStrength::StrongBuy);
        assert_eq!(RecommendationStrength::from_score(80, 0.85), RecommendationStrength::Buy);
        assert_eq!(RecommendationStrength::from_score(60, 1.0), RecommendationStrength::WeakBuy);
        assert_eq!(RecommendationStrength::from_score(50, 1.0), RecommendationStrength::Hold);
        assert_eq!(RecommendationStrength::from_score(80, 0.5), RecommendationStrength::WeakSell);
        assert_eq!(RecommendationStrength::from_score(30, 1.0), RecommendationStrength::Sell);
        assert_eq!(RecommendationStrength::from_score(60, 0.3), RecommendationStrength::StrongSell);
        assert_eq!(RecommendationStrength::StrongBuy.to_string(), "Strong Buy");
    }

    #[test]
    fn test_score_rating() {
        assert_eq!(ScoreRating::from_score(100), ScoreRating::Strong);
        assert_eq!(ScoreRating::from_score(70), ScoreRating::Strong);
        assert_eq!(ScoreRating::from_score(50), ScoreRating::Moderate);
        assert_eq!(ScoreRating::from_score(49), ScoreRating::Weak);
    }

    #[test]
    fn test_breakdown_merge_order_and_limit() {
        let breakdown = ReasonBreakdown {
            fundamental: vec!["f1".into(), "f2".into()],
            technical: vec!["t1".into()],
            sentiment: vec!["s1".into(), "s2".into()],
        };
        assert_eq!(breakdown.merged(4), vec!["f1", "f2", "t1", "s1"]);
        assert_eq!(breakdown.merged(8).len(), 5);
    }

    #[test]
    fn test_comparison_ranking() {
        let mut comparison = ComparisonResult::new(vec!["A".into(), "B".into(), "C".into()]);
        comparison.add_analysis(result("A", 55));
        comparison.add_analysis(result("B", 80));
        comparison.add_failure("C", "no data");

        assert_eq!(comparison.best().map(|r| r.symbol.as_str()), Some("B"));
        assert!(!comparison.is_complete());
        assert!((comparison.success_rate() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let json = serde_json::to_value(result("AAPL", 72)).unwrap();
        assert_eq!(json["overallScore"], 72);
        assert_eq!(json["prediction"], "buy");
    }
}
