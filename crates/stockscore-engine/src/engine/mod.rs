//! Stock Analysis Engine
//!
//! Combines the component analyses into a single scored recommendation

pub mod analysis_engine;
pub mod analyzer;
pub mod result;

pub use analysis_engine::StockAnalysisEngine;
pub use analyzer::{
    Analyzer, FALLBACK_SENTIMENT_SCORE, FALLBACK_TECHNICAL_SCORE, SentimentComponent,
    TechnicalComponent, confidence, overall_score,
};
pub use result::{
    AnalysisReport, AnalysisResult, ComparisonResult, Prediction, ReasonBreakdown,
    RecommendationStrength, ScoreRating,
};
