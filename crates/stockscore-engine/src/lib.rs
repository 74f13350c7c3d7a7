//! Stock scoring engine
//!
//! Scores an equity on a 0-100 scale from three independent views and blends
//! them into a single buy/hold/sell recommendation:
//!
//! - Fundamental scoring of valuation, leverage, profitability, liquidity and
//!   growth ratios against a threshold table
//! - Technical indicators (SMA, EMA, RSI, MACD, Bollinger Bands, support and
//!   resistance, volatility, trend) reduced to a score
//! - Lexicon-based news sentiment with recency weighting
//!
//! All scoring is pure and deterministic given its inputs and the reference
//! time. [`StockAnalysisEngine`] adds the async layer that fetches inputs from
//! a [`MarketDataSource`] and analyses several symbols concurrently.
//!
//! # Example
//!
//! ```rust,ignore
//! use stockscore_engine::{Analyzer, FundamentalRatios, Metric};
//!
//! let ratios = FundamentalRatios::new("VAL")
//!     .with(Metric::PeRatio, 12.0)
//!     .with(Metric::DebtToEquity, 0.2);
//!
//! let result = Analyzer::default().analyze_stock("VAL", &ratios, &[], &[]);
//! println!("{}", result.summary());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod fundamental;
pub mod models;
pub mod sentiment;
pub mod source;
pub mod technical;

pub use config::{
    CONFIG_ENV_VAR, ConfidencePolicy, EngineConfig, EngineConfigBuilder, PredictionBands,
    ScoreWeights, TechnicalConfig,
};
pub use engine::{
    AnalysisReport, AnalysisResult, Analyzer, ComparisonResult, Prediction, ReasonBreakdown,
    RecommendationStrength, ScoreRating, StockAnalysisEngine,
};
pub use error::{AnalysisError, Result};
pub use fundamental::{FundamentalRule, FundamentalScore, default_rules, score_fundamentals};
pub use models::{
    AnalysisSnapshot, FundamentalRatios, Metric, NewsArticle, PricePoint, SentimentLabel,
};
pub use sentiment::{SentimentConfig, SentimentResult};
pub use source::{InMemorySource, MarketDataSource, SnapshotDirectorySource};
pub use technical::TechnicalIndicators;
