//! Price-series technical analysis
//!
//! `indicators` holds the pure indicator math; `score` turns a computed
//! indicator set into a 0-100 score and narrative reasons.

pub mod indicators;
pub mod score;

pub use indicators::{
    BollingerBands, Macd, SupportResistance, TechnicalIndicators, Trend, bollinger_bands,
    calculate_indicators, ema, macd, rsi, sma, support_resistance, trend, volatility,
};
pub use score::{TechnicalWeights, technical_reasons, technical_to_score};
