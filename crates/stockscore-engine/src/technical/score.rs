//! Technical indicator scoring

use serde::{Deserialize, Serialize};

use super::indicators::{TechnicalIndicators, Trend};

/// Adjustments and thresholds used by [`technical_to_score`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalWeights {
    /// RSI below this is oversold
    pub rsi_oversold: f64,
    /// RSI above this is overbought
    pub rsi_overbought: f64,
    /// RSI strictly between the two thresholds
    pub rsi_healthy: i32,
    pub rsi_oversold_adjustment: i32,
    pub rsi_overbought_adjustment: i32,
    /// Applied as +/- depending on whether SMA20 is above SMA50
    pub ma_crossover: i32,
    pub price_above_sma20: i32,
    pub price_above_sma50: i32,
    /// Applied as +/- depending on whether MACD is above its signal
    pub macd_crossover: i32,
    /// Applied as +/- for a bullish / bearish trend
    pub trend: i32,
    /// Annualized volatility (percent) above which the penalty applies
    pub high_volatility: f64,
    pub volatility_adjustment: i32,
}

impl Default for TechnicalWeights {
    fn default() -> Self {
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            rsi_healthy: 10,
            rsi_oversold_adjustment: 15,
            rsi_overbought_adjustment: -15,
            ma_crossover: 15,
            price_above_sma20: 10,
            price_above_sma50: 5,
            macd_crossover: 10,
            trend: 20,
            high_volatility: 50.0,
            volatility_adjustment: -5,
        }
    }
}

/// Score an indicator set on 0-100, starting from a neutral 50
pub fn technical_to_score(
    indicators: &TechnicalIndicators,
    current_price: f64,
    weights: &TechnicalWeights,
) -> u8 {
    let mut score: i32 = 50;

    let rsi = indicators.rsi;
    if rsi > weights.rsi_oversold && rsi < weights.rsi_overbought {
        score += weights.rsi_healthy;
    } else if rsi < weights.rsi_oversold {
        score += weights.rsi_oversold_adjustment;
    } else if rsi > weights.rsi_overbought {
        score += weights.rsi_overbought_adjustment;
    }

    score += if indicators.sma20 > indicators.sma50 {
        weights.ma_crossover
    } else {
        -weights.ma_crossover
    };

    if current_price > indicators.sma20 {
        score += weights.price_above_sma20;
    }
    if current_price > indicators.sma50 {
        score += weights.price_above_sma50;
    }

    score += if indicators.macd > indicators.macd_signal {
        weights.macd_crossover
    } else {
        -weights.macd_crossover
    };

    score += match indicators.trend {
        Trend::Bullish => weights.trend,
        Trend::Bearish => -weights.trend,
        Trend::Neutral => 0,
    };

    if indicators.volatility > weights.high_volatility {
        score += weights.volatility_adjustment;
    }

    score.clamp(0, 100) as u8
}

/// Narrative reasons for an indicator set, in a fixed order:
/// RSI band, MA crossover, price vs MAs (when decisive), MACD, trend.
pub fn technical_reasons(
    indicators: &TechnicalIndicators,
    current_price: f64,
    weights: &TechnicalWeights,
) -> Vec<String> {
    let mut reasons = Vec::with_capacity(5);

    reasons.push(if indicators.rsi < weights.rsi_oversold {
        "RSI indicates oversold conditions, potential buying opportunity"
    } else if indicators.rsi > weights.rsi_overbought {
        "RSI shows overbought conditions, may face selling pressure"
    } else {
        "RSI in healthy range, no extreme momentum signals"
    });

    reasons.push(if indicators.sma20 > indicators.sma50 {
        "Short-term trend bullish with 20-day MA above 50-day MA"
    } else {
        "Short-term trend bearish with 20-day MA below 50-day MA"
    });

    if current_price > indicators.sma20 && current_price > indicators.sma50 {
        reasons.push("Price trading above key moving averages, showing strength");
    } else if current_price < indicators.sma20 && current_price < indicators.sma50 {
        reasons.push("Price below key moving averages, indicating weakness");
    }

    reasons.push(if indicators.macd > indicators.macd_signal {
        "MACD bullish crossover suggests upward momentum"
    } else {
        "MACD bearish signal indicates potential downward pressure"
    });

    reasons.push(match indicators.trend {
        Trend::Bullish => "Overall technical trend is bullish",
        Trend::Bearish => "Overall technical trend is bearish",
        Trend::Neutral => "Technical trend is neutral, lacking clear direction",
    });

    reasons.into_iter().map(String::from).collect()
}
