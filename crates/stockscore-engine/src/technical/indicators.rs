//! Technical indicator calculations
//!
//! Every function degrades to a documented sentinel when the history is
//! shorter than the indicator needs. Only [`calculate_indicators`] fails,
//! and only for an empty series.

use serde::{Deserialize, Serialize};
use std::fmt;
use ta::{
    Next,
    indicators::{ExponentialMovingAverage, SimpleMovingAverage, StandardDeviation},
};

use crate::error::{AnalysisError, Result};
use crate::models::price::{PricePoint, closes, is_chronological};

/// Default RSI lookback
pub const RSI_PERIOD: usize = 14;
/// Default Bollinger lookback
pub const BOLLINGER_PERIOD: usize = 20;
/// Default Bollinger band width in standard deviations
pub const BOLLINGER_STD_DEV: f64 = 2.0;
/// Default volatility lookback
pub const VOLATILITY_PERIOD: usize = 20;
/// Sessions per year used to annualize volatility
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
/// Signal line approximation: signal = MACD x this factor
pub const MACD_SIGNAL_FACTOR: f64 = 0.9;

/// Direction of the prevailing price trend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macd {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportResistance {
    pub support: f64,
    pub resistance: f64,
}

/// Full indicator set for one price series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalIndicators {
    pub sma20: f64,
    pub sma50: f64,
    pub ema12: f64,
    pub ema26: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,
    pub bollinger: BollingerBands,
    pub support: f64,
    pub resistance: f64,
    pub trend: Trend,
    pub volatility: f64,
}

/// Mean of the last `period` prices, or 0 when fewer are available
pub fn sma(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period {
        return 0.0;
    }
    let Ok(mut indicator) = SimpleMovingAverage::new(period) else {
        return 0.0;
    };
    prices[prices.len() - period..]
        .iter()
        .fold(0.0, |_, &price| indicator.next(price))
}

/// Exponential moving average over the whole history
///
/// Seeded with the first price, then `ema = price * k + ema * (1 - k)` with
/// `k = 2 / (period + 1)`. Returns 0 for an empty series.
pub fn ema(prices: &[f64], period: usize) -> f64 {
    let Some(&first) = prices.first() else {
        return 0.0;
    };
    match ExponentialMovingAverage::new(period) {
        Ok(mut indicator) => prices.iter().fold(first, |_, &price| indicator.next(price)),
        // period 0 gives k = 2; keep the recurrence defined rather than failing
        Err(_) => prices[1..]
            .iter()
            .fold(first, |acc, &price| price * 2.0 - acc),
    }
}

/// Wilder-smoothed relative strength index
///
/// Returns the neutral 50 while fewer than `period + 1` prices exist, and
/// 100 when the smoothed average loss is exactly zero.
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period + 1 {
        return 50.0;
    }

    let changes: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
    let periods = period as f64;

    let (gains, losses) = changes[..period]
        .iter()
        .fold((0.0, 0.0), |(gain, loss), &change| {
            if change > 0.0 {
                (gain + change, loss)
            } else {
                (gain, loss + change.abs())
            }
        });

    let mut avg_gain = gains / periods;
    let mut avg_loss = losses / periods;

    for &change in &changes[period..] {
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        avg_gain = (avg_gain * (periods - 1.0) + gain) / periods;
        avg_loss = (avg_loss * (periods - 1.0) + loss) / periods;
    }

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// MACD line from EMA12 and EMA26
///
/// No MACD history is retained, so the signal line is approximated as
/// `MACD_SIGNAL_FACTOR * macd` rather than a 9-period EMA of the MACD line.
pub fn macd(prices: &[f64]) -> Macd {
    let line = ema(prices, 12) - ema(prices, 26);
    let signal = line * MACD_SIGNAL_FACTOR;
    Macd {
        macd: line,
        signal,
        histogram: line - signal,
    }
}

/// Bands at `std_dev` population standard deviations around SMA(`period`)
///
/// With fewer than `period` prices the outer bands are 0 and the middle is
/// whatever [`sma`] reports (also 0).
pub fn bollinger_bands(prices: &[f64], period: usize, std_dev: f64) -> BollingerBands {
    let middle = sma(prices, period);
    if period == 0 || prices.len() < period {
        return BollingerBands {
            upper: 0.0,
            middle,
            lower: 0.0,
        };
    }

    let deviation = population_std_dev(&prices[prices.len() - period..]);
    BollingerBands {
        upper: middle + deviation * std_dev,
        middle,
        lower: middle - deviation * std_dev,
    }
}

/// Nearest support below and resistance above the latest close
///
/// Short series (< 10 bars) fall back to the lowest and highest close.
/// Longer series look for swing points: a high above its two neighbours on
/// each side is a resistance level, a low below its two neighbours on each
/// side is a support level.
pub fn support_resistance(series: &[PricePoint]) -> SupportResistance {
    let Some(last) = series.last() else {
        return SupportResistance::default();
    };

    let (min_close, max_close) = series.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), point| (lo.min(point.close), hi.max(point.close)),
    );

    if series.len() < 10 {
        return SupportResistance {
            support: min_close,
            resistance: max_close,
        };
    }

    let mut resistance_levels = Vec::new();
    let mut support_levels = Vec::new();

    for i in 2..series.len() - 2 {
        let neighbours = [i - 2, i - 1, i + 1, i + 2];

        let high = series[i].high;
        if neighbours.iter().all(|&j| high > series[j].high) {
            resistance_levels.push(high);
        }

        let low = series[i].low;
        if neighbours.iter().all(|&j| low < series[j].low) {
            support_levels.push(low);
        }
    }

    let current = last.close;
    let resistance = resistance_levels
        .into_iter()
        .filter(|&level| level > current)
        .reduce(f64::min)
        .unwrap_or(max_close);
    let support = support_levels
        .into_iter()
        .filter(|&level| level < current)
        .reduce(f64::max)
        .unwrap_or(min_close);

    SupportResistance {
        support,
        resistance,
    }
}

/// Annualized volatility (percent) of log returns over the last `period` closes
///
/// Returns 0 when fewer than `period` closes are available.
pub fn volatility(prices: &[f64], period: usize) -> f64 {
    if period < 2 || prices.len() < period {
        return 0.0;
    }

    let returns: Vec<f64> = prices[prices.len() - period..]
        .windows(2)
        .map(|w| (w[1] / w[0]).ln())
        .collect();

    let deviation = population_std_dev(&returns);
    (deviation * deviation * TRADING_DAYS_PER_YEAR).sqrt() * 100.0
}

/// Classify the trend from moving averages and five-session momentum
///
/// Bullish needs price above both SMAs, SMA20 above SMA50 and a higher close
/// than five sessions ago; bearish needs every one of those to fail.
pub fn trend(series: &[PricePoint]) -> Trend {
    if series.len() < 3 {
        return Trend::Neutral;
    }

    let prices = closes(series);
    let sma20 = sma(&prices, 20);
    let sma50 = sma(&prices, 50);
    let current = prices[prices.len() - 1];

    let above_sma20 = current > sma20;
    let above_sma50 = current > sma50;
    let sma20_above_sma50 = sma20 > sma50;

    let recent = &prices[prices.len().saturating_sub(5)..];
    let rising = recent[recent.len() - 1] > recent[0];

    match (above_sma20, above_sma50, sma20_above_sma50, rising) {
        (true, true, true, true) => Trend::Bullish,
        (false, false, false, false) => Trend::Bearish,
        _ => Trend::Neutral,
    }
}

/// Compute the complete indicator set for a price series
pub fn calculate_indicators(series: &[PricePoint]) -> Result<TechnicalIndicators> {
    if series.is_empty() {
        return Err(AnalysisError::insufficient(
            "no price history provided for technical analysis",
        ));
    }

    if !is_chronological(series) {
        tracing::warn!(
            bars = series.len(),
            "Price history is not in ascending date order"
        );
    }

    let prices = closes(series);
    let levels = support_resistance(series);
    let macd = macd(&prices);

    let indicators = TechnicalIndicators {
        sma20: sma(&prices, 20),
        sma50: sma(&prices, 50),
        ema12: ema(&prices, 12),
        ema26: ema(&prices, 26),
        rsi: rsi(&prices, RSI_PERIOD),
        macd: macd.macd,
        macd_signal: macd.signal,
        macd_histogram: macd.histogram,
        bollinger: bollinger_bands(&prices, BOLLINGER_PERIOD, BOLLINGER_STD_DEV),
        support: levels.support,
        resistance: levels.resistance,
        trend: trend(series),
        volatility: volatility(&prices, VOLATILITY_PERIOD),
    };

    tracing::debug!(
        bars = series.len(),
        rsi = indicators.rsi,
        trend = %indicators.trend,
        "Calculated technical indicators"
    );

    Ok(indicators)
}

fn population_std_dev(values: &[f64]) -> f64 {
    let Ok(mut indicator) = StandardDeviation::new(values.len()) else {
        return 0.0;
    };
    values.iter().fold(0.0, |_, &value| indicator.next(value))
}
