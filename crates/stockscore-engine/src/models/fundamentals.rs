//! Company fundamental ratios

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ratio bundle for one company
///
/// A value of exactly `0.0` means the ratio is unknown or not applicable.
/// Missing JSON fields deserialize to that same zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FundamentalRatios {
    pub symbol: String,
    pub pe_ratio: f64,
    pub peg_ratio: f64,
    pub price_to_book: f64,
    pub debt_to_equity: f64,
    pub return_on_equity: f64,
    pub return_on_assets: f64,
    pub profit_margin: f64,
    pub operating_margin: f64,
    pub revenue_growth: f64,
    pub earnings_growth: f64,
    pub current_ratio: f64,
    pub quick_ratio: f64,
}

/// Names a single field of [`FundamentalRatios`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    PeRatio,
    PegRatio,
    PriceToBook,
    DebtToEquity,
    ReturnOnEquity,
    ReturnOnAssets,
    ProfitMargin,
    OperatingMargin,
    RevenueGrowth,
    EarningsGrowth,
    CurrentRatio,
    QuickRatio,
}

impl FundamentalRatios {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// Raw value of a metric, zero included
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::PeRatio => self.pe_ratio,
            Metric::PegRatio => self.peg_ratio,
            Metric::PriceToBook => self.price_to_book,
            Metric::DebtToEquity => self.debt_to_equity,
            Metric::ReturnOnEquity => self.return_on_equity,
            Metric::ReturnOnAssets => self.return_on_assets,
            Metric::ProfitMargin => self.profit_margin,
            Metric::OperatingMargin => self.operating_margin,
            Metric::RevenueGrowth => self.revenue_growth,
            Metric::EarningsGrowth => self.earnings_growth,
            Metric::CurrentRatio => self.current_ratio,
            Metric::QuickRatio => self.quick_ratio,
        }
    }

    /// Value of a metric, or `None` when it is unknown (zero)
    pub fn known(&self, metric: Metric) -> Option<f64> {
        let value = self.get(metric);
        (value != 0.0).then_some(value)
    }

    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        let slot = match metric {
            Metric::PeRatio => &mut self.pe_ratio,
            Metric::PegRatio => &mut self.peg_ratio,
            Metric::PriceToBook => &mut self.price_to_book,
            Metric::DebtToEquity => &mut self.debt_to_equity,
            Metric::ReturnOnEquity => &mut self.return_on_equity,
            Metric::ReturnOnAssets => &mut self.return_on_assets,
            Metric::ProfitMargin => &mut self.profit_margin,
            Metric::OperatingMargin => &mut self.operating_margin,
            Metric::RevenueGrowth => &mut self.revenue_growth,
            Metric::EarningsGrowth => &mut self.earnings_growth,
            Metric::CurrentRatio => &mut self.current_ratio,
            Metric::QuickRatio => &mut self.quick_ratio,
        };
        *slot = value;
        self
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Metric::PeRatio => "P/E",
            Metric::PegRatio => "PEG",
            Metric::PriceToBook => "P/B",
            Metric::DebtToEquity => "D/E",
            Metric::ReturnOnEquity => "ROE",
            Metric::ReturnOnAssets => "ROA",
            Metric::ProfitMargin => "Profit margin",
            Metric::OperatingMargin => "Operating margin",
            Metric::RevenueGrowth => "Revenue growth",
            Metric::EarningsGrowth => "Earnings growth",
            Metric::CurrentRatio => "Current ratio",
            Metric::QuickRatio => "Quick ratio",
        };
        f.write_str(label)
    }
}
