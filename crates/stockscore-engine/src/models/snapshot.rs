//! One complete input snapshot for an analysis call

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{FundamentalRatios, NewsArticle, PricePoint};
use crate::error::Result;

/// Fundamentals, price history and news for one symbol
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSnapshot {
    pub symbol: String,
    #[serde(default)]
    pub fundamentals: FundamentalRatios,
    #[serde(default)]
    pub price_history: Vec<PricePoint>,
    #[serde(default)]
    pub articles: Vec<NewsArticle>,
}

impl AnalysisSnapshot {
    pub fn new(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            fundamentals: FundamentalRatios::new(symbol.clone()),
            symbol,
            ..Default::default()
        }
    }

    /// Read a snapshot from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let mut snapshot: Self = serde_json::from_str(&raw)?;
        snapshot.symbol = snapshot.symbol.to_uppercase();
        if snapshot.fundamentals.symbol.is_empty() {
            snapshot.fundamentals.symbol.clone_from(&snapshot.symbol);
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_fills_symbol() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aapl.json");
        std::fs::write(
            &path,
            r#"{"symbol":"aapl","fundamentals":{"peRatio":12.0},"priceHistory":[],"articles":[]}"#,
        )
        .unwrap();

        let snapshot = AnalysisSnapshot::from_file(&path).unwrap();
        assert_eq!(snapshot.symbol, "AAPL");
        assert_eq!(snapshot.fundamentals.symbol, "AAPL");
        assert_eq!(snapshot.fundamentals.pe_ratio, 12.0);
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = AnalysisSnapshot::from_file(dir.path().join("none.json")).unwrap_err();
        assert!(matches!(err, crate::error::AnalysisError::Io(_)));
    }
}
