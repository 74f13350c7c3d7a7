//! Market data sources
//!
//! The engine never fetches data itself. It asks a [`MarketDataSource`] for
//! the three inputs of an analysis and scores whatever comes back.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::models::{AnalysisSnapshot, FundamentalRatios, NewsArticle, PricePoint};

/// Provider of analysis inputs for a symbol
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Latest fundamental ratios; unknown ratios are 0
    async fn fundamentals(&self, symbol: &str) -> Result<FundamentalRatios>;

    /// Daily bars, oldest first
    async fn price_history(&self, symbol: &str) -> Result<Vec<PricePoint>>;

    /// Recent articles mentioning the symbol
    async fn news(&self, symbol: &str) -> Result<Vec<NewsArticle>>;

    /// All three inputs for one analysis
    ///
    /// The default fetches them concurrently. Sources that hold the inputs
    /// together should override this to read them in one consistent pass.
    async fn snapshot(&self, symbol: &str) -> Result<AnalysisSnapshot> {
        let (fundamentals, price_history, articles) = tokio::try_join!(
            self.fundamentals(symbol),
            self.price_history(symbol),
            self.news(symbol),
        )?;
        Ok(AnalysisSnapshot {
            symbol: symbol.to_string(),
            fundamentals,
            price_history,
            articles,
        })
    }
}

/// Reads `<SYMBOL>.json` snapshot files from a directory
#[derive(Debug, Clone)]
pub struct SnapshotDirectorySource {
    root: PathBuf,
}

impl SnapshotDirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        let upper = self.root.join(format!("{}.json", symbol.to_uppercase()));
        if upper.exists() {
            return upper;
        }
        self.root.join(format!("{}.json", symbol.to_lowercase()))
    }

    /// Load and parse the snapshot for `symbol`
    pub async fn load(&self, symbol: &str) -> Result<AnalysisSnapshot> {
        let path = self.path_for(symbol);
        debug!(symbol, path = %path.display(), "Loading snapshot");

        let raw = tokio::fs::read_to_string(&path).await.map_err(|err| {
            AnalysisError::snapshot(symbol, format!("{}: {err}", path.display()))
        })?;
        let mut snapshot: AnalysisSnapshot = serde_json::from_str(&raw)
            .map_err(|err| AnalysisError::snapshot(symbol, format!("invalid JSON: {err}")))?;

        snapshot.symbol = symbol.to_uppercase();
        if snapshot.fundamentals.symbol.is_empty() {
            snapshot.fundamentals.symbol.clone_from(&snapshot.symbol);
        }
        Ok(snapshot)
    }
}

#[async_trait]
impl MarketDataSource for SnapshotDirectorySource {
    async fn fundamentals(&self, symbol: &str) -> Result<FundamentalRatios> {
        Ok(self.load(symbol).await?.fundamentals)
    }

    async fn price_history(&self, symbol: &str) -> Result<Vec<PricePoint>> {
        Ok(self.load(symbol).await?.price_history)
    }

    async fn news(&self, symbol: &str) -> Result<Vec<NewsArticle>> {
        Ok(self.load(symbol).await?.articles)
    }

    async fn snapshot(&self, symbol: &str) -> Result<AnalysisSnapshot> {
        self.load(symbol).await
    }
}

/// Snapshots held in memory, keyed by upper-case symbol
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    snapshots: HashMap<String, AnalysisSnapshot>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, snapshot: AnalysisSnapshot) {
        self.snapshots
            .insert(snapshot.symbol.to_uppercase(), snapshot);
    }

    pub fn with_snapshot(mut self, snapshot: AnalysisSnapshot) -> Self {
        self.insert(snapshot);
        self
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    fn get(&self, symbol: &str) -> Result<&AnalysisSnapshot> {
        self.snapshots
            .get(&symbol.to_uppercase())
            .ok_or_else(|| AnalysisError::snapshot(symbol, "no snapshot loaded"))
    }
}

#[async_trait]
impl MarketDataSource for InMemorySource {
    async fn fundamentals(&self, symbol: &str) -> Result<FundamentalRatios> {
        Ok(self.get(symbol)?.fundamentals.clone())
    }

    async fn price_history(&self, symbol: &str) -> Result<Vec<PricePoint>> {
        Ok(self.get(symbol)?.price_history.clone())
    }

    async fn news(&self, symbol: &str) -> Result<Vec<NewsArticle>> {
        Ok(self.get(symbol)?.articles.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Metric;

    #[tokio::test]
    async fn test_directory_source_reads_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("MSFT.json"),
            r#"{
                "symbol": "msft",
                "fundamentals": {"peRatio": 30.0, "debtToEquity": 0.4},
                "priceHistory": [
                    {"date": "2024-03-01", "open": 400.0, "high": 405.0,
                     "low": 398.0, "close": 404.0, "volume": 1000}
                ],
                "articles": []
            }"#,
        )
        .unwrap();

        let source = SnapshotDirectorySource::new(dir.path());
        let fundamentals = source.fundamentals("msft").await.unwrap();
        assert_eq!(fundamentals.symbol, "MSFT");
        assert_eq!(fundamentals.get(Metric::PeRatio), 30.0);

        let history = source.price_history("MSFT").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].close, 404.0);
        assert!(source.news("MSFT").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_directory_source_lowercase_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ibm.json"), r#"{"symbol": "ibm"}"#).unwrap();

        let source = SnapshotDirectorySource::new(dir.path());
        let snapshot = source.load("IBM").await.unwrap();
        assert_eq!(snapshot.symbol, "IBM");
        assert!(snapshot.price_history.is_empty());
    }

    #[tokio::test]
    async fn test_directory_source_missing_symbol() {
        let dir = tempfile::tempdir().unwrap();
        let source = SnapshotDirectorySource::new(dir.path());

        let err = source.fundamentals("NOPE").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Snapshot { ref symbol, .. } if symbol == "NOPE"));
    }

    #[tokio::test]
    async fn test_directory_source_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("BAD.json"), "{ not json").unwrap();

        let source = SnapshotDirectorySource::new(dir.path());
        let err = source.news("BAD").await.unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[tokio::test]
    async fn test_directory_snapshot_loads_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ACME.json");
        std::fs::write(&path, r#"{"symbol": "acme", "fundamentals": {"peRatio": 9.0}}"#).unwrap();

        let source = SnapshotDirectorySource::new(dir.path());
        let snapshot = source.snapshot("acme").await.unwrap();
        assert_eq!(snapshot.symbol, "ACME");
        assert_eq!(snapshot.fundamentals.symbol, "ACME");
        assert_eq!(snapshot.fundamentals.pe_ratio, 9.0);
        assert!(snapshot.articles.is_empty());
    }

    #[tokio::test]
    async fn test_default_snapshot_combines_methods() {
        let mut stored = AnalysisSnapshot::new("IBM");
        stored.fundamentals = FundamentalRatios::new("IBM").with(Metric::PeRatio, 21.0);
        let source = InMemorySource::new().with_snapshot(stored.clone());

        let snapshot = source.snapshot("IBM").await.unwrap();
        assert_eq!(snapshot, stored);
        assert!(source.snapshot("GOOG").await.is_err());
    }

    #[tokio::test]
    async fn test_in_memory_source() {
        let source = InMemorySource::new().with_snapshot(AnalysisSnapshot::new("aapl"));
        assert_eq!(source.len(), 1);

        assert!(source.price_history("AAPL").await.unwrap().is_empty());
        assert!(source.news("aapl").await.is_ok());
        assert!(source.fundamentals("GOOG").await.is_err());
    }
}
