//! Stock analysis engine over a market data source

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use super::analyzer::Analyzer;
use super::result::{AnalysisReport, AnalysisResult, ComparisonResult};
use crate::config::EngineConfig;
use crate::error::{AnalysisError, Result};
use crate::models::AnalysisSnapshot;
use crate::source::MarketDataSource;

/// Fetches inputs from a [`MarketDataSource`] and scores them
pub struct StockAnalysisEngine {
    source: Arc<dyn MarketDataSource>,
    analyzer: Analyzer,
}

impl StockAnalysisEngine {
    pub fn new(source: Arc<dyn MarketDataSource>, config: Arc<EngineConfig>) -> Self {
        Self {
            source,
            analyzer: Analyzer::new(config),
        }
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub async fn analyze(&self, symbol: &str) -> Result<AnalysisResult> {
        Ok(self.analyze_detailed(symbol).await?.result)
    }

    /// Analyse one symbol
    ///
    /// Inputs come from [`MarketDataSource::snapshot`]; the three component
    /// analyses then run concurrently on the blocking pool.
    pub async fn analyze_detailed(&self, symbol: &str) -> Result<AnalysisReport> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(AnalysisError::snapshot(symbol, "empty symbol"));
        }

        let AnalysisSnapshot {
            fundamentals,
            price_history,
            articles,
            ..
        } = self.source.snapshot(&symbol).await?;
        let now = Utc::now();

        let fundamental = {
            let analyzer = self.analyzer.clone();
            tokio::task::spawn_blocking(move || analyzer.fundamental_component(&fundamentals))
        };
        let technical = {
            let analyzer = self.analyzer.clone();
            tokio::task::spawn_blocking(move || analyzer.technical_component(&price_history))
        };
        let sentiment = {
            let analyzer = self.analyzer.clone();
            tokio::task::spawn_blocking(move || analyzer.sentiment_component(&articles, now))
        };

        let (fundamental, technical, sentiment) =
            tokio::try_join!(fundamental, technical, sentiment)?;

        Ok(self
            .analyzer
            .assemble(&symbol, fundamental, technical, sentiment, now))
    }

    /// Analyse several symbols concurrently and rank them
    ///
    /// A failing symbol is recorded in [`ComparisonResult::failures`] and
    /// does not abort the others.
    pub async fn compare(&self, symbols: &[String]) -> ComparisonResult {
        let normalized: Vec<String> = symbols
            .iter()
            .map(|s| s.trim().to_uppercase())
            .collect();

        let analyses = futures::future::join_all(normalized.iter().map(|s| self.analyze(s))).await;

        let mut comparison = ComparisonResult::new(normalized.clone());
        for (symbol, outcome) in normalized.into_iter().zip(analyses) {
            match outcome {
                Ok(result) => comparison.add_analysis(result),
                Err(err) => {
                    warn!(symbol = %symbol, error = %err, "Analysis failed");
                    comparison.add_failure(symbol, err.to_string());
                }
            }
        }

        info!(
            requested = comparison.symbols.len(),
            analysed = comparison.ranked.len(),
            success_rate = comparison.success_rate(),
            "Comparison complete"
        );
        comparison
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FundamentalRatios, Metric, NewsArticle, PricePoint};
    use crate::source::{InMemorySource, MockMarketDataSource};
    use chrono::{Duration, NaiveDate};

    fn rising(n: usize) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| {
                let close = 50.0 + i as f64;
                let date = start + Duration::days(i as i64);
                PricePoint::new(date, close, close + 1.0, close - 1.0, close, 10_000)
            })
            .collect()
    }

    fn engine(source: impl MarketDataSource + 'static) -> StockAnalysisEngine {
        StockAnalysisEngine::new(Arc::new(source), Arc::new(EngineConfig::default()))
    }

    #[tokio::test]
    async fn test_analyze_with_mock_source() {
        let mut source = MockMarketDataSource::new();
        source
            .expect_snapshot()
            .withf(|symbol| symbol == "ACME")
            .times(1)
            .returning(|symbol| {
                let mut snapshot = AnalysisSnapshot::new(symbol);
                snapshot.fundamentals = FundamentalRatios::new(symbol)
                    .with(Metric::PeRatio, 12.0)
                    .with(Metric::DebtToEquity, 0.2)
                    .with(Metric::ReturnOnEquity, 0.2);
                Ok(snapshot)
            });

        let result = engine(source).analyze(" acme ").await.unwrap();
        assert_eq!(result.symbol, "ACME");
        assert_eq!(result.fundamental_score, 87);
        assert_eq!(result.technical_score, 50);
        assert_eq!(result.sentiment_score, 50);
        assert_eq!(result.overall_score, 65);
    }

    #[tokio::test]
    async fn test_analyze_propagates_source_error() {
        let mut source = MockMarketDataSource::new();
        source
            .expect_snapshot()
            .returning(|symbol| Err(AnalysisError::snapshot(symbol, "feed offline")));

        let err = engine(source).analyze("ACME").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Snapshot { .. }));
    }

    #[tokio::test]
    async fn test_empty_symbol_rejected() {
        let source = InMemorySource::new();
        assert!(engine(source).analyze("   ").await.is_err());
    }

    #[tokio::test]
    async fn test_detailed_matches_synchronous_analyzer() {
        let mut snapshot = AnalysisSnapshot::new("UP");
        snapshot.price_history = rising(40);
        snapshot.articles = vec![NewsArticle::new(
            "Strong growth and record profit",
            "",
            "Wire",
            Utc::now(),
        )];
        let engine = engine(InMemorySource::new().with_snapshot(snapshot.clone()));

        let report = engine.analyze_detailed("up").await.unwrap();
        assert!(report.indicators.is_some());
        assert_eq!(report.scored_articles.len(), 1);

        let direct = engine.analyzer().analyze_stock_at(
            "UP",
            &snapshot.fundamentals,
            &snapshot.price_history,
            &snapshot.articles,
            report.generated_at,
        );
        assert_eq!(report.result, direct);
    }

    #[tokio::test]
    async fn test_compare_ranks_and_records_failures() {
        let mut strong = AnalysisSnapshot::new("STRONG");
        strong.fundamentals = FundamentalRatios::new("STRONG")
            .with(Metric::PeRatio, 10.0)
            .with(Metric::ReturnOnEquity, 0.3);
        strong.price_history = rising(60);

        let mut weak = AnalysisSnapshot::new("WEAK");
        weak.fundamentals = FundamentalRatios::new("WEAK")
            .with(Metric::PeRatio, 40.0)
            .with(Metric::DebtToEquity, 2.5);

        let source = InMemorySource::new()
            .with_snapshot(weak)
            .with_snapshot(strong);
        let symbols = vec!["weak".to_string(), "strong".to_string(), "missing".to_string()];

        let comparison = engine(source).compare(&symbols).await;
        assert_eq!(comparison.symbols, vec!["WEAK", "STRONG", "MISSING"]);
        assert_eq!(comparison.ranked.len(), 2);
        assert_eq!(comparison.best().unwrap().symbol, "STRONG");
        assert_eq!(comparison.failures.len(), 1);
        assert_eq!(comparison.failures[0].0, "MISSING");
        assert!(!comparison.is_complete());
    }
}
