//! Terminal rendering of analysis results

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use stockscore_engine::{AnalysisReport, AnalysisResult, ComparisonResult, ScoreRating};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn score_cell(score: u8) -> String {
    format!("{score} ({})", ScoreRating::from_score(score))
}

/// Score breakdown and reasons for one result
pub fn result_table(result: &AnalysisResult) -> Table {
    let mut table = new_table();
    table.set_header(vec![result.symbol.clone(), String::new()]);
    table.add_row(vec!["Fundamental".to_string(), score_cell(result.fundamental_score)]);
    table.add_row(vec!["Technical".to_string(), score_cell(result.technical_score)]);
    table.add_row(vec!["Sentiment".to_string(), score_cell(result.sentiment_score)]);
    table.add_row(vec!["Overall".to_string(), score_cell(result.overall_score)]);
    table.add_row(vec!["Prediction".to_string(), result.prediction.to_string()]);
    table.add_row(vec![
        "Recommendation".to_string(),
        result.recommendation_strength().to_string(),
    ]);
    table.add_row(vec!["Confidence".to_string(), format!("{:.2}", result.confidence)]);

    labelled_rows(&mut table, "Reasons", &result.reasons);
    table
}

fn labelled_rows(table: &mut Table, label: &str, lines: &[String]) {
    for (i, line) in lines.iter().enumerate() {
        let label = if i == 0 { label } else { "" };
        table.add_row(vec![label.to_string(), line.clone()]);
    }
}

/// Untruncated reasons, indicator values and per-article sentiment
pub fn detail_table(report: &AnalysisReport) -> Table {
    let mut table = new_table();
    table.set_header(vec![format!("{} detail", report.result.symbol), String::new()]);

    labelled_rows(&mut table, "Fundamental", &report.breakdown.fundamental);
    labelled_rows(&mut table, "Technical", &report.breakdown.technical);
    labelled_rows(&mut table, "Sentiment", &report.breakdown.sentiment);

    if let Some(ind) = &report.indicators {
        let values = vec![
            format!("RSI {:.2}", ind.rsi),
            format!("SMA20 {:.2} / SMA50 {:.2}", ind.sma20, ind.sma50),
            format!("MACD {:.4} / signal {:.4}", ind.macd, ind.macd_signal),
            format!(
                "Bollinger {:.2} / {:.2} / {:.2}",
                ind.bollinger.lower, ind.bollinger.middle, ind.bollinger.upper
            ),
            format!("Support {:.2} / resistance {:.2}", ind.support, ind.resistance),
            format!("Volatility {:.2}%", ind.volatility),
            format!("Trend {}", ind.trend),
        ];
        labelled_rows(&mut table, "Indicators", &values);
    }

    let sentiment = &report.sentiment;
    let mut news = vec![format!(
        "{} (score {:.2}, magnitude {:.2})",
        sentiment.sentiment, sentiment.score, sentiment.magnitude
    )];
    news.extend(report.scored_articles.iter().map(|article| {
        format!(
            "{:+.2} {}",
            article.sentiment_score.unwrap_or(0.0),
            article.title
        )
    }));
    labelled_rows(&mut table, "News", &news);

    table
}

/// Ranked comparison, best first, followed by any failures
pub fn comparison_table(comparison: &ComparisonResult) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Rank",
        "Symbol",
        "Overall",
        "Fundamental",
        "Technical",
        "Sentiment",
        "Prediction",
        "Confidence",
    ]);

    for (rank, result) in comparison.ranked.iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            result.symbol.clone(),
            result.overall_score.to_string(),
            result.fundamental_score.to_string(),
            result.technical_score.to_string(),
            result.sentiment_score.to_string(),
            result.prediction.to_string(),
            format!("{:.2}", result.confidence),
        ]);
    }

    for (symbol, reason) in &comparison.failures {
        table.add_row(vec![
            "-".to_string(),
            symbol.clone(),
            format!("error: {reason}"),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};
    use stockscore_engine::{
        Analyzer, FundamentalRatios, Metric, NewsArticle, Prediction, PricePoint,
    };

    fn result(symbol: &str, overall: u8) -> AnalysisResult {
        AnalysisResult {
            symbol: symbol.to_string(),
            fundamental_score: 87,
            technical_score: 50,
            sentiment_score: 50,
            overall_score: overall,
            prediction: Prediction::Hold,
            confidence: 0.7,
            reasons: vec!["Low P/E ratio indicates potential undervaluation".to_string()],
        }
    }

    #[test]
    fn test_result_table_contents() {
        let rendered = result_table(&result("VAL", 65)).to_string();
        assert!(rendered.contains("VAL"));
        assert!(rendered.contains("87 (strong)"));
        assert!(rendered.contains("65 (moderate)"));
        assert!(rendered.contains("hold"));
        assert!(rendered.contains("0.70"));
        assert!(rendered.contains("Low P/E ratio"));
    }

    #[test]
    fn test_detail_table_contents() {
        let analyzer = Analyzer::default();
        let now = Utc::now();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let prices: Vec<PricePoint> = (0..30_i32)
            .map(|i| {
                let close = 100.0 + f64::from(i);
                let date = start + Duration::days(i64::from(i));
                PricePoint::new(date, close, close + 1.0, close - 1.0, close, 1_000)
            })
            .collect();
        let articles = vec![NewsArticle::new("Record profit", "", "Wire", now)];

        let report = analyzer.analyze_detailed_at(
            "UP",
            &FundamentalRatios::new("UP").with(Metric::PeRatio, 12.0),
            &prices,
            &articles,
            now,
        );
        let rendered = detail_table(&report).to_string();
        assert!(rendered.contains("UP detail"));
        assert!(rendered.contains("Low P/E ratio"));
        assert!(rendered.contains("RSI 100.00"));
        assert!(rendered.contains("+1.00 Record profit"));
    }

    #[test]
    fn test_comparison_table_lists_failures() {
        let mut comparison =
            ComparisonResult::new(vec!["A".to_string(), "B".to_string(), "C".to_string()]);
        comparison.add_analysis(result("A", 40));
        comparison.add_analysis(result("B", 72));
        comparison.add_failure("C", "no snapshot");

        let rendered = comparison_table(&comparison).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        let row_of = |symbol: &str| {
            let needle = format!(" {symbol} ");
            lines.iter().position(|line| line.contains(&needle)).unwrap()
        };
        assert!(row_of("B") < row_of("A"));
        assert!(row_of("A") < row_of("C"));
        assert!(rendered.contains("error: no snapshot"));
    }
}
