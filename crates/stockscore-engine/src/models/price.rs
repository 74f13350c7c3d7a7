//! Daily price bars

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading session of OHLCV data
///
/// Series are ordered by ascending `date` with one bar per session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Closing prices of a series, oldest first
pub fn closes(series: &[PricePoint]) -> Vec<f64> {
    series.iter().map(|p| p.close).collect()
}

/// Whether dates strictly increase along the series
pub fn is_chronological(series: &[PricePoint]) -> bool {
    series.windows(2).all(|w| w[0].date < w[1].date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> PricePoint {
        let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        PricePoint::new(date, close, close + 1.0, close - 1.0, close, 1_000)
    }

    #[test]
    fn test_closes() {
        let series = vec![bar(1, 10.0), bar(4, 11.0), bar(5, 12.5)];
        assert_eq!(closes(&series), vec![10.0, 11.0, 12.5]);
    }

    #[test]
    fn test_is_chronological() {
        assert!(is_chronological(&[bar(1, 1.0), bar(2, 1.0)]));
        assert!(!is_chronological(&[bar(2, 1.0), bar(2, 1.0)]));
        assert!(is_chronological(&[]));
    }

    #[test]
    fn test_deserialize_date() {
        let json =
            r#"{"date":"2024-03-01","open":1.0,"high":2.0,"low":0.5,"close":1.5,"volume":10}"#;
        let point: PricePoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(point.volume, 10);
    }
}
