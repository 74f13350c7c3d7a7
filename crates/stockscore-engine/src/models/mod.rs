//! Input records consumed by the analysis engine

pub mod fundamentals;
pub mod news;
pub mod price;
pub mod snapshot;

pub use fundamentals::{FundamentalRatios, Metric};
pub use news::{NewsArticle, SentimentLabel};
pub use price::PricePoint;
pub use snapshot::AnalysisSnapshot;
