//! Fundamental ratio scoring
//!
//! Scoring is a table of rules, one per ratio. Each rule holds ordered
//! bands; the first band whose condition matches contributes its adjustment
//! and reason. Ratios equal to zero are unknown and skipped entirely.

use serde::{Deserialize, Serialize};

use crate::models::{FundamentalRatios, Metric};

/// Score every analysis starts from
pub const NEUTRAL_SCORE: i32 = 50;

/// Range test on a ratio value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Condition {
    /// value < threshold
    Below { value: f64 },
    /// value > threshold
    Above { value: f64 },
    /// min <= value <= max
    Between { min: f64, max: f64 },
}

impl Condition {
    pub fn matches(&self, x: f64) -> bool {
        match *self {
            Condition::Below { value } => x < value,
            Condition::Above { value } => x > value,
            Condition::Between { min, max } => (min..=max).contains(&x),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleBand {
    pub when: Condition,
    pub adjustment: i32,
    pub reason: String,
}

impl RuleBand {
    fn new(when: Condition, adjustment: i32, reason: &str) -> Self {
        Self {
            when,
            adjustment,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundamentalRule {
    pub metric: Metric,
    /// Skip the rule for negative values (valuation multiples of loss-making companies)
    #[serde(default)]
    pub requires_positive: bool,
    pub bands: Vec<RuleBand>,
}

impl FundamentalRule {
    /// The first matching band for `ratios`, if the metric is known and in domain
    pub fn evaluate(&self, ratios: &FundamentalRatios) -> Option<&RuleBand> {
        let value = ratios.known(self.metric)?;
        if self.requires_positive && value < 0.0 {
            return None;
        }
        self.bands.iter().find(|band| band.when.matches(value))
    }
}

/// Outcome of scoring one ratio bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalScore {
    pub score: u8,
    pub reasons: Vec<String>,
}

/// The standard valuation, leverage, profitability, liquidity and growth rules
pub fn default_rules() -> Vec<FundamentalRule> {
    use Condition::{Above, Below, Between};

    let rule = |metric, bands| FundamentalRule {
        metric,
        requires_positive: false,
        bands,
    };
    let valuation = |metric, bands| FundamentalRule {
        metric,
        requires_positive: true,
        bands,
    };

    vec![
        valuation(
            Metric::PeRatio,
            vec![
                RuleBand::new(
                    Below { value: 15.0 },
                    15,
                    "Low P/E ratio indicates potential undervaluation",
                ),
                RuleBand::new(
                    Above { value: 25.0 },
                    -10,
                    "High P/E ratio may indicate overvaluation",
                ),
                RuleBand::new(
                    Between {
                        min: 15.0,
                        max: 25.0,
                    },
                    5,
                    "Moderate P/E ratio shows reasonable valuation",
                ),
            ],
        ),
        valuation(
            Metric::PegRatio,
            vec![
                RuleBand::new(
                    Below { value: 1.0 },
                    10,
                    "PEG ratio below 1 suggests good growth value",
                ),
                RuleBand::new(
                    Above { value: 2.0 },
                    -8,
                    "High PEG ratio may indicate expensive growth",
                ),
            ],
        ),
        valuation(
            Metric::PriceToBook,
            vec![
                RuleBand::new(
                    Below { value: 1.0 },
                    8,
                    "Price-to-book below 1 indicates potential value",
                ),
                RuleBand::new(
                    Above { value: 3.0 },
                    -5,
                    "High price-to-book ratio suggests premium valuation",
                ),
            ],
        ),
        rule(
            Metric::DebtToEquity,
            vec![
                RuleBand::new(
                    Below { value: 0.3 },
                    10,
                    "Low debt-to-equity ratio shows financial strength",
                ),
                RuleBand::new(
                    Above { value: 1.0 },
                    -10,
                    "High debt-to-equity ratio indicates financial risk",
                ),
            ],
        ),
        rule(
            Metric::ReturnOnEquity,
            vec![
                RuleBand::new(
                    Above { value: 0.15 },
                    12,
                    "Strong ROE indicates efficient use of shareholder equity",
                ),
                RuleBand::new(
                    Below { value: 0.05 },
                    -8,
                    "Low ROE suggests poor capital efficiency",
                ),
            ],
        ),
        rule(
            Metric::ReturnOnAssets,
            vec![
                RuleBand::new(
                    Above { value: 0.10 },
                    8,
                    "Strong ROA shows efficient asset utilization",
                ),
                RuleBand::new(
                    Below { value: 0.02 },
                    -5,
                    "Low ROA indicates poor asset efficiency",
                ),
            ],
        ),
        rule(
            Metric::ProfitMargin,
            vec![
                RuleBand::new(
                    Above { value: 0.20 },
                    10,
                    "High profit margin demonstrates strong pricing power",
                ),
                RuleBand::new(
                    Below { value: 0.05 },
                    -8,
                    "Low profit margin suggests operational challenges",
                ),
            ],
        ),
        rule(
            Metric::CurrentRatio,
            vec![
                RuleBand::new(
                    Above { value: 1.5 },
                    6,
                    "Strong current ratio indicates good liquidity",
                ),
                RuleBand::new(
                    Below { value: 1.0 },
                    -10,
                    "Poor current ratio suggests liquidity concerns",
                ),
            ],
        ),
        rule(
            Metric::RevenueGrowth,
            vec![
                RuleBand::new(
                    Above { value: 0.10 },
                    12,
                    "Strong revenue growth shows business expansion",
                ),
                RuleBand::new(
                    Below { value: -0.05 },
                    -10,
                    "Declining revenue indicates business challenges",
                ),
            ],
        ),
        rule(
            Metric::EarningsGrowth,
            vec![
                RuleBand::new(
                    Above { value: 0.15 },
                    10,
                    "Strong earnings growth demonstrates profitability improvement",
                ),
                RuleBand::new(
                    Below { value: -0.10 },
                    -8,
                    "Declining earnings suggest profitability issues",
                ),
            ],
        ),
    ]
}

/// Score a ratio bundle on 0-100 with one reason per triggered band
pub fn score_fundamentals(
    ratios: &FundamentalRatios,
    rules: &[FundamentalRule],
) -> FundamentalScore {
    let mut score = NEUTRAL_SCORE;
    let mut reasons = Vec::new();

    for rule in rules {
        let Some(band) = rule.evaluate(ratios) else {
            continue;
        };
        tracing::trace!(
            metric = %rule.metric,
            value = ratios.get(rule.metric),
            adjustment = band.adjustment,
            "Fundamental rule matched"
        );
        score += band.adjustment;
        reasons.push(band.reason.clone());
    }

    FundamentalScore {
        score: score.clamp(0, 100) as u8,
        reasons,
    }
}
