//! Configuration for analysis operations
//!
//! Every constant the engine scores with lives here as plain data. A config
//! is built once, validated, and then shared read-only with the analyzers.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AnalysisError, Result};
use crate::fundamental::{FundamentalRule, default_rules};
use crate::sentiment::SentimentConfig;
use crate::technical::TechnicalWeights;

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "STOCKSCORE_CONFIG";

/// Blend of the three component scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub fundamental: f64,
    pub technical: f64,
    pub sentiment: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            fundamental: 0.40,
            technical: 0.35,
            sentiment: 0.25,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.fundamental + self.technical + self.sentiment
    }
}

/// Overall-score cut-offs for the discrete prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionBands {
    /// Buy at or above this score
    pub buy_at: u8,
    /// Sell at or below this score
    pub sell_at: u8,
}

impl Default for PredictionBands {
    fn default() -> Self {
        Self {
            buy_at: 70,
            sell_at: 40,
        }
    }
}

/// Maps disagreement between component scores to a confidence value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidencePolicy {
    /// Variance at which confidence would reach zero before clamping
    pub variance_scale: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            variance_scale: 1000.0,
            floor: 0.3,
            ceiling: 1.0,
        }
    }
}

/// Technical scoring settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalConfig {
    /// Indicators are only computed when history is longer than this
    pub min_history: usize,
    pub weights: TechnicalWeights,
}

impl Default for TechnicalConfig {
    fn default() -> Self {
        Self {
            min_history: 20,
            weights: TechnicalWeights::default(),
        }
    }
}

/// Configuration for the analysis engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: ScoreWeights,
    pub prediction: PredictionBands,
    pub confidence: ConfidencePolicy,
    pub technical: TechnicalConfig,
    pub sentiment: SentimentConfig,
    /// Threshold-to-adjustment table for fundamental ratios
    pub fundamental: Vec<FundamentalRule>,
    /// Upper bound on the explanation list of a result
    pub max_reasons: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            prediction: PredictionBands::default(),
            confidence: ConfidencePolicy::default(),
            technical: TechnicalConfig::default(),
            sentiment: SentimentConfig::default(),
            fundamental: default_rules(),
            max_reasons: 8,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration builder
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Read and validate a JSON config file; omitted sections keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        tracing::info!(path = %path.display(), "Loaded engine configuration");
        Ok(config)
    }

    /// Resolve the config: explicit path, then `STOCKSCORE_CONFIG`, then defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => Self::from_file(path),
            _ => {
                tracing::debug!("Using default engine configuration");
                Ok(Self::default())
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        if [w.fundamental, w.technical, w.sentiment]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(AnalysisError::InvalidConfig(
                "score weights must be finite and non-negative".to_string(),
            ));
        }
        if (w.sum() - 1.0).abs() > 1e-6 {
            return Err(AnalysisError::InvalidConfig(format!(
                "score weights must sum to 1, got {}",
                w.sum()
            )));
        }

        if self.prediction.sell_at >= self.prediction.buy_at || self.prediction.buy_at > 100 {
            return Err(AnalysisError::InvalidConfig(format!(
                "prediction bands must satisfy sell_at < buy_at <= 100, got sell_at={} buy_at={}",
                self.prediction.sell_at, self.prediction.buy_at
            )));
        }

        let c = &self.confidence;
        if !(0.0..=1.0).contains(&c.floor)
            || !(0.0..=1.0).contains(&c.ceiling)
            || c.floor > c.ceiling
        {
            return Err(AnalysisError::InvalidConfig(
                "confidence floor and ceiling must lie in [0, 1] with floor <= ceiling".to_string(),
            ));
        }
        if c.variance_scale <= 0.0 {
            return Err(AnalysisError::InvalidConfig(
                "confidence variance_scale must be positive".to_string(),
            ));
        }

        let s = &self.sentiment;
        if s.recency_decay_hours <= 0.0 {
            return Err(AnalysisError::InvalidConfig(
                "sentiment recency_decay_hours must be positive".to_string(),
            ));
        }
        if s.lexicon.positive_len() == 0 || s.lexicon.negative_len() == 0 {
            return Err(AnalysisError::InvalidConfig(
                "sentiment lexicon needs both positive and negative words".to_string(),
            ));
        }

        if self.max_reasons == 0 {
            return Err(AnalysisError::InvalidConfig(
                "max_reasons must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for EngineConfig
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    weights: Option<ScoreWeights>,
    prediction: Option<PredictionBands>,
    confidence: Option<ConfidencePolicy>,
    technical: Option<TechnicalConfig>,
    sentiment: Option<SentimentConfig>,
    fundamental: Option<Vec<FundamentalRule>>,
    max_reasons: Option<usize>,
}

impl EngineConfigBuilder {
    /// Set the component score weights
    pub fn weights(mut self, fundamental: f64, technical: f64, sentiment: f64) -> Self {
        self.weights = Some(ScoreWeights {
            fundamental,
            technical,
            sentiment,
        });
        self
    }

    /// Set the buy / sell cut-offs
    pub fn prediction_bands(mut self, buy_at: u8, sell_at: u8) -> Self {
        self.prediction = Some(PredictionBands { buy_at, sell_at });
        self
    }

    pub fn confidence(mut self, policy: ConfidencePolicy) -> Self {
        self.confidence = Some(policy);
        self
    }

    pub fn technical(mut self, technical: TechnicalConfig) -> Self {
        self.technical = Some(technical);
        self
    }

    pub fn sentiment(mut self, sentiment: SentimentConfig) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    /// Replace the fundamental rule table
    pub fn fundamental_rules(mut self, rules: Vec<FundamentalRule>) -> Self {
        self.fundamental = Some(rules);
        self
    }

    pub fn max_reasons(mut self, max: usize) -> Self {
        self.max_reasons = Some(max);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<EngineConfig> {
        let defaults = EngineConfig::default();

        let config = EngineConfig {
            weights: self.weights.unwrap_or(defaults.weights),
            prediction: self.prediction.unwrap_or(defaults.prediction),
            confidence: self.confidence.unwrap_or(defaults.confidence),
            technical: self.technical.unwrap_or(defaults.technical),
            sentiment: self.sentiment.unwrap_or(defaults.sentiment),
            fundamental: self.fundamental.unwrap_or(defaults.fundamental),
            max_reasons: self.max_reasons.unwrap_or(defaults.max_reasons),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Lexicon;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.weights.fundamental, 0.40);
        assert_eq!(config.prediction.buy_at, 70);
        assert_eq!(config.max_reasons, 8);
        assert_eq!(config.fundamental.len(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = EngineConfig::builder()
            .weights(0.5, 0.3, 0.2)
            .prediction_bands(75, 35)
            .max_reasons(5)
            .build()
            .unwrap();

        assert_eq!(config.weights.technical, 0.3);
        assert_eq!(config.prediction.sell_at, 35);
        assert_eq!(config.max_reasons, 5);
    }

    #[test]
    fn test_validation_weights() {
        assert!(EngineConfig::builder().weights(0.5, 0.5, 0.5).build().is_err());
        assert!(EngineConfig::builder().weights(1.2, -0.1, -0.1).build().is_err());
    }

    #[test]
    fn test_validation_bands() {
        assert!(EngineConfig::builder().prediction_bands(40, 40).build().is_err());
        assert!(EngineConfig::builder().prediction_bands(101, 40).build().is_err());
    }

    #[test]
    fn test_validation_confidence() {
        let policy = ConfidencePolicy {
            floor: 0.9,
            ceiling: 0.5,
            ..Default::default()
        };
        assert!(EngineConfig::builder().confidence(policy).build().is_err());
    }

    #[test]
    fn test_validation_empty_lexicon() {
        let sentiment = SentimentConfig {
            lexicon: Lexicon::new(Vec::<String>::new(), ["bad"], ["very"]),
            ..Default::default()
        };
        let err = EngineConfig::builder().sentiment(sentiment).build().unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_file_partial_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        std::fs::write(
            &path,
            r#"{"prediction":{"buy_at":65,"sell_at":45},"sentiment":{"recency_decay_hours":24.0}}"#,
        )
        .unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config.prediction.buy_at, 65);
        assert_eq!(config.sentiment.recency_decay_hours, 24.0);
        assert_eq!(config.sentiment.title_weight, 0.7);
        assert_eq!(config.weights, ScoreWeights::default());
        assert_eq!(config.fundamental, default_rules());
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        std::fs::write(&path, r#"{"max_reasons":0}"#).unwrap();
        assert!(EngineConfig::from_file(&path).is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        std::fs::write(&path, r#"{"max_reasons":3}"#).unwrap();
        assert_eq!(EngineConfig::load(Some(&path)).unwrap().max_reasons, 3);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
