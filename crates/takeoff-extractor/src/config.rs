//! Configuration for the measurement extractor

use serde::{Deserialize, Serialize};

/// Configuration for the measurement extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Minimum OCR confidence for a candidate to survive, [0, 1]
    pub confidence_threshold: f64,

    /// Two candidates of the same kind and unit whose values differ by
    /// less than this are duplicate suspects
    pub value_epsilon: f64,

    /// Bounding-box overlap ratio above which duplicate suspects are
    /// confirmed duplicates, [0, 1]
    pub overlap_threshold: f64,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err("confidence_threshold must be within [0, 1]".to_string());
        }
        if self.value_epsilon < 0.0 {
            return Err("value_epsilon must be non-negative".to_string());
        }
        if !(0.0..=1.0).contains(&self.overlap_threshold) {
            return Err("overlap_threshold must be within [0, 1]".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            confidence_threshold: 0.3,
            value_epsilon: 0.1,
            overlap_threshold: 0.3,
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: keeps only high-confidence candidates and merges
    /// duplicates aggressively
    pub fn strict() -> Self {
        Self {
            confidence_threshold: 0.6,
            value_epsilon: 0.25,
            overlap_threshold: 0.2,
        }
    }

    /// Lenient preset: admits low-confidence OCR output, for poor scans
    pub fn lenient() -> Self {
        Self {
            confidence_threshold: 0.15,
            value_epsilon: 0.05,
            overlap_threshold: 0.5,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strict_config_is_valid() {
        let config = ExtractorConfig::strict();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lenient_config_is_valid() {
        let config = ExtractorConfig::lenient();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_confidence_threshold() {
        let mut config = ExtractorConfig::default();
        config.confidence_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_epsilon_rejected() {
        let mut config = ExtractorConfig::default();
        config.value_epsilon = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.confidence_threshold, parsed.confidence_threshold);
        assert_eq!(config.value_epsilon, parsed.value_epsilon);
        assert_eq!(config.overlap_threshold, parsed.overlap_threshold);
    }
}
