use serde::{Deserialize, Serialize};

/// Tunable limits for the acceptance pipeline. Ratios are compared with strict greater-than.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceptanceConfig {
    pub repetition_ratio_max: f64,
    pub symbol_ratio_max: f64,
    pub gibberish_ratio_max: f64,
    pub min_length: usize,
}

impl Default for AcceptanceConfig {
    fn default() -> Self {
        Self {
            repetition_ratio_max: 0.30,
            symbol_ratio_max: 0.20,
            gibberish_ratio_max: 0.30,
            min_length: 10,
        }
    }
}

impl AcceptanceConfig {
    pub fn validate(&self) -> Result<(), ThresholdError> {
        for (name, value) in [
            ("repetition_ratio_max", self.repetition_ratio_max),
            ("symbol_ratio_max", self.symbol_ratio_max),
            ("gibberish_ratio_max", self.gibberish_ratio_max),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ThresholdError::RatioOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    #[error("{name} must be a finite ratio between 0 and 1, found {value}")]
    RatioOutOfRange { name: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AcceptanceConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_negative_and_non_finite_ratios() {
        let negative = AcceptanceConfig {
            symbol_ratio_max: -0.2,
            ..AcceptanceConfig::default()
        };
        assert_eq!(
            negative.validate(),
            Err(ThresholdError::RatioOutOfRange {
                name: "symbol_ratio_max",
                value: -0.2
            })
        );

        let infinite = AcceptanceConfig {
            gibberish_ratio_max: f64::INFINITY,
            ..AcceptanceConfig::default()
        };
        assert!(infinite.validate().is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: AcceptanceConfig =
            serde_json::from_str(r#"{"min_length": 40}"#).expect("config parses");
        assert_eq!(config.min_length, 40);
        assert_eq!(config.repetition_ratio_max, 0.30);
    }
}
