//! Scoring configuration
//!
//! All tunable constants of the engine live here instead of in module-level
//! globals, so tests and callers can override them explicitly. Every field
//! has a serde default, which lets a partial JSON or TOML document override
//! only what it names.

use crate::error::ReadabilityError;
use crate::types::{DifficultyTier, GradeRange};
use serde::{Deserialize, Serialize};

/// Reading speed assumed for developing readers (words per minute)
pub const DEFAULT_WORDS_PER_MINUTE: f64 = 150.0;

/// Default caller-side cap on input length, in characters
pub const DEFAULT_MAX_TEXT_CHARS: usize = 50_000;

/// Upper grade bounds used to classify a Flesch-Kincaid grade.
///
/// A grade `<= beginner_max` is beginner/elementary, `<= intermediate_max` is
/// intermediate/middle, `<= high_max` is advanced/high, anything above is
/// advanced/adult.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeThresholds {
    pub beginner_max: f64,
    pub intermediate_max: f64,
    pub high_max: f64,
}

impl Default for GradeThresholds {
    fn default() -> Self {
        Self {
            beginner_max: 5.0,
            intermediate_max: 8.0,
            high_max: 12.0,
        }
    }
}

/// Base target grade range per proficiency tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseRanges {
    pub beginner: GradeRange,
    pub intermediate: GradeRange,
    pub advanced: GradeRange,
}

impl Default for BaseRanges {
    fn default() -> Self {
        Self {
            beginner: GradeRange::new(2.0, 5.0),
            intermediate: GradeRange::new(6.0, 8.0),
            advanced: GradeRange::new(9.0, 12.0),
        }
    }
}

impl BaseRanges {
    pub fn for_tier(&self, tier: DifficultyTier) -> GradeRange {
        match tier {
            DifficultyTier::Beginner => self.beginner,
            DifficultyTier::Intermediate => self.intermediate,
            DifficultyTier::Advanced => self.advanced,
        }
    }
}

/// How a challenge adjustment shifts a base range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentPolicy {
    /// Grades added (challenging) or removed (easier)
    pub shift: f64,
    /// Lowest `min_grade` an easier range may reach
    pub easier_min_floor: f64,
    /// Lowest `max_grade` an easier range may reach
    pub easier_max_floor: f64,
}

impl Default for AdjustmentPolicy {
    fn default() -> Self {
        Self {
            shift: 2.0,
            easier_min_floor: 1.0,
            easier_max_floor: 3.0,
        }
    }
}

/// Configuration shared by the scorer and the calibrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub words_per_minute: f64,
    pub grade_thresholds: GradeThresholds,
    pub base_ranges: BaseRanges,
    pub adjustment: AdjustmentPolicy,
    /// Input cap enforced by callers; `None` disables the guard
    pub max_text_chars: Option<usize>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            grade_thresholds: GradeThresholds::default(),
            base_ranges: BaseRanges::default(),
            adjustment: AdjustmentPolicy::default(),
            max_text_chars: Some(DEFAULT_MAX_TEXT_CHARS),
        }
    }
}

impl ScoringConfig {
    /// Parse and validate a JSON config document
    pub fn from_json(json: &str) -> Result<Self, ReadabilityError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        tracing::debug!(?config, "loaded scoring config from JSON");
        Ok(config)
    }

    /// Parse and validate a TOML config document
    pub fn from_toml_str(source: &str) -> Result<Self, ReadabilityError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        tracing::debug!(?config, "loaded scoring config from TOML");
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ReadabilityError> {
        serde_json::to_string_pretty(self).map_err(ReadabilityError::JsonError)
    }

    /// Check internal consistency of all constants
    pub fn validate(&self) -> Result<(), ReadabilityError> {
        if !self.words_per_minute.is_finite() || self.words_per_minute <= 0.0 {
            return Err(invalid(format!(
                "words_per_minute must be positive, got {}",
                self.words_per_minute
            )));
        }

        let t = &self.grade_thresholds;
        let thresholds_finite = [t.beginner_max, t.intermediate_max, t.high_max]
            .iter()
            .all(|value| value.is_finite());
        let increasing = t.beginner_max < t.intermediate_max && t.intermediate_max < t.high_max;
        if !thresholds_finite || !increasing {
            return Err(invalid(format!(
                "grade thresholds must be strictly increasing, got {} / {} / {}",
                t.beginner_max, t.intermediate_max, t.high_max
            )));
        }

        for (name, range) in [
            ("beginner", self.base_ranges.beginner),
            ("intermediate", self.base_ranges.intermediate),
            ("advanced", self.base_ranges.advanced),
        ] {
            if !range.min_grade.is_finite()
                || !range.max_grade.is_finite()
                || range.min_grade < 0.0
                || range.min_grade > range.max_grade
            {
                return Err(invalid(format!(
                    "base range for {name} is invalid: [{}, {}]",
                    range.min_grade, range.max_grade
                )));
            }
        }

        let a = &self.adjustment;
        if !a.shift.is_finite() || a.shift < 0.0 {
            return Err(invalid(format!(
                "adjustment shift must be finite and not negative, got {}",
                a.shift
            )));
        }
        if !a.easier_min_floor.is_finite() || !a.easier_max_floor.is_finite() {
            return Err(invalid(format!(
                "easier floors must be finite, got {} / {}",
                a.easier_min_floor, a.easier_max_floor
            )));
        }
        if a.easier_min_floor > a.easier_max_floor {
            return Err(invalid(format!(
                "easier floors are inverted: min {} > max {}",
                a.easier_min_floor, a.easier_max_floor
            )));
        }

        Ok(())
    }

    /// Caller-side length guard; the scoring core itself accepts any length
    pub fn check_text_length(&self, text: &str) -> Result<(), ReadabilityError> {
        let Some(max) = self.max_text_chars else {
            return Ok(());
        };
        let length = text.chars().count();
        if length > max {
            return Err(ReadabilityError::TextTooLong { length, max });
        }
        Ok(())
    }
}

fn invalid(message: String) -> ReadabilityError {
    tracing::warn!(%message, "rejected scoring config");
    ReadabilityError::InvalidConfig(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        let config = ScoringConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.words_per_minute, 150.0);
        assert_eq!(config.max_text_chars, Some(50_000));
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let config = ScoringConfig::from_json(r#"{"words_per_minute": 200}"#).unwrap();
        assert_eq!(config.words_per_minute, 200.0);
        assert_eq!(config.grade_thresholds, GradeThresholds::default());
        assert_eq!(config.base_ranges, BaseRanges::default());
    }

    #[test]
    fn test_toml_config() {
        let source = r#"
            words_per_minute = 120.0

            [grade_thresholds]
            beginner_max = 4.0

            [base_ranges.advanced]
            min_grade = 10.0
            max_grade = 13.0
        "#;
        let config = ScoringConfig::from_toml_str(source).unwrap();
        assert_eq!(config.words_per_minute, 120.0);
        assert_eq!(config.grade_thresholds.beginner_max, 4.0);
        assert_eq!(config.grade_thresholds.intermediate_max, 8.0);
        assert_eq!(config.base_ranges.advanced, GradeRange::new(10.0, 13.0));
        assert_eq!(config.base_ranges.beginner, GradeRange::new(2.0, 5.0));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ScoringConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(ScoringConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let result = ScoringConfig::from_json(r#"{"words_per_minute": 0}"#);
        assert!(matches!(result, Err(ReadabilityError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_unordered_thresholds() {
        let result = ScoringConfig::from_json(
            r#"{"grade_thresholds": {"beginner_max": 9, "intermediate_max": 8, "high_max": 12}}"#,
        );
        assert!(matches!(result, Err(ReadabilityError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let result = ScoringConfig::from_json(
            r#"{"base_ranges": {"beginner": {"min_grade": 5, "max_grade": 2}}}"#,
        );
        assert!(matches!(result, Err(ReadabilityError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        for source in [
            "[adjustment]\nshift = nan",
            "[adjustment]\neasier_min_floor = nan",
            "[adjustment]\neasier_max_floor = inf",
            "[base_ranges.beginner]\nmin_grade = nan\nmax_grade = 5.0",
            "[base_ranges.advanced]\nmin_grade = 9.0\nmax_grade = inf",
            "[grade_thresholds]\nhigh_max = inf",
        ] {
            assert!(
                matches!(
                    ScoringConfig::from_toml_str(source),
                    Err(ReadabilityError::InvalidConfig(_))
                ),
                "accepted {source:?}"
            );
        }

        let config = ScoringConfig {
            adjustment: AdjustmentPolicy {
                shift: f64::NAN,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(
            ScoringConfig::from_json("not json"),
            Err(ReadabilityError::JsonError(_))
        ));
        assert!(matches!(
            ScoringConfig::from_toml_str("words_per_minute = ["),
            Err(ReadabilityError::TomlError(_))
        ));
    }

    #[test]
    fn test_length_guard() {
        let config = ScoringConfig {
            max_text_chars: Some(5),
            ..Default::default()
        };
        assert!(config.check_text_length("hello").is_ok());
        assert!(matches!(
            config.check_text_length("hello!"),
            Err(ReadabilityError::TextTooLong { length: 6, max: 5 })
        ));

        let unbounded = ScoringConfig {
            max_text_chars: None,
            ..Default::default()
        };
        assert!(unbounded.check_text_length(&"a".repeat(100_000)).is_ok());
    }
}
