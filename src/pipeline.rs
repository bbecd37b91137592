//! Pipeline orchestration
//!
//! This module provides the public API for Lexiscale. It chains the stages
//! from raw text to a readability report and exposes grade-range calibration.

use crate::calibrator::{CandidateEvaluation, DifficultyCalibrator};
use crate::config::ScoringConfig;
use crate::encoder::{ReportEncoder, ReportEnvelope};
use crate::error::ReadabilityError;
use crate::metrics::MetricsExtractor;
use crate::scorer::ReadabilityScorer;
use crate::types::{ChallengeAdjustment, DifficultyTier, GradeRange, ReadabilityReport};

/// Analyze a text with the default configuration.
///
/// Total over all inputs: empty or whitespace-only text yields a report with
/// zero ease and zero grade.
///
/// # Example
/// ```
/// let report = lexiscale::analyze_readability("The cat sat. The dog ran.");
/// assert_eq!(report.sentence_count(), 2);
/// ```
pub fn analyze_readability(text: &str) -> ReadabilityReport {
    ReadabilityEngine::new().analyze(text)
}

/// Target grade range from raw tier and adjustment strings.
///
/// Unrecognized tiers fall back to `intermediate`, unrecognized or missing
/// adjustments to `appropriate`.
///
/// # Example
/// ```
/// assert_eq!(lexiscale::target_grade_range("beginner", Some("easier")), (1.0, 3.0));
/// ```
pub fn target_grade_range(tier: &str, adjustment: Option<&str>) -> (f64, f64) {
    ReadabilityEngine::new()
        .target_range_from_str(tier, adjustment)
        .as_tuple()
}

/// Analyze a text and encode the report as a JSON envelope
pub fn analyze_to_json(text: &str) -> Result<String, ReadabilityError> {
    let engine = ReadabilityEngine::new();
    let report = engine.analyze_checked(text)?;
    engine.encode_to_json(&report)
}

/// Configured engine combining extraction, scoring, calibration and encoding.
///
/// Holds no mutable state; one engine can serve any number of threads.
pub struct ReadabilityEngine {
    config: ScoringConfig,
    scorer: ReadabilityScorer,
    calibrator: DifficultyCalibrator,
    encoder: ReportEncoder,
}

impl Default for ReadabilityEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadabilityEngine {
    /// Create an engine with default constants
    pub fn new() -> Self {
        Self::build(ScoringConfig::default())
    }

    /// Create an engine from a config, validating it first
    pub fn with_config(config: ScoringConfig) -> Result<Self, ReadabilityError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Create an engine from a JSON config document
    pub fn from_json_config(json: &str) -> Result<Self, ReadabilityError> {
        Ok(Self::build(ScoringConfig::from_json(json)?))
    }

    /// Create an engine from a TOML config document
    pub fn from_toml_config(source: &str) -> Result<Self, ReadabilityError> {
        Ok(Self::build(ScoringConfig::from_toml_str(source)?))
    }

    fn build(config: ScoringConfig) -> Self {
        Self {
            scorer: ReadabilityScorer::with_config(config.clone()),
            calibrator: DifficultyCalibrator::with_config(&config),
            encoder: ReportEncoder::new(),
            config,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Extract metrics and score them
    pub fn analyze(&self, text: &str) -> ReadabilityReport {
        let metrics = MetricsExtractor::extract(text);
        self.scorer.score(metrics)
    }

    /// Like [`Self::analyze`], but enforces the configured length cap first
    pub fn analyze_checked(&self, text: &str) -> Result<ReadabilityReport, ReadabilityError> {
        self.config.check_text_length(text)?;
        Ok(self.analyze(text))
    }

    pub fn target_range(&self, tier: DifficultyTier, adjustment: ChallengeAdjustment) -> GradeRange {
        self.calibrator.target_grade_range(tier, adjustment)
    }

    pub fn target_range_from_str(&self, tier: &str, adjustment: Option<&str>) -> GradeRange {
        self.calibrator.target_grade_range_from_str(tier, adjustment)
    }

    /// Score a generated candidate and check it against a tier's range
    pub fn evaluate_candidate(
        &self,
        text: &str,
        tier: DifficultyTier,
        adjustment: ChallengeAdjustment,
    ) -> CandidateEvaluation {
        let report = self.analyze(text);
        let range = self.target_range(tier, adjustment);
        let verdict = self.calibrator.evaluate(&report, range);
        tracing::debug!(
            grade = report.flesch_kincaid_grade,
            min_grade = range.min_grade,
            max_grade = range.max_grade,
            ?verdict,
            "evaluated candidate text"
        );
        CandidateEvaluation {
            report,
            range,
            verdict,
        }
    }

    /// Like [`Self::evaluate_candidate`], but enforces the configured length cap first
    pub fn evaluate_candidate_checked(
        &self,
        text: &str,
        tier: DifficultyTier,
        adjustment: ChallengeAdjustment,
    ) -> Result<CandidateEvaluation, ReadabilityError> {
        self.config.check_text_length(text)?;
        Ok(self.evaluate_candidate(text, tier, adjustment))
    }

    pub fn encode(&self, report: &ReadabilityReport) -> ReportEnvelope {
        self.encoder.encode(report)
    }

    pub fn encode_to_json(&self, report: &ReadabilityReport) -> Result<String, ReadabilityError> {
        self.encoder.encode_to_json(report)
    }
}
