//! Lexiscale - Readability scoring and difficulty calibration engine
//!
//! Lexiscale scores arbitrary text for reading difficulty and maps a reader's
//! proficiency tier to a target grade range for content selection. Everything
//! is a pure function over text and small records: metric extraction →
//! Flesch scoring → tier/band classification, plus tier → grade range
//! calibration.
//!
//! ## Modules
//!
//! - **Metrics**: word, sentence and syllable counts
//! - **Scorer**: Flesch Reading Ease, Flesch-Kincaid Grade and classification
//! - **Calibrator**: target grade ranges and candidate acceptance

pub mod calibrator;
pub mod config;
pub mod encoder;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod scorer;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use calibrator::{CandidateEvaluation, CandidateVerdict, DifficultyCalibrator};
pub use config::ScoringConfig;
pub use encoder::{PassageMetadata, ReportEncoder, ReportEnvelope};
pub use error::ReadabilityError;
pub use metrics::{extract_metrics, MetricsExtractor};
pub use pipeline::{analyze_readability, analyze_to_json, target_grade_range, ReadabilityEngine};
pub use scorer::{score, ReadabilityScorer};
pub use types::{
    ChallengeAdjustment, DifficultyTier, GradeBand, GradeRange, ReadabilityDescription,
    ReadabilityReport, TextMetrics,
};

/// Engine version embedded in all report envelopes
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report envelopes
pub const PRODUCER_NAME: &str = "lexiscale";
