//! Error types for Lexiscale
//!
//! Scoring and calibration are total and never fail. These errors only come
//! from the edges: configuration loading, the caller-side length guard and
//! JSON encoding.

use thiserror::Error;

/// Errors that can occur around the scoring core
#[derive(Debug, Error)]
pub enum ReadabilityError {
    #[error("Invalid scoring config: {0}")]
    InvalidConfig(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },

    #[error("Text too long: {length} characters (max {max})")]
    TextTooLong { length: usize, max: usize },
}
