//! Lexiscale CLI - Command-line interface for the readability engine
//!
//! Commands:
//! - score: Score a text file (or stdin) for readability
//! - range: Print the target grade range for a tier and adjustment
//! - check: Score a candidate and check it against a tier's range
//! - config: Print the effective scoring configuration
//!
//! Logging is controlled by LEXISCALE_LOG (EnvFilter directives, default
//! "warn") and LEXISCALE_LOG_FORMAT ("json" for structured output). Logs go to
//! stderr.

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use lexiscale::{
    CandidateVerdict, PassageMetadata, ReadabilityEngine, ReadabilityError, ReadabilityReport,
    ScoringConfig, ENGINE_VERSION,
};

/// Lexiscale - Readability scoring and difficulty calibration
#[derive(Parser)]
#[command(name = "lexiscale")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Score text readability and calibrate target grade ranges", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a text for readability
    Score {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Scoring config file (.toml or .json)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        format: OutputFormat,
    },

    /// Print the target grade range for a proficiency tier
    Range {
        /// Proficiency tier (beginner, intermediate, advanced)
        #[arg(long)]
        tier: String,

        /// Challenge adjustment (easier, appropriate, challenging)
        #[arg(long)]
        adjustment: Option<String>,

        /// Scoring config file (.toml or .json)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a candidate text against a tier's target range
    Check {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Proficiency tier (beginner, intermediate, advanced)
        #[arg(long)]
        tier: String,

        /// Challenge adjustment (easier, appropriate, challenging)
        #[arg(long)]
        adjustment: Option<String>,

        /// Scoring config file (.toml or .json)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the effective scoring configuration as JSON
    Config {
        /// Scoring config file (.toml or .json)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON envelope
    Json,
    /// Pretty-printed JSON envelope
    JsonPretty,
    /// Human-readable summary
    Text,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(LexiscaleCliError::CandidateRejected(verdict)) => {
            tracing::info!(?verdict, "candidate rejected");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("LEXISCALE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr);

    match std::env::var("LEXISCALE_LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

fn run(cli: Cli) -> Result<(), LexiscaleCliError> {
    match cli.command {
        Commands::Score {
            input,
            config,
            format,
        } => cmd_score(&input, config.as_deref(), format),

        Commands::Range {
            tier,
            adjustment,
            config,
        } => cmd_range(&tier, adjustment.as_deref(), config.as_deref()),

        Commands::Check {
            input,
            tier,
            adjustment,
            config,
        } => cmd_check(&input, &tier, adjustment.as_deref(), config.as_deref()),

        Commands::Config { config } => cmd_config(config.as_deref()),
    }
}

fn cmd_score(
    input: &Path,
    config: Option<&Path>,
    format: OutputFormat,
) -> Result<(), LexiscaleCliError> {
    let engine = load_engine(config)?;
    let text = read_input(input)?;
    let report = engine.analyze_checked(&text)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&engine.encode(&report))?),
        OutputFormat::JsonPretty => println!("{}", engine.encode_to_json(&report)?),
        OutputFormat::Text => print_summary(&report),
    }

    Ok(())
}

fn cmd_range(
    tier: &str,
    adjustment: Option<&str>,
    config: Option<&Path>,
) -> Result<(), LexiscaleCliError> {
    let engine = load_engine(config)?;
    let range = engine.target_range_from_str(tier, adjustment);
    println!("{}", serde_json::to_string(&range)?);
    Ok(())
}

fn cmd_check(
    input: &Path,
    tier: &str,
    adjustment: Option<&str>,
    config: Option<&Path>,
) -> Result<(), LexiscaleCliError> {
    let engine = load_engine(config)?;
    let text = read_input(input)?;

    let tier = lexiscale::DifficultyTier::parse_or_default(tier);
    let adjustment = adjustment
        .map(lexiscale::ChallengeAdjustment::parse_or_default)
        .unwrap_or_default();
    let evaluation = engine.evaluate_candidate_checked(&text, tier, adjustment)?;

    let outcome = CheckReport {
        tier: tier.to_string(),
        adjustment: adjustment.to_string(),
        min_grade: evaluation.range.min_grade,
        max_grade: evaluation.range.max_grade,
        verdict: evaluation.verdict,
        metadata: PassageMetadata::from_report(&evaluation.report),
    };
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if evaluation.is_accepted() {
        Ok(())
    } else {
        Err(LexiscaleCliError::CandidateRejected(evaluation.verdict))
    }
}

fn cmd_config(config: Option<&Path>) -> Result<(), LexiscaleCliError> {
    let engine = load_engine(config)?;
    println!("{}", engine.config().to_json()?);
    Ok(())
}

// Helper functions

fn load_engine(config: Option<&Path>) -> Result<ReadabilityEngine, LexiscaleCliError> {
    let Some(path) = config else {
        return Ok(ReadabilityEngine::new());
    };

    let source = fs::read_to_string(path)?;
    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => ScoringConfig::from_toml_str(&source)?,
        _ => ScoringConfig::from_json(&source)?,
    };
    tracing::debug!(path = %path.display(), "using scoring config file");

    Ok(ReadabilityEngine::with_config(config)?)
}

fn read_input(input: &Path) -> Result<String, LexiscaleCliError> {
    if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            return Err(LexiscaleCliError::NoInput);
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn print_summary(report: &ReadabilityReport) {
    let metadata = PassageMetadata::from_report(report);

    println!("Readability Report");
    println!("==================");
    println!("Words:                 {}", metadata.word_count);
    println!("Sentences:             {}", metadata.sentence_count);
    println!("Syllables:             {}", report.syllable_count());
    println!("Words per sentence:    {}", metadata.avg_words_per_sentence);
    println!("Syllables per word:    {}", metadata.avg_syllables_per_word);
    println!("Flesch Reading Ease:   {}", metadata.flesch_reading_ease);
    println!("Flesch-Kincaid Grade:  {}", metadata.flesch_kincaid_grade);
    println!("Difficulty:            {}", metadata.difficulty_level);
    println!("Grade band:            {}", metadata.grade_band);
    println!("Estimated minutes:     {}", metadata.estimated_minutes);
    println!("Description:           {}", metadata.readability_description);
}

// Error types

#[derive(Debug)]
enum LexiscaleCliError {
    Io(io::Error),
    Engine(ReadabilityError),
    Json(serde_json::Error),
    NoInput,
    CandidateRejected(CandidateVerdict),
}

impl From<io::Error> for LexiscaleCliError {
    fn from(e: io::Error) -> Self {
        LexiscaleCliError::Io(e)
    }
}

impl From<ReadabilityError> for LexiscaleCliError {
    fn from(e: ReadabilityError) -> Self {
        LexiscaleCliError::Engine(e)
    }
}

impl From<serde_json::Error> for LexiscaleCliError {
    fn from(e: serde_json::Error) -> Self {
        LexiscaleCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<LexiscaleCliError> for CliError {
    fn from(e: LexiscaleCliError) -> Self {
        match e {
            LexiscaleCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            LexiscaleCliError::Engine(e @ ReadabilityError::TextTooLong { .. }) => CliError {
                code: "TEXT_TOO_LONG".to_string(),
                message: e.to_string(),
                hint: Some("Split the passage or raise max_text_chars in the config".to_string()),
            },
            LexiscaleCliError::Engine(e) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'lexiscale config' to see the expected shape".to_string()),
            },
            LexiscaleCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            LexiscaleCliError::NoInput => CliError {
                code: "NO_INPUT".to_string(),
                message: "stdin is a terminal, nothing to read".to_string(),
                hint: Some("Pipe text into the command or pass --input <file>".to_string()),
            },
            LexiscaleCliError::CandidateRejected(verdict) => CliError {
                code: "CANDIDATE_REJECTED".to_string(),
                message: format!("Candidate verdict: {:?}", verdict),
                hint: None,
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct CheckReport {
    tier: String,
    adjustment: String,
    min_grade: f64,
    max_grade: f64,
    verdict: CandidateVerdict,
    metadata: PassageMetadata,
}
