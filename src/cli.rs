//! CLI interface for the resume screener

use crate::config::{OutputFormat, VectorizerStrategy};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Rank resumes against a job description")]
#[command(long_about = "Extract text from PDF, DOCX and plain-text resumes and rank them by cosine similarity to a job description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank resumes against one job description
    Rank {
        /// Job description file, or its name inside the jobs directory
        #[arg(short, long)]
        job: PathBuf,

        /// Resume files to rank; defaults to every resume in the resume directory
        #[arg(short, long = "resume")]
        resumes: Vec<PathBuf>,

        #[command(flatten)]
        options: RankingArgs,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Rank the resume directory against every job description
    Batch {
        #[command(flatten)]
        options: RankingArgs,

        /// Write one report per job description into this directory
        #[arg(long)]
        save_dir: Option<PathBuf>,
    },

    /// List available job descriptions
    Jobs {
        /// Override the configured jobs directory
        #[arg(long)]
        jobs_dir: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

/// Ranking options shared by `rank` and `batch`
#[derive(Args, Debug, Clone, Default)]
pub struct RankingArgs {
    /// Directory scanned for resumes
    #[arg(long)]
    pub resumes_dir: Option<PathBuf>,

    /// Directory holding job descriptions
    #[arg(long)]
    pub jobs_dir: Option<PathBuf>,

    /// Vectorization strategy: tfidf, count
    #[arg(long)]
    pub strategy: Option<String>,

    /// Keep only the first N sentences of every document
    #[arg(long, value_name = "N")]
    pub summarize: Option<usize>,

    /// Leave resumes with a zero score out of the ranking
    #[arg(long)]
    pub drop_zero: bool,

    /// Output format: console, json, markdown
    #[arg(short, long)]
    pub output: Option<String>,

    /// Disable colored console output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Parse and validate vectorization strategy
pub fn parse_strategy(strategy: &str) -> Result<VectorizerStrategy, String> {
    match strategy.to_lowercase().replace('-', "").as_str() {
        "tfidf" => Ok(VectorizerStrategy::TfIdf),
        "count" => Ok(VectorizerStrategy::Count),
        _ => Err(format!("Invalid strategy: {}. Supported: tfidf, count", strategy)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
