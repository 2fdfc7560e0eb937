//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub ranking: RankingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root directory scanned for uploaded resumes
    pub resumes_dir: PathBuf,
    /// Directory holding the job description `.txt` files
    pub jobs_dir: PathBuf,
    pub recursive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    pub strategy: VectorizerStrategy,
    /// Keep only the first K sentences of each document before tokenizing
    pub summary_sentences: Option<usize>,
    pub zero_score_policy: ZeroScorePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub show_failures: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorizerStrategy {
    /// Smoothed TF-IDF weights over the request's own corpus
    TfIdf,
    /// Raw term counts
    Count,
}

/// What to do with resumes whose similarity is zero or below
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroScorePolicy {
    Keep,
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            resumes_dir: PathBuf::from("./Original_Resumes"),
            jobs_dir: PathBuf::from("./Job_Description"),
            recursive: true,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            strategy: VectorizerStrategy::TfIdf,
            summary_sentences: None,
            zero_score_policy: ZeroScorePolicy::Keep,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
            show_failures: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.ranking.summary_sentences == Some(0) {
            return Err(ScreenerError::Configuration(
                "ranking.summary_sentences must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Display for VectorizerStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorizerStrategy::TfIdf => write!(f, "tfidf"),
            VectorizerStrategy::Count => write!(f, "count"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_load_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.ranking.strategy, VectorizerStrategy::TfIdf);
        assert_eq!(config.ranking.zero_score_policy, ZeroScorePolicy::Keep);
        assert_eq!(config.ranking.summary_sentences, None);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.ranking.strategy = VectorizerStrategy::Count;
        config.ranking.summary_sentences = Some(3);
        config.output.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.ranking.strategy, VectorizerStrategy::Count);
        assert_eq!(loaded.ranking.summary_sentences, Some(3));
        assert_eq!(loaded.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_zero_summary_sentences() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.ranking.summary_sentences = Some(0);
        config.save_to(&path).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ScreenerError::Configuration(_))
        ));
    }
}
