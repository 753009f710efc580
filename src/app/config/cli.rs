use super::{ConfigError, LogLevel};
use crate::aggregator::ConsolidationConfig;
use crate::aggregator::config::{
    DEFAULT_MAX_GROUPS_TO_RANK, DEFAULT_MIN_OCCURRENCES_FOR_SIGNIFICANCE,
    DEFAULT_OCCURRENCE_SAMPLE_CAP,
};
use crate::fingerprint::{DEFAULT_FINGERPRINT_LENGTH, DEFAULT_MESSAGE_HASH_PREFIX_LENGTH};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
#[serde(default)]
pub struct Config {
    /// JSON array of raw error records produced by the log fetcher
    #[arg(long, env = "INPUT_FILE", default_value = "data/errors.json")]
    pub input: PathBuf,

    /// Where to write the consolidated groups (JSON object keyed by fingerprint)
    #[arg(long, env = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Where to write the summary and ranked issue drafts
    #[arg(long, env = "RANKED_OUTPUT_FILE")]
    pub ranked_output: Option<PathBuf>,

    /// Minimum occurrences for a group to be considered significant
    #[arg(long, env = "MIN_OCCURRENCES_FOR_ISSUE", default_value = "3")]
    pub min_occurrences: u64,

    /// Maximum number of significant groups to rank
    #[arg(long, env = "MAX_ISSUES_PER_RUN", default_value = "10")]
    pub max_groups: usize,

    /// Occurrence summaries kept per group
    #[arg(long, env = "OCCURRENCE_SAMPLE_CAP", default_value = "5")]
    pub occurrence_sample_cap: usize,

    /// Characters of the normalized message that take part in the fingerprint
    #[arg(long, env = "MESSAGE_HASH_PREFIX_LENGTH", default_value = "500")]
    pub message_hash_prefix_length: usize,

    /// Hex characters kept from the digest
    #[arg(long, env = "FINGERPRINT_LENGTH", default_value = "12")]
    pub fingerprint_length: usize,

    /// Records per partition for parallel aggregation (0 = sequential)
    #[arg(long, env = "PARALLEL_CHUNK_SIZE", default_value = "0")]
    pub parallel_chunk_size: usize,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Configuration file path (optional, TOML)
    #[arg(long, env = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/errors.json"),
            output: None,
            ranked_output: None,
            min_occurrences: DEFAULT_MIN_OCCURRENCES_FOR_SIGNIFICANCE,
            max_groups: DEFAULT_MAX_GROUPS_TO_RANK,
            occurrence_sample_cap: DEFAULT_OCCURRENCE_SAMPLE_CAP,
            message_hash_prefix_length: DEFAULT_MESSAGE_HASH_PREFIX_LENGTH,
            fingerprint_length: DEFAULT_FINGERPRINT_LENGTH,
            parallel_chunk_size: 0,
            log_level: LogLevel::Info,
            config_file: None,
        }
    }
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Config::parse_from(args);
        config.validate()?;
        Ok(config)
    }

    /// CLI/env config, replaced wholesale by the config file when one is named.
    pub fn load<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Self::from_args(args)?;
        match &config.config_file {
            Some(path) => Self::from_file(path),
            None => Ok(config),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn consolidation(&self) -> ConsolidationConfig {
        ConsolidationConfig {
            min_occurrences_for_significance: self.min_occurrences,
            max_groups_to_rank: self.max_groups,
            occurrence_sample_cap: self.occurrence_sample_cap,
            message_hash_prefix_length: self.message_hash_prefix_length,
            fingerprint_length: self.fingerprint_length,
        }
    }
}
