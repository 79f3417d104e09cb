//! CLI argument definitions for the Lodestone application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Lodestone — semantic search over a small news article corpus.
#[derive(Parser, Debug)]
#[command(name = "lodestone", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Path to a JSON article corpus. Defaults to the bundled data.
    #[arg(long = "corpus")]
    pub corpus: Option<PathBuf>,

    /// Base URL of the embedding endpoint.
    #[arg(long = "endpoint")]
    pub endpoint: Option<String>,

    /// Embedding model name.
    #[arg(short = 'm', long = "model")]
    pub model: Option<String>,

    /// Number of results per query.
    #[arg(short = 'k', long = "top-k")]
    pub top_k: Option<usize>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > LODESTONE_CONFIG env var >
    /// ~/.lodestone/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("LODESTONE_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the embedding endpoint.
    ///
    /// Priority: --endpoint flag > LODESTONE_ENDPOINT env var > config file.
    pub fn resolve_endpoint(&self, config_endpoint: &str) -> String {
        if let Some(ref e) = self.endpoint {
            return e.clone();
        }
        if let Ok(e) = std::env::var("LODESTONE_ENDPOINT") {
            return e;
        }
        config_endpoint.to_string()
    }

    /// Resolve the embedding model name.
    ///
    /// Priority: --model flag > config file.
    pub fn resolve_model(&self, config_model: &str) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| config_model.to_string())
    }

    /// Resolve the number of results per query.
    ///
    /// Priority: --top-k flag > config file.
    pub fn resolve_top_k(&self, config_top_k: usize) -> usize {
        self.top_k.unwrap_or(config_top_k)
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file.
    pub fn resolve_log_level(&self, config_log_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_log_level.to_string())
    }
}

/// Platform default config path (~/.lodestone/config.toml).
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
        return PathBuf::from(home).join(".lodestone").join("config.toml");
    }
    PathBuf::from("config.toml")
}
