//! Configuration management for newsmorph
//!
//! Two layers live here:
//!
//! - [`Settings`]: application settings (dataset directory, crawler config
//!   location, HTTP timeout, analyzer commands, logging) loaded from an optional
//!   TOML file and overridden by `NEWSMORPH_*` environment variables.
//! - [`crawler`]: the JSON crawler config with seed URLs and the article cap,
//!   validated by [`crawler::validate_config`].

pub mod crawler;

pub use crawler::{validate_config, CrawlerConfig, MAX_ARTICLES};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Crawler settings
    pub crawler: CrawlerSettings,

    /// Dataset storage settings
    pub storage: StorageSettings,

    /// Morphological analyzer settings
    pub analyzer: AnalyzerSettings,

    /// Logging settings
    pub logging: LoggingSettings,
}

/// Crawler-specific settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerSettings {
    /// Path of the JSON crawler config (seed URLs and article cap)
    pub config_path: PathBuf,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Fixed user agent; a browser-like one is rotated when unset
    pub user_agent: Option<String>,
}

/// Dataset storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding `<id>_raw.txt`, `<id>_meta.json`, `<id>_processed.txt`
    pub assets_dir: PathBuf,
}

/// Morphological analyzer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerSettings {
    /// Path or name of the mystem binary
    pub mystem_path: String,

    /// Arguments passed to mystem; JSON output is required
    pub mystem_args: Vec<String>,

    /// Secondary tagger command line (program followed by arguments)
    pub tagger_command: Vec<String>,

    /// Secondary tagger lexicon (`word<TAB>tags` per line), used when no
    /// tagger command is set
    pub lexicon_path: Option<PathBuf>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for CrawlerSettings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("crawler_config.json"),
            request_timeout_secs: 30,
            user_agent: None,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("tmp/articles"),
        }
    }
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            mystem_path: String::from("mystem"),
            mystem_args: ["--format", "json", "-i", "-d", "-e", "utf-8"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            tagger_command: Vec::new(),
            lexicon_path: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Settings {
    /// Load settings from an optional TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env();
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML settings file: {}", path.display()))?;

        Ok(settings)
    }

    fn apply_env(&mut self) {
        if let Ok(path) = std::env::var("NEWSMORPH_CRAWLER_CONFIG") {
            self.crawler.config_path = PathBuf::from(path);
        }

        if let Some(timeout) = std::env::var("NEWSMORPH_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            self.crawler.request_timeout_secs = timeout;
        }

        if let Ok(agent) = std::env::var("NEWSMORPH_USER_AGENT") {
            self.crawler.user_agent = Some(agent);
        }

        if let Ok(dir) = std::env::var("NEWSMORPH_ASSETS_DIR") {
            self.storage.assets_dir = PathBuf::from(dir);
        }

        if let Ok(mystem) = std::env::var("NEWSMORPH_MYSTEM") {
            self.analyzer.mystem_path = mystem;
        }

        if let Ok(command) = std::env::var("NEWSMORPH_TAGGER") {
            self.analyzer.tagger_command = command.split_whitespace().map(String::from).collect();
        }

        if let Ok(lexicon) = std::env::var("NEWSMORPH_LEXICON") {
            self.analyzer.lexicon_path = Some(PathBuf::from(lexicon));
        }

        if let Ok(level) = std::env::var("NEWSMORPH_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(format) = std::env::var("NEWSMORPH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Validate settings values
    pub fn validate(&self) -> Result<()> {
        if self.crawler.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.storage.assets_dir.as_os_str().is_empty() {
            anyhow::bail!("assets_dir must not be empty");
        }

        if self.analyzer.mystem_path.trim().is_empty() {
            anyhow::bail!("mystem_path must not be empty");
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("logging format must be 'text' or 'json'");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.crawler.request_timeout_secs)
    }
}
