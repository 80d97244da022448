//! Crawler config validation
//!
//! The crawler config is a JSON document:
//!
//! ```json
//! {"base_urls": ["https://..."], "total_articles_to_find_and_parse": 5}
//! ```
//!
//! Checks run in a fixed order: seed URLs first, then the article count type,
//! then its range. The first failing check decides the error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::utils::error::ConfigError;

/// Upper bound for `total_articles_to_find_and_parse`
pub const MAX_ARTICLES: i64 = 100;

/// Secure-scheme prefix every seed URL must contain
const URL_PATTERN: &str = "https://";

const BASE_URLS_KEY: &str = "base_urls";
const TOTAL_ARTICLES_KEY: &str = "total_articles_to_find_and_parse";

/// Validated crawler config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Seed pages scanned for article links
    pub base_urls: Vec<String>,

    /// Cap on discovered articles
    pub total_articles_to_find_and_parse: usize,
}

impl CrawlerConfig {
    /// Load and validate a crawler config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let (base_urls, total) = validate_config(path)?;
        Ok(Self {
            base_urls,
            total_articles_to_find_and_parse: total,
        })
    }
}

/// Validate the crawler config at `path` and return `(base_urls, count)`
///
/// # Errors
///
/// - `ConfigError::Read` if the file cannot be read
/// - `ConfigError::Malformed` if it is not JSON or misses a key
/// - `ConfigError::IncorrectUrl` if a seed URL is not a string containing `https://`
/// - `ConfigError::IncorrectNumberOfArticles` if the count is not an integer
/// - `ConfigError::NumberOfArticlesOutOfRange` if the count is outside `1..=100`
pub fn validate_config(path: &Path) -> Result<(Vec<String>, usize), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let settings: Value =
        serde_json::from_str(&content).map_err(|e| ConfigError::Malformed(e.to_string()))?;

    let result = validate_value(&settings)?;

    tracing::debug!(
        path = %path.display(),
        seeds = result.0.len(),
        total = result.1,
        "Crawler config validated"
    );

    Ok(result)
}

/// Validate an already-parsed crawler config document
pub fn validate_value(settings: &Value) -> Result<(Vec<String>, usize), ConfigError> {
    let urls = settings
        .get(BASE_URLS_KEY)
        .ok_or_else(|| ConfigError::Malformed(format!("missing key '{BASE_URLS_KEY}'")))?
        .as_array()
        .ok_or_else(|| ConfigError::Malformed(format!("'{BASE_URLS_KEY}' must be a list")))?;

    let mut base_urls = Vec::with_capacity(urls.len());
    for url in urls {
        match url.as_str() {
            Some(url) if url.contains(URL_PATTERN) => base_urls.push(url.to_string()),
            _ => return Err(ConfigError::IncorrectUrl(url.to_string())),
        }
    }

    let total = settings
        .get(TOTAL_ARTICLES_KEY)
        .ok_or_else(|| ConfigError::Malformed(format!("missing key '{TOTAL_ARTICLES_KEY}'")))?;

    let total = match total {
        Value::Number(n) if n.is_i64() || n.is_u64() => n.as_i64().unwrap_or(i64::MAX),
        other => return Err(ConfigError::IncorrectNumberOfArticles(other.to_string())),
    };

    if !(1..=MAX_ARTICLES).contains(&total) {
        return Err(ConfigError::NumberOfArticlesOutOfRange(total));
    }

    // range check above keeps this lossless
    Ok((base_urls, total as usize))
}
