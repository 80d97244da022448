//! Error types for the newsmorph crawler and pipeline
//!
//! This module defines custom error types used throughout the application.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status code
    #[error("Server responded with status {status} for {url}")]
    Status { url: String, status: u16 },

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Content decoding error
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors that can occur while extracting article fields from a page
#[derive(Error, Debug)]
pub enum ParseError {
    /// Title not found in HTML
    #[error("Title not found in article")]
    TitleNotFound,

    /// Body text not found in HTML
    #[error("Content not found in article")]
    ContentNotFound,

    /// Topic link not found in HTML
    #[error("Topic not found in article")]
    TopicNotFound,

    /// Date element not found in HTML
    #[error("Date not found in article")]
    DateNotFound,

    /// Date text does not follow the site's format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),
}

/// General crawler errors
#[derive(Error, Debug)]
pub enum CrawlerError {
    /// Fetch error
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Seed URL cannot be used as a join base
    #[error("Invalid seed URL: {0}")]
    InvalidSeedUrl(String),
}

/// Crawler config validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config is not valid JSON or misses a required key
    #[error("Malformed config: {0}")]
    Malformed(String),

    /// A base URL does not use the secure scheme
    #[error("Incorrect URL in base_urls: {0}")]
    IncorrectUrl(String),

    /// Article count is not an integer
    #[error("total_articles_to_find_and_parse must be an integer, got {0}")]
    IncorrectNumberOfArticles(String),

    /// Article count is outside the allowed range
    #[error("total_articles_to_find_and_parse must be within 1..=100, got {0}")]
    NumberOfArticlesOutOfRange(i64),
}

/// Dataset directory validation errors
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Path does not exist
    #[error("Dataset path not found: {0}")]
    NotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Dataset path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Directory has no entries
    #[error("Dataset directory is empty: {0}")]
    EmptyDirectory(PathBuf),

    /// Requested article id is not registered
    #[error("Article {0} not found in dataset")]
    ArticleNotFound(u32),

    /// `<id>_meta.json` names a different article id
    #[error("Metadata file for article {file_id} has id {meta_id}")]
    MetaIdMismatch { file_id: u32, meta_id: u32 },

    /// I/O failure while scanning the directory
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Article file storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// File read/write failure
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Metadata (de)serialization failure
    #[error("Metadata error in {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Metadata date does not follow `%Y-%m-%d %H:%M:%S`
    #[error("Invalid metadata date in {path}: {value}")]
    InvalidDate { path: PathBuf, value: String },
}

/// Morphological analyzer errors
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Analyzer process could not be started
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Pipe I/O with the analyzer process failed
    #[error("Analyzer I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Analyzer process exited unsuccessfully
    #[error("{program} exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: String,
        stderr: String,
    },

    /// Analyzer output could not be interpreted
    #[error("Invalid analyzer output: {0}")]
    InvalidOutput(String),

    /// Tagger answered with a different number of lines than words sent
    #[error("Tagger returned {actual} results for {expected} words")]
    OutputMismatch { expected: usize, actual: usize },

    /// No analyzer command configured
    #[error("Analyzer not configured: {0}")]
    NotConfigured(String),
}
