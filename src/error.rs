//! Unified error handling for the newsmorph crate
//!
//! Every stage has its own error enum in [`crate::utils::error`]. Library entry
//! points that cross stages (parse then store, read then analyze) return the
//! wrapping [`Error`] instead.
//!
//! # Architecture
//!
//! - [`NewsmorphErrorTrait`] - Recoverability and category, for [`Error`] and [`FetchError`]
//! - [`ErrorCategory`] - Coarse grouping used in logs
//! - [`Error`] - Wrapper over the per-stage enums

use thiserror::Error;

pub use crate::utils::error::{
    AnalyzerError, ConfigError, CrawlerError, DatasetError, FetchError, ParseError, StorageError,
};

/// Common trait for newsmorph error types
pub trait NewsmorphErrorTrait: std::error::Error {
    /// Check if this error is transient (a later rerun may succeed)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout)
    Network,
    /// Parsing and data extraction errors
    Parsing,
    /// Storage and I/O errors
    Storage,
    /// Morphological analyzer errors
    Analyzer,
    /// Configuration and validation errors
    Config,
}

impl ErrorCategory {
    /// Short human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network => "network error",
            Self::Parsing => "parsing error",
            Self::Storage => "storage error",
            Self::Analyzer => "analyzer error",
            Self::Config => "configuration error",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Unified error type for the newsmorph crate
#[derive(Error, Debug)]
pub enum Error {
    /// Crawler-related errors (fetch, link discovery)
    #[error("Crawler error: {0}")]
    Crawler(#[from] CrawlerError),

    /// Fetch-specific errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Parse-specific errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Crawler config validation errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Dataset directory errors
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Article file storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Morphological analyzer errors
    #[error("Analyzer error: {0}")]
    Analyzer(#[from] AnalyzerError),
}

impl NewsmorphErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Crawler(CrawlerError::Fetch(e)) | Self::Fetch(e) => e.is_recoverable(),
            Self::Crawler(_) => false,
            Self::Parse(_) => false,
            Self::Config(_) => false,
            Self::Dataset(_) => false,
            Self::Storage(_) => true,
            Self::Analyzer(e) => matches!(e, AnalyzerError::Io(_)),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Crawler(_) | Self::Fetch(_) => ErrorCategory::Network,
            Self::Parse(_) => ErrorCategory::Parsing,
            Self::Config(_) => ErrorCategory::Config,
            Self::Dataset(_) | Self::Storage(_) => ErrorCategory::Storage,
            Self::Analyzer(_) => ErrorCategory::Analyzer,
        }
    }
}

impl NewsmorphErrorTrait for FetchError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout(_) => true,
            Self::Status { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Decode(_) | Self::InvalidUrl(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Network
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
