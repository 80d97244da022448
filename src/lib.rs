//! newsmorph - news crawler and morphological tagging pipeline
//!
//! Collects articles from configured news sites into a dataset directory and
//! annotates every article text with lemmas and grammatical tags.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Settings file and crawler config validation
//! - [`crawler`] - Page fetching and article link discovery
//! - [`parser`] - Article field extraction
//! - [`models`] - Core data structures and dataset file naming
//! - [`storage`] - Raw, metadata and processed file storage
//! - [`pipeline`] - Corpus registry, analyzers and processing pipeline
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use newsmorph::config::validate_config;
//! use newsmorph::crawler::fetcher::PageFetcher;
//! use newsmorph::crawler::Crawler;
//! use newsmorph::parser::NewsHtmExtractor;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (seeds, count) = validate_config(Path::new("crawler_config.json"))?;
//!     let fetcher = PageFetcher::new()?;
//!     let extractor = NewsHtmExtractor::new();
//!
//!     let mut crawler = Crawler::new(seeds, count, &fetcher, &extractor);
//!     crawler.find_articles().await?;
//!     println!("{:?}", crawler.get_search_urls());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{validate_config, CrawlerConfig, Settings};
    pub use crate::crawler::fetcher::PageFetcher;
    pub use crate::crawler::Crawler;
    pub use crate::error::{Error, ErrorCategory, NewsmorphErrorTrait, Result};
    pub use crate::models::{Article, ArticleMeta};
    pub use crate::parser::{ArticleParser, NewsHtmExtractor, PageFieldExtractor};
    pub use crate::pipeline::{
        inspect_dataset, validate_dataset, CorpusManager, MorphAnalyzer, MorphologicalToken,
        TextProcessingPipeline, WordTagger,
    };
    pub use crate::storage::ArticleStore;
}

// Direct re-exports for convenience
pub use models::{Article, ArticleMeta};
