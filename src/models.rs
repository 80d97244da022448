// Core data structures for newsmorph

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Format of the `date` field in metadata files
pub const META_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Author placeholder when the page carries no author markup
pub const AUTHOR_NOT_FOUND: &str = "NOT FOUND";

pub const RAW_SUFFIX: &str = "_raw.txt";
pub const META_SUFFIX: &str = "_meta.json";
pub const PROCESSED_SUFFIX: &str = "_processed.txt";

/// News article collected by the crawler
///
/// Created empty for a discovered URL, filled by the parser, then written
/// as `<id>_raw.txt` plus `<id>_meta.json`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Article {
    pub url: String,
    pub article_id: u32,
    pub title: String,
    pub date: Option<NaiveDateTime>,
    pub author: String,
    pub topics: Vec<String>,
    pub text: String,
}

/// On-disk shape of `<id>_meta.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleMeta {
    pub id: u32,
    pub url: String,
    pub title: String,
    pub date: String,
    pub author: String,
    pub topics: Vec<String>,
}

impl Article {
    /// Create an empty article for a discovered URL
    pub fn new(url: impl Into<String>, article_id: u32) -> Self {
        Self {
            url: url.into(),
            article_id,
            ..Default::default()
        }
    }

    /// Date rendered as `YYYY-MM-DD HH:MM:SS`, empty when unknown
    pub fn date_to_text(&self) -> String {
        self.date
            .map(|d| d.format(META_DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Parse a metadata date string
    pub fn date_from_meta(text: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(text, META_DATE_FORMAT).ok()
    }

    /// Metadata document for this article
    pub fn get_meta(&self) -> ArticleMeta {
        ArticleMeta {
            id: self.article_id,
            url: self.url.clone(),
            title: self.title.clone(),
            date: self.date_to_text(),
            author: self.author.clone(),
            topics: self.topics.clone(),
        }
    }

    /// Rebuild an article from its metadata; the text is left empty
    pub fn from_meta(meta: ArticleMeta) -> Self {
        Self {
            date: Self::date_from_meta(&meta.date),
            url: meta.url,
            article_id: meta.id,
            title: meta.title,
            author: meta.author,
            topics: meta.topics,
            text: String::new(),
        }
    }

    pub fn raw_text_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}{RAW_SUFFIX}", self.article_id))
    }

    pub fn meta_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}{META_SUFFIX}", self.article_id))
    }

    pub fn processed_text_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}{PROCESSED_SUFFIX}", self.article_id))
    }
}

/// Parse the integer id prefix of a dataset file name, e.g. `12_raw.txt` -> 12
pub fn id_from_file_name(file_name: &str, suffix: &str) -> Option<u32> {
    file_name.strip_suffix(suffix)?.parse().ok()
}
