//! Dataset file storage
//!
//! Every article owns up to three files inside one dataset directory:
//! `<id>_raw.txt`, `<id>_meta.json` and `<id>_processed.txt`. The directory is
//! passed in explicitly so crawler and pipeline runs can point at isolated
//! locations.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{Article, ArticleMeta};
use crate::utils::error::StorageError;

/// Reader/writer for article files in one dataset directory
#[derive(Debug, Clone)]
pub struct ArticleStore {
    dir: PathBuf,
}

impl ArticleStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Dataset directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the dataset directory if missing; existing files are kept
    pub fn prepare(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;
        tracing::debug!(dir = %self.dir.display(), "Dataset directory ready");
        Ok(())
    }

    /// Write raw text and metadata for a parsed article
    pub fn save_raw(&self, article: &Article) -> Result<(), StorageError> {
        let raw_path = article.raw_text_path(&self.dir);
        write_file(&raw_path, article.text.as_bytes())?;

        let meta_path = article.meta_path(&self.dir);
        let meta = to_pretty_json(&article.get_meta()).map_err(|source| {
            StorageError::Metadata {
                path: meta_path.clone(),
                source,
            }
        })?;
        write_file(&meta_path, &meta)?;

        tracing::debug!(
            id = article.article_id,
            raw = %raw_path.display(),
            meta = %meta_path.display(),
            "Saved article"
        );
        Ok(())
    }

    /// Write processed text for an article id
    pub fn save_processed(&self, article: &Article, processed: &str) -> Result<PathBuf, StorageError> {
        let path = article.processed_text_path(&self.dir);
        write_file(&path, processed.as_bytes())?;
        Ok(path)
    }

    /// Read raw text for an article id
    pub fn read_raw(&self, article: &Article) -> Result<String, StorageError> {
        let path = article.raw_text_path(&self.dir);
        fs::read_to_string(&path).map_err(|source| StorageError::Io { path, source })
    }

    /// Load an article from `<id>_meta.json`; the text is left empty
    pub fn load_meta(&self, article_id: u32) -> Result<Article, StorageError> {
        let path = Article::new("", article_id).meta_path(&self.dir);
        let content = fs::read_to_string(&path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;
        let meta: ArticleMeta = serde_json::from_str(&content).map_err(|source| {
            StorageError::Metadata {
                path: path.clone(),
                source,
            }
        })?;

        if Article::date_from_meta(&meta.date).is_none() {
            return Err(StorageError::InvalidDate {
                path,
                value: meta.date,
            });
        }

        Ok(Article::from_meta(meta))
    }
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), StorageError> {
    fs::write(path, content).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// JSON with four-space indentation and unescaped non-ASCII text
fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn article(id: u32) -> Article {
        Article {
            url: format!("https://news.example.ru/news-{id}-1.htm"),
            article_id: id,
            title: "Новости города".to_string(),
            date: NaiveDate::from_ymd_opt(2021, 5, 1).and_then(|d| d.and_hms_opt(0, 0, 0)),
            author: "NOT FOUND".to_string(),
            topics: vec!["Город".to_string()],
            text: "Мэр открыл новый парк.".to_string(),
        }
    }

    #[test]
    fn test_prepare_creates_nested_dir() {
        let tmp = TempDir::new().unwrap();
        let store = ArticleStore::new(tmp.path().join("tmp").join("articles"));
        store.prepare().unwrap();
        assert!(store.dir().is_dir());
        // second call is a no-op
        store.prepare().unwrap();
    }

    #[test]
    fn test_save_raw_writes_both_files() {
        let tmp = TempDir::new().unwrap();
        let store = ArticleStore::new(tmp.path());
        let article = article(4);
        store.save_raw(&article).unwrap();

        let raw = fs::read_to_string(tmp.path().join("4_raw.txt")).unwrap();
        assert_eq!(raw, "Мэр открыл новый парк.");

        let meta = fs::read_to_string(tmp.path().join("4_meta.json")).unwrap();
        assert!(meta.contains("\n    \"id\": 4"));
        assert!(meta.contains("\"date\": \"2021-05-01 00:00:00\""));
        assert!(meta.contains("Новости города"));
    }

    #[test]
    fn test_load_meta_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = ArticleStore::new(tmp.path());
        let original = article(2);
        store.save_raw(&original).unwrap();

        let loaded = store.load_meta(2).unwrap();
        assert_eq!(loaded.url, original.url);
        assert_eq!(loaded.date, original.date);
        assert!(loaded.text.is_empty());
        assert_eq!(store.read_raw(&loaded).unwrap(), original.text);
    }

    #[test]
    fn test_load_meta_rejects_bad_date() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("1_meta.json"),
            r#"{"id": 1, "url": "u", "title": "t", "date": "01.05.2021", "author": "a", "topics": []}"#,
        )
        .unwrap();

        let store = ArticleStore::new(tmp.path());
        assert!(matches!(
            store.load_meta(1),
            Err(StorageError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_save_processed() {
        let tmp = TempDir::new().unwrap();
        let store = ArticleStore::new(tmp.path());
        let path = store
            .save_processed(&article(0), "мэр<S,муж,од=им,ед>(NOUN)")
            .unwrap();
        assert!(path.ends_with("0_processed.txt"));
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "мэр<S,муж,од=им,ед>(NOUN)"
        );
    }
}
