//! Text processing pipeline
//!
//! Reads the raw texts written by the crawler, runs the primary morphological
//! analyzer and the secondary tagger over them, and writes one
//! `<id>_processed.txt` per article with space-separated
//! `lemma<primary>(secondary)` tokens.

pub mod analyzer;
pub mod dataset;
pub mod token;

pub use analyzer::{
    build_tagger, CommandTagger, LexiconTagger, MorphAnalyzer, MystemAnalyzer, Reading,
    WordAnalysis, WordTagger,
};
pub use dataset::{inspect_dataset, DatasetReport};
pub use token::MorphologicalToken;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{id_from_file_name, Article, RAW_SUFFIX};
use crate::storage::ArticleStore;
use crate::utils::error::{AnalyzerError, DatasetError};

/// Check that `path` is an existing, non-empty directory
///
/// Checks run in order: existence, directory, emptiness.
pub fn validate_dataset(path: &Path) -> std::result::Result<(), DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(DatasetError::NotADirectory(path.to_path_buf()));
    }

    let mut entries = fs::read_dir(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if entries.next().is_none() {
        return Err(DatasetError::EmptyDirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Registry of the articles present in a dataset directory
pub struct CorpusManager {
    store: ArticleStore,
    articles: BTreeMap<u32, Article>,
}

impl CorpusManager {
    /// Register one article per `<id>_raw.txt` file in `path`
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let store = ArticleStore::new(path);
        let dir = store.dir().to_path_buf();
        let mut articles = BTreeMap::new();

        let entries = fs::read_dir(&dir).map_err(|source| DatasetError::Io {
            path: dir.clone(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| DatasetError::Io {
                path: dir.clone(),
                source,
            })?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.ends_with(RAW_SUFFIX) {
                continue;
            }

            match id_from_file_name(&name, RAW_SUFFIX) {
                Some(id) => {
                    articles.insert(id, Article::new("", id));
                }
                None => tracing::warn!(file = %name, "Skipping raw file without integer id"),
            }
        }

        tracing::info!(dir = %dir.display(), articles = articles.len(), "Registered corpus");
        Ok(Self { store, articles })
    }

    /// Registered articles ordered by id
    pub fn get_articles(&self) -> &BTreeMap<u32, Article> {
        &self.articles
    }

    pub fn get_raw_text(&self, id: u32) -> Result<String> {
        let article = self.article(id)?;
        Ok(self.store.read_raw(article)?)
    }

    /// Write `<id>_processed.txt` for a registered article
    pub fn write_processed_text(&self, id: u32, text: &str) -> Result<PathBuf> {
        let article = self.article(id)?;
        Ok(self.store.save_processed(article, text)?)
    }

    /// Replace registered handles with their metadata where `<id>_meta.json` exists
    ///
    /// Returns how many metadata files were loaded. A metadata file whose `id`
    /// differs from its file name is rejected and leaves the handle untouched.
    pub fn get_articles_meta(&mut self) -> Result<usize> {
        let mut loaded = 0;

        for (id, article) in self.articles.iter_mut() {
            if !article.meta_path(self.store.dir()).exists() {
                tracing::warn!(id, "No metadata for article");
                continue;
            }
            let meta = self.store.load_meta(*id)?;
            if meta.article_id != *id {
                return Err(DatasetError::MetaIdMismatch {
                    file_id: *id,
                    meta_id: meta.article_id,
                }
                .into());
            }
            *article = meta;
            loaded += 1;
        }
        Ok(loaded)
    }

    fn article(&self, id: u32) -> std::result::Result<&Article, DatasetError> {
        self.articles.get(&id).ok_or(DatasetError::ArticleNotFound(id))
    }
}

/// Two-stage morphological processing over a corpus
pub struct TextProcessingPipeline<'a> {
    corpus: &'a CorpusManager,
    analyzer: &'a dyn MorphAnalyzer,
    tagger: &'a dyn WordTagger,
}

impl<'a> TextProcessingPipeline<'a> {
    pub fn new(
        corpus: &'a CorpusManager,
        analyzer: &'a dyn MorphAnalyzer,
        tagger: &'a dyn WordTagger,
    ) -> Self {
        Self {
            corpus,
            analyzer,
            tagger,
        }
    }

    /// Process every registered article in id order
    ///
    /// Returns the number of processed articles. Stops at the first failure;
    /// already written processed files stay on disk.
    pub async fn run(&self) -> Result<usize> {
        let mut processed = 0;

        for &id in self.corpus.get_articles().keys() {
            let raw = self.corpus.get_raw_text(id)?;
            let text = self.normalize_and_tag_text(&raw).await?;
            let path = self.corpus.write_processed_text(id, &text)?;

            tracing::info!(id, path = %path.display(), "Processed article");
            processed += 1;
        }
        Ok(processed)
    }

    /// Lower-case, analyze and tag a text, returning its serialized tokens
    pub async fn normalize_and_tag_text(
        &self,
        text: &str,
    ) -> std::result::Result<String, AnalyzerError> {
        let tokens = self.tokenize(text).await?;
        Ok(Self::transform_tokens_to_text(&tokens))
    }

    /// Build tokens for every word with a primary analysis, in text order
    pub async fn tokenize(
        &self,
        text: &str,
    ) -> std::result::Result<Vec<MorphologicalToken>, AnalyzerError> {
        let lowered = text.to_lowercase();
        let fragments = self.analyzer.analyze(&lowered).await?;

        // Words the analyzer could not read are dropped
        let analyzed: Vec<(String, Reading)> = fragments
            .into_iter()
            .filter_map(|fragment| {
                let reading = fragment.analysis.into_iter().next()?;
                Some((fragment.text, reading))
            })
            .collect();

        let words: Vec<String> = analyzed.iter().map(|(word, _)| word.clone()).collect();
        let secondary = self.tagger.tag(&words).await?;
        if secondary.len() != words.len() {
            return Err(AnalyzerError::OutputMismatch {
                expected: words.len(),
                actual: secondary.len(),
            });
        }

        Ok(analyzed
            .into_iter()
            .zip(secondary)
            .map(|((word, reading), tags)| {
                MorphologicalToken::new(word, reading.lemma, reading.tags, tags)
            })
            .collect())
    }

    /// Space-join serialized tokens
    pub fn transform_tokens_to_text(tokens: &[MorphologicalToken]) -> String {
        tokens
            .iter()
            .map(MorphologicalToken::to_text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
