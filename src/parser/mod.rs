//! Article page parsing
//!
//! [`ArticleParser`] turns one discovered URL into a filled, persisted
//! [`Article`]. Field extraction is delegated to a [`PageFieldExtractor`].

pub mod extractor;
pub mod html;
pub mod sanitize;
pub mod selectors;

pub use extractor::PageFieldExtractor;
pub use html::NewsHtmExtractor;

use crate::crawler::fetcher::PageFetcher;
use crate::error::Result;
use crate::models::Article;
use crate::storage::ArticleStore;
use crate::utils::error::ParseError;
use crate::utils::truncate_text;

/// Parser for a single article page
pub struct ArticleParser<'a> {
    article: Article,
    fetcher: &'a PageFetcher,
    extractor: &'a dyn PageFieldExtractor,
}

impl<'a> ArticleParser<'a> {
    /// Create a parser for one article URL with its sequential id
    pub fn new(
        full_url: impl Into<String>,
        article_id: u32,
        fetcher: &'a PageFetcher,
        extractor: &'a dyn PageFieldExtractor,
    ) -> Self {
        Self {
            article: Article::new(full_url, article_id),
            fetcher,
            extractor,
        }
    }

    /// Fetch the page, fill the article and write its raw text and metadata
    ///
    /// # Errors
    ///
    /// Fails on the first fetch error, missing field or write error. Files
    /// already written for earlier articles are left in place.
    pub async fn parse(mut self, store: &ArticleStore) -> Result<Article> {
        let html = self.fetcher.fetch_text(&self.article.url).await?;

        self.fill_from_html(&html)?;
        store.save_raw(&self.article)?;

        tracing::info!(
            id = self.article.article_id,
            title = %truncate_text(&self.article.title, 60),
            date = %self.article.date_to_text(),
            "Parsed article"
        );

        Ok(self.article)
    }

    /// Fill the article from already fetched HTML
    pub fn fill_from_html(&mut self, html: &str) -> std::result::Result<(), ParseError> {
        self.extractor.fill(html, &mut self.article).map_err(|e| {
            tracing::error!(
                url = %self.article.url,
                site = self.extractor.name(),
                error = %e,
                "Failed to extract article fields"
            );
            e
        })
    }

    /// Article in its current state
    pub fn article(&self) -> &Article {
        &self.article
    }
}
