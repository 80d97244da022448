//! Site-specific field extraction
//!
//! Crawl and parse orchestration only talk to [`PageFieldExtractor`]. Adding a
//! news source means adding one implementation; nothing else changes.

use chrono::NaiveDateTime;
use regex::Regex;
use scraper::Html;

use crate::models::Article;
use crate::utils::error::ParseError;

/// Capability interface for one supported site's markup
pub trait PageFieldExtractor: Send + Sync {
    /// Short site name for logs
    fn name(&self) -> &'static str;

    /// Pattern an anchor `href` must match at its start to count as an article link
    fn link_pattern(&self) -> &Regex;

    fn title(&self, document: &Html) -> Result<String, ParseError>;

    fn author(&self, document: &Html) -> String;

    fn topics(&self, document: &Html) -> Result<Vec<String>, ParseError>;

    fn date(&self, document: &Html) -> Result<NaiveDateTime, ParseError>;

    fn text(&self, document: &Html) -> Result<String, ParseError>;

    /// Fill every article field from a page, stopping at the first missing one
    fn fill(&self, html: &str, article: &mut Article) -> Result<(), ParseError> {
        let document = Html::parse_document(html);

        article.title = self.title(&document)?;
        article.author = self.author(&document);
        article.topics = self.topics(&document)?;
        article.date = Some(self.date(&document)?);
        article.text = self.text(&document)?;

        Ok(())
    }
}
