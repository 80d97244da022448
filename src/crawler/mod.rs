//! Article discovery
//!
//! The crawler fetches each seed page once, picks article links by the site's
//! link pattern and accumulates absolute URLs up to a fixed cap.

pub mod fetcher;
pub mod url;

use crate::crawler::fetcher::PageFetcher;
use crate::parser::PageFieldExtractor;
use crate::utils::error::CrawlerError;

/// Seed-page crawler
pub struct Crawler<'a> {
    /// Seed pages, scanned in order
    seed_urls: Vec<String>,

    /// Cap on accumulated article URLs
    max_articles: usize,

    /// Discovered article URLs in discovery order
    found_urls: Vec<String>,

    fetcher: &'a PageFetcher,
    extractor: &'a dyn PageFieldExtractor,
}

impl<'a> Crawler<'a> {
    pub fn new(
        seed_urls: Vec<String>,
        max_articles: usize,
        fetcher: &'a PageFetcher,
        extractor: &'a dyn PageFieldExtractor,
    ) -> Self {
        Self {
            seed_urls,
            max_articles,
            found_urls: Vec::new(),
            fetcher,
            extractor,
        }
    }

    /// Scan every seed page and accumulate article URLs
    ///
    /// Once the cap is reached the remaining seeds are still fetched, but no
    /// further URLs are added.
    ///
    /// # Errors
    ///
    /// The first fetch failure aborts the crawl.
    pub async fn find_articles(&mut self) -> Result<(), CrawlerError> {
        for seed in self.seed_urls.clone() {
            let html = self.fetcher.fetch_text(&seed).await?;
            let links = url::extract_links(&html, self.extractor.link_pattern());

            tracing::debug!(seed = %seed, links = links.len(), "Scanned seed page");

            self.absorb(&seed, &links)?;
        }

        tracing::info!(
            found = self.found_urls.len(),
            max_articles = self.max_articles,
            "Found links to articles to process"
        );
        Ok(())
    }

    /// Join links found on `seed` and append the new ones while under the cap
    pub fn absorb(&mut self, seed: &str, links: &[String]) -> Result<(), CrawlerError> {
        for link in links {
            let absolute = url::to_absolute(seed, link)?;

            if self.found_urls.len() < self.max_articles && !self.found_urls.contains(&absolute) {
                self.found_urls.push(absolute);
            }
        }
        Ok(())
    }

    /// Discovered article URLs in discovery order
    pub fn get_search_urls(&self) -> &[String] {
        &self.found_urls
    }

    /// Consume the crawler and return the discovered URLs
    pub fn into_search_urls(self) -> Vec<String> {
        self.found_urls
    }
}
