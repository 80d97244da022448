//! Article link extraction and URL joining
//!
//! Seed pages are scanned anchor by anchor; an `href` counts as an article
//! link when the site's link pattern matches at its start. The matched part
//! (not the whole href) is joined with the seed URL.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::utils::error::CrawlerError;

lazy_static! {
    static ref ANCHOR: Selector = Selector::parse("a[href]").expect("Invalid CSS selector: a[href]");
}

/// Extract article link paths from a seed page, in anchor order
///
/// Duplicates are kept; the crawler deduplicates after joining.
///
/// # Examples
///
/// ```
/// use newsmorph::crawler::url::extract_links;
/// use regex::Regex;
///
/// let pattern = Regex::new(r"^/?news-\d+-\d+\.htm").unwrap();
/// let html = r#"<a href="news-1-2.htm">One</a><a href="/about.htm">About</a>"#;
/// assert_eq!(extract_links(html, &pattern), vec!["news-1-2.htm"]);
/// ```
pub fn extract_links(html: &str, pattern: &Regex) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| {
            pattern
                .find(href.trim())
                .filter(|m| m.start() == 0)
                .map(|m| m.as_str().to_string())
        })
        .collect()
}

/// Join an article link path with the seed URL it was found on
///
/// # Errors
///
/// Returns `CrawlerError::InvalidSeedUrl` if the seed is not an absolute URL
///
/// # Examples
///
/// ```
/// use newsmorph::crawler::url::to_absolute;
///
/// let url = to_absolute("https://news.example.ru/", "news-1-2.htm").unwrap();
/// assert_eq!(url, "https://news.example.ru/news-1-2.htm");
/// ```
pub fn to_absolute(seed: &str, link: &str) -> Result<String, CrawlerError> {
    let base = Url::parse(seed).map_err(|_| CrawlerError::InvalidSeedUrl(seed.to_string()))?;

    base.join(link)
        .map(|absolute| absolute.to_string())
        .map_err(|_| CrawlerError::InvalidSeedUrl(seed.to_string()))
}
