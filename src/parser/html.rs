//! Extractor for `news-<n>-<n>.htm` article pages
//!
//! Markup contract:
//! - `dd.title`: headline
//! - `dd.text`: body
//! - `span.title_text a`: breadcrumb, the second link is the topic
//! - `span.title_data`: header line whose last 10 characters are `dd.mm.yyyy`
//!
//! The site has no author markup, so the author is always `NOT FOUND`.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use scraper::{ElementRef, Html};

use crate::models::AUTHOR_NOT_FOUND;
use crate::parser::extractor::PageFieldExtractor;
use crate::parser::sanitize::{clean_body, clean_inline, has_content};
use crate::parser::selectors::NewsHtmSelectors;
use crate::utils::error::ParseError;

/// Date format of the header line
const SITE_DATE_FORMAT: &str = "%d.%m.%Y";

/// Number of trailing characters of the header line holding the date
const DATE_LEN: usize = 10;

/// Field extractor for `news-<n>-<n>.htm` sites
pub struct NewsHtmExtractor {
    selectors: NewsHtmSelectors,
}

impl NewsHtmExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            selectors: NewsHtmSelectors::new(),
        }
    }
}

impl Default for NewsHtmExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFieldExtractor for NewsHtmExtractor {
    fn name(&self) -> &'static str {
        "news-htm"
    }

    fn link_pattern(&self) -> &Regex {
        self.selectors.link
    }

    fn title(&self, document: &Html) -> Result<String, ParseError> {
        document
            .select(self.selectors.title)
            .next()
            .map(|el| clean_inline(&element_text(el)))
            .ok_or(ParseError::TitleNotFound)
    }

    fn author(&self, _document: &Html) -> String {
        AUTHOR_NOT_FOUND.to_string()
    }

    fn topics(&self, document: &Html) -> Result<Vec<String>, ParseError> {
        document
            .select(self.selectors.topic_links)
            .nth(1)
            .map(|el| vec![clean_inline(&element_text(el))])
            .ok_or(ParseError::TopicNotFound)
    }

    fn date(&self, document: &Html) -> Result<NaiveDateTime, ParseError> {
        let header = document
            .select(self.selectors.date)
            .next()
            .map(element_text)
            .ok_or(ParseError::DateNotFound)?;

        parse_site_date(&header)
    }

    fn text(&self, document: &Html) -> Result<String, ParseError> {
        let body = document
            .select(self.selectors.text)
            .next()
            .map(|el| clean_body(&element_text(el)))
            .ok_or(ParseError::ContentNotFound)?;

        if !has_content(&body) {
            return Err(ParseError::ContentNotFound);
        }
        Ok(body)
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Parse the trailing `dd.mm.yyyy` of a header line into midnight of that day
pub fn parse_site_date(header: &str) -> Result<NaiveDateTime, ParseError> {
    let header = header.trim_end();
    let chars: Vec<char> = header.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(DATE_LEN)..].iter().collect();

    NaiveDate::parse_from_str(&tail, SITE_DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or(ParseError::InvalidDate(tail))
}
