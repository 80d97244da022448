//! CSS selectors and link patterns for supported news sites
//!
//! Selectors are compiled once. Each supported site gets its own selector set;
//! the extractor for that site reads them through [`NewsHtmSelectors`].

use lazy_static::lazy_static;
use regex::Regex;
use scraper::Selector;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    // Sites serving articles as news-<section>-<number>.htm
    static ref NEWS_HTM_TITLE: Selector = parse_selector!("dd.title");
    static ref NEWS_HTM_TEXT: Selector = parse_selector!("dd.text");
    static ref NEWS_HTM_TOPIC_LINKS: Selector = parse_selector!("span.title_text a");
    static ref NEWS_HTM_DATE: Selector = parse_selector!("span.title_data");

    static ref NEWS_HTM_LINK: Regex =
        Regex::new(r"^/?news-\d+-\d+\.htm").expect("Invalid link pattern");
}

/// Selectors for `news-<n>-<n>.htm` article pages
pub struct NewsHtmSelectors {
    pub title: &'static Selector,
    pub text: &'static Selector,
    /// Breadcrumb links; the second one names the topic
    pub topic_links: &'static Selector,
    /// Header line ending with a `dd.mm.yyyy` date
    pub date: &'static Selector,
    pub link: &'static Regex,
}

impl NewsHtmSelectors {
    pub fn new() -> Self {
        Self {
            title: &NEWS_HTM_TITLE,
            text: &NEWS_HTM_TEXT,
            topic_links: &NEWS_HTM_TOPIC_LINKS,
            date: &NEWS_HTM_DATE,
            link: &NEWS_HTM_LINK,
        }
    }
}

impl Default for NewsHtmSelectors {
    fn default() -> Self {
        Self::new()
    }
}
