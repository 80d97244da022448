//! HTTP page fetcher with charset-aware decoding
//!
//! This module provides the single HTTP entry point used by the crawler and
//! the article parser:
//! - User-Agent rotation
//! - Browser-like request headers with an origin referer
//! - Charset detection from the Content-Type header or `<meta charset>`
//! - UTF-8 first, windows-1251 fallback for legacy Cyrillic pages
//!
//! There is no retry: the first failure is returned to the caller.

use crate::utils::error::FetchError;
use crate::utils::extract_origin;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1251};
use rand::seq::SliceRandom;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, REFERER, USER_AGENT},
    Client, Response,
};
use std::time::Duration;

/// Pool of realistic User-Agent strings for rotation
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
];

/// How many leading bytes are scanned for a `<meta charset>` declaration
const META_SNIFF_LEN: usize = 2048;

/// HTTP fetcher for seed and article pages
pub struct PageFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Fixed user agent; rotated from [`USER_AGENTS`] when unset
    user_agent: Option<String>,
}

impl PageFetcher {
    /// Create a fetcher with a 30 second timeout
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(Duration::from_secs(30), None)
    }

    /// Create a fetcher with a custom timeout and optional fixed user agent
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_config(timeout: Duration, user_agent: Option<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .cookie_store(true)
            .build()?;

        Ok(Self { client, user_agent })
    }

    /// Fetch a page and decode its body to text
    ///
    /// # Errors
    ///
    /// - `FetchError::InvalidUrl` if `url` is not an absolute http(s) URL
    /// - `FetchError::Timeout` if the request times out
    /// - `FetchError::Status` on a non-success status code
    /// - `FetchError::Http` on other transport failures
    /// - `FetchError::Decode` if the body cannot be decoded
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let origin = extract_origin(url).ok_or_else(|| FetchError::InvalidUrl(url.to_string()))?;

        tracing::debug!(url = %url, "Fetching page");

        let response = self
            .client
            .get(url)
            .headers(self.build_headers(&origin))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout(url.to_string())
                } else {
                    FetchError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "Request failed");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        self.decode_response(response).await
    }

    /// Decode response body using the declared or sniffed charset
    async fn decode_response(&self, response: Response) -> Result<String, FetchError> {
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let bytes = response.bytes().await?;

        decode_bytes(&bytes, &content_type)
    }

    /// Build browser-like request headers
    fn build_headers(&self, referer: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();

        let agent = self
            .user_agent
            .as_deref()
            .and_then(|ua| HeaderValue::from_str(ua).ok())
            .unwrap_or_else(|| HeaderValue::from_static(random_user_agent()));
        headers.insert(USER_AGENT, agent);

        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7"),
        );

        if let Ok(referer_value) = HeaderValue::from_str(referer) {
            headers.insert(REFERER, referer_value);
        }

        headers
    }
}

/// Decode bytes to a string
///
/// Strategy:
/// 1. charset from the Content-Type header
/// 2. charset from a `<meta>` tag in the first bytes of the document
/// 3. strict UTF-8
/// 4. windows-1251
///
/// # Errors
///
/// Returns `FetchError::Decode` if a declared charset fails to decode
pub fn decode_bytes(bytes: &[u8], content_type: &str) -> Result<String, FetchError> {
    if let Some(encoding) = charset_from_content_type(content_type) {
        return decode_with(encoding, bytes);
    }

    if let Some(encoding) = charset_from_meta(bytes) {
        return decode_with(encoding, bytes);
    }

    if let Ok(text) = decode_with(UTF_8, bytes) {
        return Ok(text);
    }

    decode_with(WINDOWS_1251, bytes)
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8]) -> Result<String, FetchError> {
    let (cow, _encoding, had_errors) = encoding.decode(bytes);

    if had_errors {
        return Err(FetchError::Decode(format!(
            "{} decoding errors",
            encoding.name()
        )));
    }

    Ok(cow.into_owned())
}

fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    let lower = content_type.to_ascii_lowercase();
    let (_, charset) = lower.split_once("charset=")?;
    let label = charset.split(';').next()?.trim().trim_matches('"');
    Encoding::for_label(label.as_bytes())
}

fn charset_from_meta(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LEN)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let start = head.find("charset=")? + "charset=".len();
    let label: String = head[start..]
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    Encoding::for_label(label.as_bytes())
}

/// Get a random user agent from the pool
fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS.choose(&mut rng).unwrap_or(&USER_AGENTS[0])
}
