//! Common test utilities

use std::path::{Path, PathBuf};

/// Build an article page in the `news-<n>-<n>.htm` markup
#[allow(dead_code)]
pub fn article_page(title: &str, topic: &str, date: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ru">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
    <span class="title_text"><a href="/">Главная</a> / <a href="/section/">{topic}</a></span>
    <span class="title_data">Опубликовано {date}</span>
    <dl>
        <dd class="title">{title}</dd>
        <dd class="text">{body}</dd>
    </dl>
</body>
</html>"#
    )
}

/// Build a seed page with one anchor per href
#[allow(dead_code)]
pub fn seed_page(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!("<li><a href=\"{href}\">link</a></li>\n"))
        .collect();
    format!("<html><body><ul>\n{anchors}</ul></body></html>")
}

/// Write a crawler config with raw JSON values
#[allow(dead_code)]
pub fn write_crawler_config(dir: &Path, base_urls: serde_json::Value, total: serde_json::Value) -> PathBuf {
    let path = dir.join("crawler_config.json");
    let config = serde_json::json!({
        "base_urls": base_urls,
        "total_articles_to_find_and_parse": total,
    });
    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    path
}
