//! Test fixtures for integration tests
//!
//! Provides a mock news site and a fixed-vocabulary analyzer

use async_trait::async_trait;
use newsmorph::pipeline::{MorphAnalyzer, Reading, WordAnalysis};
use newsmorph::utils::error::AnalyzerError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Seed page with a single article link
pub const SEED_PAGE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="ru">
<head><meta charset="utf-8"><title>Лента</title></head>
<body>
    <a href="/">Главная</a>
    <a href="news-7-101.htm">Мама мыла раму</a>
    <a href="/contacts.htm">Контакты</a>
</body>
</html>
"#;

/// Article behind the only seed link
pub const ARTICLE_PAGE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="ru">
<head><meta charset="utf-8"><title>Мама мыла раму</title></head>
<body>
    <span class="title_text"><a href="/">Главная</a> / <a href="/life/">Жизнь</a></span>
    <span class="title_data">Опубликовано 05.09.2021</span>
    <dl>
        <dd class="title">Мама мыла раму</dd>
        <dd class="text"><p>Мама мыла раму, qwzx!</p></dd>
    </dl>
</body>
</html>
"#;

/// Mount the one-link site; returns the seed URL
pub async fn mount_site(mock_server: &MockServer) -> String {
    Mock::given(method("GET"))
        .and(path("/lenta/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEED_PAGE_HTML))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/lenta/news-7-101.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE_PAGE_HTML))
        .mount(mock_server)
        .await;

    format!("{}/lenta/", mock_server.uri())
}

/// Analyzer that knows the three words of the fixture article
pub struct FixtureAnalyzer;

#[async_trait]
impl MorphAnalyzer for FixtureAnalyzer {
    async fn analyze(&self, text: &str) -> Result<Vec<WordAnalysis>, AnalyzerError> {
        let table = [
            ("мама", "мама", "S,жен,од=им,ед"),
            ("мыла", "мыть", "V,несов,пе=прош,ед,изъяв,жен"),
            ("раму", "рама", "S,жен,неод=вин,ед"),
        ];

        let mut fragments = Vec::new();
        for token in text.split_inclusive(|c: char| !c.is_alphanumeric()) {
            let word: String = token.chars().filter(|c| c.is_alphanumeric()).collect();
            let separator: String = token.chars().filter(|c| !c.is_alphanumeric()).collect();

            if !word.is_empty() {
                let analysis = table
                    .iter()
                    .find(|(surface, _, _)| *surface == word)
                    .map(|(_, lemma, tags)| {
                        vec![Reading {
                            lemma: lemma.to_string(),
                            tags: tags.to_string(),
                        }]
                    })
                    .unwrap_or_default();
                fragments.push(WordAnalysis::new(word, analysis));
            }
            if !separator.is_empty() {
                fragments.push(WordAnalysis::new(separator, Vec::new()));
            }
        }
        Ok(fragments)
    }
}
