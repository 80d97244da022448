//! Crawl → parse → process pipeline tests

use super::fixtures::{mount_site, FixtureAnalyzer};
use newsmorph::config::validate_config;
use newsmorph::crawler::fetcher::PageFetcher;
use newsmorph::crawler::Crawler;
use newsmorph::parser::{ArticleParser, NewsHtmExtractor};
use newsmorph::pipeline::{
    inspect_dataset, validate_dataset, CorpusManager, LexiconTagger, TextProcessingPipeline,
};
use newsmorph::storage::ArticleStore;
use regex::Regex;
use std::fs;
use tempfile::TempDir;
use wiremock::MockServer;

/// Run the crawl stage into `store`, returning the number of parsed articles
async fn crawl_into(store: &ArticleStore, seeds: Vec<String>, count: usize) -> usize {
    store.prepare().unwrap();

    let fetcher = PageFetcher::new().unwrap();
    let extractor = NewsHtmExtractor::new();
    let mut crawler = Crawler::new(seeds, count, &fetcher, &extractor);
    crawler.find_articles().await.unwrap();

    let urls = crawler.into_search_urls();
    for (index, url) in urls.iter().enumerate() {
        ArticleParser::new(url, index as u32, &fetcher, &extractor)
            .parse(store)
            .await
            .unwrap();
    }
    urls.len()
}

#[tokio::test]
async fn test_end_to_end_single_article() {
    let tmp = TempDir::new().unwrap();

    // config validation accepts the cap of one
    let config_path = tmp.path().join("crawler_config.json");
    fs::write(
        &config_path,
        r#"{"base_urls": ["https://news.example.ru/lenta/"], "total_articles_to_find_and_parse": 1}"#,
    )
    .unwrap();
    let (_, count) = validate_config(&config_path).unwrap();
    assert_eq!(count, 1);

    // crawl against the mock site
    let mock_server = MockServer::start().await;
    let seed = mount_site(&mock_server).await;
    let assets = tmp.path().join("tmp").join("articles");
    let store = ArticleStore::new(&assets);
    assert_eq!(crawl_into(&store, vec![seed], count).await, 1);

    // process
    validate_dataset(&assets).unwrap();
    let corpus = CorpusManager::new(&assets).unwrap();
    let tagger = LexiconTagger::parse("мама\tNOUN\nмыла\tVERB\nраму\tNOUN\n").unwrap();
    let pipeline = TextProcessingPipeline::new(&corpus, &FixtureAnalyzer, &tagger);
    assert_eq!(pipeline.run().await.unwrap(), 1);

    let mut files: Vec<String> = fs::read_dir(&assets)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(files, vec!["0_meta.json", "0_processed.txt", "0_raw.txt"]);

    let meta: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(assets.join("0_meta.json")).unwrap()).unwrap();
    assert_eq!(meta["id"], 0);
    assert_eq!(meta["topics"][0], "Жизнь");
    let date_re = Regex::new(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}").unwrap();
    assert!(date_re.is_match(meta["date"].as_str().unwrap()));

    assert_eq!(
        fs::read_to_string(assets.join("0_raw.txt")).unwrap(),
        "Мама мыла раму, qwzx!"
    );
    assert_eq!(
        fs::read_to_string(assets.join("0_processed.txt")).unwrap(),
        "мама<S,жен,од=им,ед>(NOUN) мыть<V,несов,пе=прош,ед,изъяв,жен>(VERB) рама<S,жен,неод=вин,ед>(NOUN)"
    );

    let report = inspect_dataset(&assets).unwrap();
    assert!(report.is_consistent());
    assert_eq!(report.processed_files, 1);
}

#[tokio::test]
async fn test_missing_secondary_tags_render_empty() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("0_raw.txt"), "Раму мыла мама").unwrap();

    let corpus = CorpusManager::new(tmp.path()).unwrap();
    let tagger = LexiconTagger::parse("мама\tNOUN\n").unwrap();
    let pipeline = TextProcessingPipeline::new(&corpus, &FixtureAnalyzer, &tagger);

    let tokens = pipeline.tokenize("Раму мыла мама").await.unwrap();
    let words: Vec<&str> = tokens.iter().map(|t| t.original_word.as_str()).collect();
    assert_eq!(words, vec!["раму", "мыла", "мама"]);
    assert_eq!(
        TextProcessingPipeline::transform_tokens_to_text(&tokens),
        "рама<S,жен,неод=вин,ед>() мыть<V,несов,пе=прош,ед,изъяв,жен>() мама<S,жен,од=им,ед>(NOUN)"
    );
}

#[tokio::test]
async fn test_corpus_meta_loading() {
    let mock_server = MockServer::start().await;
    let seed = mount_site(&mock_server).await;

    let tmp = TempDir::new().unwrap();
    let store = ArticleStore::new(tmp.path());
    crawl_into(&store, vec![seed], 5).await;

    let mut corpus = CorpusManager::new(tmp.path()).unwrap();
    assert_eq!(corpus.get_articles_meta().unwrap(), 1);

    let article = &corpus.get_articles()[&0];
    assert_eq!(article.title, "Мама мыла раму");
    assert!(article.url.ends_with("/lenta/news-7-101.htm"));
    assert_eq!(corpus.get_raw_text(0).unwrap(), "Мама мыла раму, qwzx!");
}
