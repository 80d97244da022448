//! Error scenario tests

use super::fixtures::{mount_site, FixtureAnalyzer};
use newsmorph::error::{Error, ErrorCategory, NewsmorphErrorTrait};
use newsmorph::pipeline::{
    validate_dataset, CommandTagger, CorpusManager, LexiconTagger, TextProcessingPipeline,
};
use newsmorph::storage::ArticleStore;
use newsmorph::utils::error::{AnalyzerError, DatasetError};
use newsmorph::crawler::fetcher::PageFetcher;
use newsmorph::parser::{ArticleParser, NewsHtmExtractor};
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_validate_dataset_missing() {
    let tmp = TempDir::new().unwrap();
    let err = validate_dataset(&tmp.path().join("nope")).unwrap_err();
    assert!(matches!(err, DatasetError::NotFound(_)));
}

#[test]
fn test_validate_dataset_file() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("0_raw.txt");
    fs::write(&file, "text").unwrap();
    assert!(matches!(
        validate_dataset(&file),
        Err(DatasetError::NotADirectory(_))
    ));
}

#[test]
fn test_validate_dataset_empty() {
    let tmp = TempDir::new().unwrap();
    assert!(matches!(
        validate_dataset(tmp.path()),
        Err(DatasetError::EmptyDirectory(_))
    ));

    fs::write(tmp.path().join("notes.txt"), "x").unwrap();
    assert!(validate_dataset(tmp.path()).is_ok());
}

/// Test the second article failing leaves the first one on disk
#[tokio::test]
async fn test_fail_fast_keeps_earlier_files() {
    let mock_server = MockServer::start().await;
    let seed = mount_site(&mock_server).await;
    Mock::given(method("GET"))
        .and(path("/lenta/news-7-102.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>gone</body></html>"))
        .mount(&mock_server)
        .await;

    let tmp = TempDir::new().unwrap();
    let store = ArticleStore::new(tmp.path());
    let fetcher = PageFetcher::new().unwrap();
    let extractor = NewsHtmExtractor::new();

    let urls = [format!("{seed}news-7-101.htm"), format!("{seed}news-7-102.htm")];
    let mut failure = None;
    for (id, url) in urls.iter().enumerate() {
        if let Err(e) = ArticleParser::new(url, id as u32, &fetcher, &extractor)
            .parse(&store)
            .await
        {
            failure = Some(e);
            break;
        }
    }

    let failure = failure.expect("second article should fail");
    assert_eq!(failure.category(), ErrorCategory::Parsing);
    assert!(!failure.is_recoverable());
    assert!(tmp.path().join("0_raw.txt").exists());
    assert!(!tmp.path().join("1_raw.txt").exists());
}

/// Test a broken tagger command stops the pipeline with an analyzer error
#[tokio::test]
async fn test_missing_tagger_program() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("0_raw.txt"), "мама").unwrap();
    let corpus = CorpusManager::new(tmp.path()).unwrap();

    let tagger = CommandTagger::new(&["newsmorph-no-such-tagger".to_string()]).unwrap();
    let pipeline = TextProcessingPipeline::new(&corpus, &FixtureAnalyzer, &tagger);

    let result = pipeline.run().await;
    assert!(matches!(
        result,
        Err(Error::Analyzer(AnalyzerError::Spawn { .. }))
    ));
    assert!(!tmp.path().join("0_processed.txt").exists());
}

/// Test unknown article ids are reported
#[test]
fn test_unknown_article_id() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("0_raw.txt"), "x").unwrap();
    let corpus = CorpusManager::new(tmp.path()).unwrap();

    assert!(matches!(
        corpus.write_processed_text(5, "x"),
        Err(Error::Dataset(DatasetError::ArticleNotFound(5)))
    ));
}

/// Test metadata naming another id neither aborts nor redirects processing
#[tokio::test]
async fn test_meta_id_mismatch_keeps_file_ids() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("0_raw.txt"), "мама").unwrap();
    fs::write(tmp.path().join("5_raw.txt"), "раму").unwrap();
    fs::write(
        tmp.path().join("0_meta.json"),
        r#"{"id": 5, "url": "u", "title": "t", "date": "2021-01-02 00:00:00", "author": "a", "topics": []}"#,
    )
    .unwrap();

    let mut corpus = CorpusManager::new(tmp.path()).unwrap();
    let err = corpus.get_articles_meta().unwrap_err();
    assert!(matches!(
        err,
        Error::Dataset(DatasetError::MetaIdMismatch { file_id: 0, meta_id: 5 })
    ));

    let tagger = LexiconTagger::default();
    let pipeline = TextProcessingPipeline::new(&corpus, &FixtureAnalyzer, &tagger);
    assert_eq!(pipeline.run().await.unwrap(), 2);

    let zero = fs::read_to_string(tmp.path().join("0_processed.txt")).unwrap();
    let five = fs::read_to_string(tmp.path().join("5_processed.txt")).unwrap();
    assert!(zero.starts_with("мама<"));
    assert!(five.starts_with("рама<"));
}
