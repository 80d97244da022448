use anyhow::{Context, Result};
use std::path::PathBuf;

use newsmorph::config::{CrawlerConfig, Settings};
use newsmorph::crawler::fetcher::PageFetcher;
use newsmorph::crawler::Crawler;
use newsmorph::parser::{ArticleParser, NewsHtmExtractor};
use newsmorph::storage::ArticleStore;

pub async fn crawl(settings: &Settings, config: Option<PathBuf>, assets: Option<PathBuf>) -> Result<()> {
    let config_path = config.unwrap_or_else(|| settings.crawler.config_path.clone());
    let assets_dir = assets.unwrap_or_else(|| settings.storage.assets_dir.clone());

    let config = CrawlerConfig::load(&config_path)
        .with_context(|| format!("Invalid crawler config: {}", config_path.display()))?;

    println!("Starting news crawl");
    println!("===================");
    println!("Seeds: {}", config.base_urls.len());
    println!("Max articles: {}", config.total_articles_to_find_and_parse);

    let store = ArticleStore::new(&assets_dir);
    store.prepare()?;

    let fetcher = PageFetcher::with_config(
        settings.request_timeout(),
        settings.crawler.user_agent.clone(),
    )
    .context("Failed to create fetcher")?;
    let extractor = NewsHtmExtractor::new();

    let mut crawler = Crawler::new(
        config.base_urls,
        config.total_articles_to_find_and_parse,
        &fetcher,
        &extractor,
    );
    crawler.find_articles().await?;

    let urls = crawler.into_search_urls();
    println!("Found {} article URLs", urls.len());

    for (index, url) in urls.iter().enumerate() {
        let id = u32::try_from(index).context("Article id overflow")?;
        print!("\r[{}/{}] Parsing article {id}...", index + 1, urls.len());
        std::io::Write::flush(&mut std::io::stdout())?;

        ArticleParser::new(url, id, &fetcher, &extractor)
            .parse(&store)
            .await
            .with_context(|| format!("Failed to parse {url}"))?;
    }
    if !urls.is_empty() {
        println!();
    }

    println!("\nCrawl finished: {} articles saved to {}", urls.len(), assets_dir.display());
    Ok(())
}
