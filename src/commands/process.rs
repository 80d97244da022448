use anyhow::{Context, Result};
use std::path::PathBuf;

use newsmorph::config::Settings;
use newsmorph::pipeline::{
    build_tagger, validate_dataset, CorpusManager, MystemAnalyzer, TextProcessingPipeline,
};

pub async fn process(settings: &Settings, assets: Option<PathBuf>) -> Result<()> {
    let assets_dir = assets.unwrap_or_else(|| settings.storage.assets_dir.clone());

    validate_dataset(&assets_dir)
        .with_context(|| format!("Cannot process dataset at {}", assets_dir.display()))?;

    let mut corpus = CorpusManager::new(&assets_dir)?;
    match corpus.get_articles_meta() {
        Ok(with_meta) => tracing::info!(
            articles = corpus.get_articles().len(),
            with_meta,
            "Loaded corpus"
        ),
        Err(e) => tracing::warn!(error = %e, "Metadata not loaded, processing raw texts only"),
    }

    let analyzer = MystemAnalyzer::from_settings(&settings.analyzer)?;
    let tagger = build_tagger(&settings.analyzer).await?;

    let pipeline = TextProcessingPipeline::new(&corpus, &analyzer, tagger.as_ref());
    let processed = pipeline.run().await?;

    println!("Processing finished: {processed} articles in {}", assets_dir.display());
    Ok(())
}
