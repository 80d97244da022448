use anyhow::{Context, Result};
use std::path::PathBuf;

use newsmorph::config::Settings;
use newsmorph::pipeline::inspect_dataset;

pub fn check(settings: &Settings, assets: Option<PathBuf>, json: bool) -> Result<()> {
    let assets_dir = assets.unwrap_or_else(|| settings.storage.assets_dir.clone());
    let report = inspect_dataset(&assets_dir)?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&report).context("Failed to serialize dataset report")?;
        println!("{rendered}");
    } else {
        println!("Dataset: {}", assets_dir.display());
        print!("{report}");
    }

    if !report.is_consistent() {
        anyhow::bail!("Dataset at {} is inconsistent", assets_dir.display());
    }

    if !json {
        println!("Dataset check finished: no problems found");
    }
    Ok(())
}
