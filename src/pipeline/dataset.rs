//! Dataset consistency report

use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{id_from_file_name, META_SUFFIX, PROCESSED_SUFFIX, RAW_SUFFIX};
use crate::pipeline::validate_dataset;
use crate::storage::ArticleStore;
use crate::utils::error::{DatasetError, StorageError};

/// Summary of the files found in a dataset directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetReport {
    pub raw_files: usize,
    pub meta_files: usize,
    pub processed_files: usize,

    /// Ids of readable metadata files, ascending
    pub meta_ids: Vec<u32>,

    /// Ids whose metadata date is not `YYYY-MM-DD HH:MM:SS`
    pub invalid_dates: Vec<u32>,

    /// Metadata files that could not be read or parsed
    pub broken_meta: Vec<String>,
}

impl DatasetReport {
    pub fn counts_match(&self) -> bool {
        self.raw_files == self.meta_files
    }

    /// Metadata ids form `0..n` with no gaps
    pub fn ids_contiguous(&self) -> bool {
        self.meta_ids
            .iter()
            .enumerate()
            .all(|(index, id)| *id as usize == index)
    }

    pub fn is_consistent(&self) -> bool {
        self.counts_match()
            && self.ids_contiguous()
            && self.invalid_dates.is_empty()
            && self.broken_meta.is_empty()
    }
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Raw files:       {}", self.raw_files)?;
        writeln!(f, "  Metadata files:  {}", self.meta_files)?;
        writeln!(f, "  Processed files: {}", self.processed_files)?;
        writeln!(f, "  Counts match:    {}", self.counts_match())?;
        writeln!(f, "  Ids contiguous:  {}", self.ids_contiguous())?;
        if !self.invalid_dates.is_empty() {
            writeln!(f, "  Invalid dates:   {:?}", self.invalid_dates)?;
        }
        if !self.broken_meta.is_empty() {
            writeln!(f, "  Broken metadata: {}", self.broken_meta.join(", "))?;
        }
        Ok(())
    }
}

/// Count dataset files and check metadata ids and dates
pub fn inspect_dataset(path: &Path) -> Result<DatasetReport> {
    validate_dataset(path)?;

    let store = ArticleStore::new(path);
    let mut report = DatasetReport::default();

    let entries = fs::read_dir(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();

        if name.ends_with(RAW_SUFFIX) {
            report.raw_files += 1;
        } else if name.ends_with(PROCESSED_SUFFIX) {
            report.processed_files += 1;
        } else if name.ends_with(META_SUFFIX) {
            report.meta_files += 1;

            let Some(id) = id_from_file_name(&name, META_SUFFIX) else {
                report.broken_meta.push(name);
                continue;
            };
            match store.load_meta(id) {
                Ok(_) => report.meta_ids.push(id),
                Err(StorageError::InvalidDate { .. }) => {
                    report.meta_ids.push(id);
                    report.invalid_dates.push(id);
                }
                Err(e) => {
                    tracing::warn!(file = %name, error = %e, "Unreadable metadata");
                    report.broken_meta.push(name);
                }
            }
        }
    }

    report.meta_ids.sort_unstable();
    report.invalid_dates.sort_unstable();
    report.broken_meta.sort();

    tracing::debug!(
        raw = report.raw_files,
        meta = report.meta_files,
        processed = report.processed_files,
        "Inspected dataset"
    );
    Ok(report)
}
