//! Concurrent loading of export files into a dataset
//!
//! Files are parsed on blocking tasks, at most `workers` at a time, and
//! collected in input order. The dataset is keyed by each file's `Comment`
//! metadata; two files with the same comment are rejected.

use super::discovery::{RunSelection, discover_eis_files};
use super::parser::parse_file;
use super::stats::{ParseResult, ParseStats};
use crate::app::models::Dataset;
use crate::constants::LABEL_METADATA_KEY;
use crate::{Error, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::info;

/// Summary of a load
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadStats {
    pub files_loaded: usize,
    pub points_loaded: usize,
    pub parse: ParseStats,
}

impl LoadStats {
    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "Loaded {} files with {} points ({} rows skipped)",
            self.files_loaded, self.points_loaded, self.parse.rows_skipped
        )
    }
}

/// Loaded dataset with statistics
#[derive(Debug, Clone)]
pub struct LoadResult {
    pub dataset: Dataset,
    pub stats: LoadStats,
}

/// Reads export files concurrently
#[derive(Debug, Clone)]
pub struct EisLoader {
    workers: usize,
    show_progress: bool,
}

impl EisLoader {
    /// Create a loader running at most `workers` parses at a time
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            show_progress: false,
        }
    }

    /// Show a progress bar on stderr while loading
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Discover and load the exports under `root`
    pub async fn load_directory(
        &self,
        root: &Path,
        file_pattern: &str,
        selection: RunSelection,
    ) -> Result<LoadResult> {
        let files = discover_eis_files(root, file_pattern, selection)?;
        self.load_files(&files).await
    }

    /// Load the given files into one dataset, in file order
    pub async fn load_files(&self, files: &[PathBuf]) -> Result<LoadResult> {
        info!(
            "Loading {} EIS files with {} workers",
            files.len(),
            self.workers
        );

        let progress_bar = (self.show_progress && !files.is_empty())
            .then(|| create_loading_progress_bar(files.len() as u64));

        let parsed: Vec<(PathBuf, Result<ParseResult>)> = stream::iter(files.iter().cloned())
            .map(|path| {
                let progress_bar = progress_bar.clone();
                async move {
                    let task_path = path.clone();
                    let result = task::spawn_blocking(move || parse_file(&task_path))
                        .await
                        .unwrap_or_else(|e| {
                            Err(Error::processing_interrupted(format!(
                                "reader task for {} failed: {}",
                                path.display(),
                                e
                            )))
                        });
                    if let Some(pb) = &progress_bar {
                        pb.inc(1);
                    }
                    (path, result)
                }
            })
            .buffered(self.workers)
            .collect()
            .await;

        if let Some(pb) = &progress_bar {
            pb.finish_with_message("EIS files loaded");
        }

        let mut dataset = Dataset::new();
        let mut sources: HashMap<String, PathBuf> = HashMap::new();
        let mut stats = LoadStats::default();

        for (path, result) in parsed {
            let ParseResult { series, stats: file_stats } = result?;

            let label = series
                .raw_label()
                .filter(|label| !label.is_empty())
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::eis_format(
                        path.display().to_string(),
                        format!("missing '{}' metadata", LABEL_METADATA_KEY),
                    )
                })?;

            if let Some(first) = sources.get(&label) {
                return Err(Error::duplicate_raw_label(
                    label,
                    first.display().to_string(),
                    path.display().to_string(),
                ));
            }

            stats.files_loaded += 1;
            stats.points_loaded += series.len();
            stats.parse.merge(&file_stats);
            sources.insert(label.clone(), path);
            dataset.insert(label, series);
        }

        info!("{}", stats.summary());
        Ok(LoadResult { dataset, stats })
    }
}

fn create_loading_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} [{per_sec}] ETA: {eta}",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message("Reading EIS files");
    pb
}
