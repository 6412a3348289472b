//! Loading of decoded replay records from disk.
//!
//! The replay decoder writes one JSON document per game. Files are read in
//! parallel; a file that cannot be parsed is skipped with a warning so a single
//! corrupt replay does not sink the whole set.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Result};
use rayon::prelude::*;

use super::types::MatchRecord;

/// Extension of decoded record files
pub const RECORD_EXTENSION: &str = "json";

/// Parse a single decoded record file
pub fn load_record(path: &Path) -> Result<MatchRecord> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open record file: {}", path.display()))?;
    let reader = BufReader::with_capacity(64 * 1024, file);

    let mut record: MatchRecord = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse record file: {}", path.display()))?;

    if record.file_path.is_empty() {
        record.file_path = path.display().to_string();
    }

    Ok(record)
}

/// List record files in a directory, sorted by file name
pub fn find_record_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map_or(false, |ext| ext == RECORD_EXTENSION)
        })
        .collect();

    paths.sort();
    Ok(paths)
}

/// Load every record file in a directory in parallel, keeping file-name order
pub fn load_records(dir: &Path) -> Result<Vec<MatchRecord>> {
    let paths = find_record_files(dir)?;
    log::info!("Reading {} record files from {}...", paths.len(), dir.display());

    let records: Vec<MatchRecord> = paths
        .par_iter()
        .filter_map(|path| match load_record(path) {
            Ok(record) => {
                log::debug!(
                    "Loaded {}: {} players, {} conversions",
                    path.display(),
                    record.player_count(),
                    record.conversions().len()
                );
                Some(record)
            }
            Err(e) => {
                log::warn!("Skipping {}: {:#}", path.display(), e);
                None
            }
        })
        .collect();

    log::info!("Loaded {} records", records.len());
    Ok(records)
}
