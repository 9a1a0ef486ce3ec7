// File collector: turns a directory of text files into upload records.
// Individual bad files are reported and skipped; only a missing directory or
// an empty result aborts the run.

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::models::FileRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Read every supported file in `dir` into a `FileRecord`.
///
/// Files are visited in name order. Progress for each file goes to stdout.
pub fn collect_files(dir: &Path, config: &Config) -> Result<Vec<FileRecord>> {
    if !dir.is_dir() {
        return Err(ClientError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut candidates: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            warn!(path = %entry.path().display(), "skipping entry with non UTF-8 name");
            continue;
        };
        if has_supported_extension(&name, &config.supported_extensions) {
            candidates.push((name, entry.path()));
        }
    }
    candidates.sort_by(|a, b| a.0.cmp(&b.0));
    debug!(dir = %dir.display(), candidates = candidates.len(), "scanned directory");

    let mut records = Vec::with_capacity(candidates.len());
    for (name, path) in candidates {
        if let Some(record) = read_record(&name, &path, config) {
            records.push(record);
        }
    }

    if records.is_empty() {
        return Err(ClientError::NoEligibleFiles {
            dir: dir.to_path_buf(),
            extensions: config.supported_extensions.clone(),
        });
    }
    Ok(records)
}

/// Case-insensitive suffix match against the configured extensions.
pub fn has_supported_extension(name: &str, extensions: &[String]) -> bool {
    let lower = name.to_lowercase();
    extensions
        .iter()
        .any(|ext| lower.ends_with(&ext.to_lowercase()))
}

fn read_record(name: &str, path: &Path, config: &Config) -> Option<FileRecord> {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => {
            println!("✗ Failed to read file {name}: {e}");
            return None;
        }
    };
    if !metadata.is_file() {
        debug!(file = name, "not a regular file, ignoring");
        return None;
    }

    if metadata.len() > config.max_file_size_bytes {
        let size_mb = metadata.len() as f64 / (1024.0 * 1024.0);
        println!(
            "✗ File {name} is too large ({size_mb:.1}MB > {}MB)",
            config.max_file_size_mb()
        );
        return None;
    }

    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            println!("✗ Failed to read file {name}: {e}");
            return None;
        }
    };

    if text.trim().is_empty() {
        println!("⚠ File {name} is empty, skipping");
        return None;
    }

    if config.verbose_logging {
        println!("✓ Read file: {name} ({} characters)", text.chars().count());
    } else {
        println!("✓ Read file: {name}");
    }

    Some(FileRecord {
        file_name: name.to_string(),
        text,
        chunk_size: config.chunk_size,
        chunk_overlap: config.chunk_overlap,
    })
}
