//! Record loading utilities
//!
//! Generic helpers for reading and writing record files, shared by the
//! record store and the command implementations.

use miette::{IntoDiagnostic, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::project::RECORD_SUFFIX;

/// Load all records of type T from a directory
///
/// Scans the directory for record files and deserializes them.
/// Files that fail to parse are skipped with a warning in the log.
pub fn load_all<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut entities = Vec::new();

    if !dir.exists() {
        return Ok(entities);
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .into_diagnostic()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_record_file(path))
        .collect();
    paths.sort();

    for path in paths {
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable record file");
                continue;
            }
        };
        match serde_yml::from_str::<T>(&content) {
            Ok(entity) => entities.push(entity),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unparseable record");
            }
        }
    }

    Ok(entities)
}

/// Path of the record file named exactly `<id>.sqt.yaml`
///
/// References stored inside records resolve through this and nothing else.
pub fn exact_entity_file(dir: &Path, id: &str) -> Option<PathBuf> {
    if id.is_empty() || id.contains(['/', '\\']) {
        return None;
    }
    let path = dir.join(format!("{}{}", id, RECORD_SUFFIX));
    path.is_file().then_some(path)
}

/// Record files whose name contains `id`, sorted
pub fn matching_entity_files(dir: &Path, id: &str) -> Vec<PathBuf> {
    if id.is_empty() {
        return Vec::new();
    }
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_record_file(path))
        .filter(|path| {
            path.file_name()
                .and_then(|s| s.to_str())
                .map_or(false, |name| name.contains(id))
        })
        .collect();
    candidates.sort();
    candidates
}

/// Find a record file by ID (supports partial matching)
///
/// Exact file stems win over partial matches.
pub fn find_entity_file(dir: &Path, id: &str) -> Option<PathBuf> {
    exact_entity_file(dir, id).or_else(|| matching_entity_files(dir, id).into_iter().next())
}

/// Record ID encoded in a record file name
pub fn record_id_from_path(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|s| s.to_str())
        .and_then(|name| name.strip_suffix(RECORD_SUFFIX))
        .map(str::to_string)
}

/// Load a single record by ID
///
/// Returns the path and record if found.
pub fn load_entity<T: DeserializeOwned>(dir: &Path, id: &str) -> Result<Option<(PathBuf, T)>> {
    if let Some(path) = find_entity_file(dir, id) {
        let content = fs::read_to_string(&path).into_diagnostic()?;
        let entity: T = serde_yml::from_str(&content).into_diagnostic()?;
        return Ok(Some((path, entity)));
    }
    Ok(None)
}

/// Serialize a record to YAML and write it, creating parent directories
pub fn write_entity<T: Serialize>(path: &Path, entity: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).into_diagnostic()?;
        }
    }
    let yaml = serde_yml::to_string(entity).into_diagnostic()?;
    fs::write(path, yaml).into_diagnostic()
}

fn is_record_file(path: &Path) -> bool {
    path.to_string_lossy().ends_with(RECORD_SUFFIX)
}
