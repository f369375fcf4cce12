//! Feature file discovery
//!
//! Resolves a comma-separated list of paths into parsed feature documents.
//! Directories are scanned recursively for `.feature` files; hidden
//! directories and dependency-manager directories are skipped.

use crate::error::{Result, StampedeError};
use crate::loader::document;
use crate::models::FeatureDocument;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Directories never scanned for feature files.
const SKIPPED_DIRS: &[&str] = &["node_modules", "target"];

/// Load and parse all feature files reachable from `paths_spec`.
///
/// `paths_spec` may name a single file or directory, or several separated by
/// commas. With a single path, a missing entry is an immediate error; in a
/// multi-path list, missing or unusable entries are warned about and skipped
/// as long as at least one feature file is found overall.
pub fn load_features(paths_spec: &str) -> Result<Vec<FeatureDocument>> {
    let entries: Vec<&str> = paths_spec
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let strict = entries.len() == 1;
    let mut documents = Vec::new();

    for entry in &entries {
        let path = Path::new(entry);

        if !path.exists() {
            if strict {
                return Err(StampedeError::FeatureNotFound(entry.to_string()));
            }
            warn!(path = %entry, "feature path does not exist, skipping");
            continue;
        }

        if path.is_dir() {
            let mut files = Vec::new();
            collect_feature_files(path, &mut files)?;
            files.sort();
            for file in &files {
                documents.push(document::parse_feature_file(file)?);
            }
        } else if entry.ends_with(".feature") {
            documents.push(document::parse_feature_file(path)?);
        } else {
            warn!(path = %entry, "not a directory or .feature file, skipping");
        }
    }

    if documents.is_empty() {
        return Err(StampedeError::NoFeaturesFound(paths_spec.to_string()));
    }

    Ok(documents)
}

/// Recursively collect `.feature` files under `dir`.
fn collect_feature_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir).map_err(StampedeError::IoError)? {
        let entry = entry.map_err(StampedeError::IoError)?;
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();

        if path.is_dir() {
            if name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref()) {
                continue;
            }
            collect_feature_files(&path, files)?;
        } else if name.ends_with(".feature") {
            files.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MINIMAL_FEATURE: &str = "Feature: Health\n  Scenario: Ping\n    When I ping the service\n";

    #[test]
    fn test_load_single_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("health.feature");
        fs::write(&file, MINIMAL_FEATURE).unwrap();

        let documents = load_features(file.to_str().unwrap()).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].scenarios.len(), 1);
    }

    #[test]
    fn test_scan_directory_recursively() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("api").join("users");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("health.feature"), MINIMAL_FEATURE).unwrap();
        fs::write(nested.join("users.feature"), MINIMAL_FEATURE).unwrap();

        // hidden and dependency directories must not be scanned
        let hidden = dir.path().join(".git");
        fs::create_dir_all(&hidden).unwrap();
        fs::write(hidden.join("stale.feature"), MINIMAL_FEATURE).unwrap();
        let deps = dir.path().join("node_modules");
        fs::create_dir_all(&deps).unwrap();
        fs::write(deps.join("vendored.feature"), MINIMAL_FEATURE).unwrap();

        let documents = load_features(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(documents.len(), 2);
    }

    #[test]
    fn test_missing_single_path_is_not_found() {
        let result = load_features("/nonexistent/features");
        assert!(matches!(result, Err(StampedeError::FeatureNotFound(_))));
    }

    #[test]
    fn test_multi_path_skips_missing_entries() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("health.feature");
        fs::write(&file, MINIMAL_FEATURE).unwrap();

        let spec = format!("/nonexistent/features, {}", file.display());
        let documents = load_features(&spec).unwrap();
        assert_eq!(documents.len(), 1);
    }

    #[test]
    fn test_empty_directory_is_empty_result() {
        let dir = TempDir::new().unwrap();
        let result = load_features(dir.path().to_str().unwrap());
        assert!(matches!(result, Err(StampedeError::NoFeaturesFound(_))));
    }
}
