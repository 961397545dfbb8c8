//! Filesystem utilities.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;
use walkdir::WalkDir;

use crate::core::unit::is_source_file;

/// Expand command-line paths into Ada source files.
///
/// Directories contribute their own Ada sources (not those of
/// subdirectories), arguments containing glob metacharacters are expanded
/// against `base`, and anything else is taken as a file path. Order is
/// preserved and duplicates are dropped.
pub fn collect_sources(base: &Path, args: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut results: Vec<PathBuf> = Vec::new();

    for arg in args {
        let path = base.join(arg);
        let found = if path.is_dir() {
            dir_sources(&path)
        } else if is_pattern(arg) {
            glob_files(base, &[arg.to_string_lossy().into_owned()])?
        } else {
            vec![path]
        };

        for file in found {
            if !results.contains(&file) {
                results.push(file);
            }
        }
    }

    Ok(results)
}

fn dir_sources(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                tracing::warn!("walk error: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_source_file(p))
        .collect();
    files.sort();
    files
}

fn is_pattern(arg: &Path) -> bool {
    arg.to_string_lossy().contains(['*', '?', '['])
}

/// Find files matching glob patterns relative to a base directory.
pub fn glob_files(base: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();

    for pattern in patterns {
        // Make pattern absolute by joining with base
        let full_pattern = base.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();

        for entry in glob(&pattern_str)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
        {
            match entry {
                Ok(path) => {
                    if path.is_file() {
                        results.push(path);
                    }
                }
                Err(e) => {
                    tracing::warn!("glob error: {}", e);
                }
            }
        }
    }

    results.sort();
    results.dedup();
    Ok(results)
}

/// Remove a file, reporting whether it existed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("failed to remove file: {}", path.display())),
    }
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}
