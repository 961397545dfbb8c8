//! Case-insensitive directory listings.
//!
//! Ada unit names are case-insensitive, so `with Greet;` must find
//! `greet.adb` as well as `GREET.ADB`. An index is built per lookup site and
//! never cached across calls.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::unit::SOURCE_SUFFIXES;

/// Files of one directory keyed by their uppercased name.
#[derive(Debug, Clone, Default)]
pub struct SiblingIndex {
    dir: PathBuf,
    entries: HashMap<String, String>,
}

impl SiblingIndex {
    /// List `dir`. An unreadable or missing directory yields an empty index.
    pub fn read(dir: &Path) -> Self {
        let dir = if dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            dir.to_path_buf()
        };

        let mut entries = HashMap::new();
        match std::fs::read_dir(&dir) {
            Ok(read_dir) => {
                for entry in read_dir.flatten() {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    entries.insert(name.to_uppercase(), name);
                }
            }
            Err(e) => {
                tracing::debug!("cannot list {}: {}", dir.display(), e);
            }
        }

        SiblingIndex { dir, entries }
    }

    /// Index the directory containing `path`.
    pub fn of(path: &Path) -> Self {
        Self::read(path.parent().unwrap_or_else(|| Path::new("")))
    }

    /// Look up a file name ignoring case.
    pub fn find(&self, file_name: &str) -> Option<PathBuf> {
        self.entries
            .get(&file_name.to_uppercase())
            .map(|actual| self.dir.join(actual))
    }

    /// Source files implementing `unit`, body first then spec.
    pub fn units_named(&self, unit: &str) -> Vec<PathBuf> {
        SOURCE_SUFFIXES
            .iter()
            .filter_map(|suffix| self.find(&format!("{}{}", unit, suffix)))
            .collect()
    }
}
