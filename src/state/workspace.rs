//! Workspace state: the open directory and the assets listed from it.

use crate::file_utils;
use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A file name in the current directory that looked like an image when listed.
///
/// Whether it actually decodes is only known once it is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AssetEntry {
    name: String,
}

impl AssetEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Holds the current directory and its asset list.
#[derive(Debug, Default)]
pub struct WorkspaceState {
    current_directory: Option<PathBuf>,
    entries: Vec<AssetEntry>,
}

impl WorkspaceState {
    /// Creates a workspace with no directory open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `directory` current and lists its assets.
    ///
    /// The listing is built completely before the directory and entries are
    /// swapped in, so callers never observe a partial list.
    pub fn open_directory(&mut self, directory: PathBuf) -> &[AssetEntry] {
        let start = std::time::Instant::now();
        debug!("Scanning directory {:?}", directory);

        let entries: Vec<AssetEntry> = file_utils::scan_directory(&directory)
            .into_iter()
            .map(AssetEntry::new)
            .collect();

        debug!(
            "Found {} assets in {:?} in {:?}",
            entries.len(),
            directory,
            start.elapsed()
        );

        self.current_directory = Some(directory);
        self.entries = entries;
        &self.entries
    }

    pub fn current_directory(&self) -> Option<&Path> {
        self.current_directory.as_deref()
    }

    pub fn entries(&self) -> &[AssetEntry] {
        &self.entries
    }

    /// Resolves an asset name against the current directory.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.current_directory.as_ref().map(|dir| dir.join(name))
    }
}
