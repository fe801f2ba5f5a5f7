//! Service for opening asset directories.

use crate::state::{AssetEntry, WorkspaceState, lock_workspace};
use log::info;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Opens directories and exposes the resulting asset list.
#[derive(Clone)]
pub struct DirectoryService {
    workspace: Arc<Mutex<WorkspaceState>>,
}

impl DirectoryService {
    pub fn new(workspace: Arc<Mutex<WorkspaceState>>) -> Self {
        Self { workspace }
    }

    /// Makes `directory` the current directory and returns its assets.
    ///
    /// A path that is not a readable directory becomes current with an empty list.
    pub fn open(&self, directory: PathBuf) -> Vec<AssetEntry> {
        let mut workspace = lock_workspace(&self.workspace);
        let entries = workspace.open_directory(directory).to_vec();
        if let Some(dir) = workspace.current_directory() {
            info!("Opened {} ({} assets)", dir.display(), entries.len());
        }
        entries
    }

    pub fn current_directory(&self) -> Option<PathBuf> {
        lock_workspace(&self.workspace)
            .current_directory()
            .map(|dir| dir.to_path_buf())
    }

    pub fn entries(&self) -> Vec<AssetEntry> {
        lock_workspace(&self.workspace).entries().to_vec()
    }
}
