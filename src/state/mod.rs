//! State management for the asset resizer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub mod workspace;

pub use workspace::{AssetEntry, WorkspaceState};

/// Application-wide state container.
pub struct AppState {
    pub workspace: Arc<Mutex<WorkspaceState>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            workspace: Arc::new(Mutex::new(WorkspaceState::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Locks the workspace, recovering the data if a previous holder panicked.
///
/// Every mutation of [`WorkspaceState`] swaps whole values, so a poisoned
/// lock still guards a consistent state.
pub fn lock_workspace(workspace: &Mutex<WorkspaceState>) -> MutexGuard<'_, WorkspaceState> {
    workspace.lock().unwrap_or_else(PoisonError::into_inner)
}
