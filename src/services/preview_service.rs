//! Service for rendering the preview of a selected asset.
//!
//! Previews are read-only: the source file is decoded fresh on every call and
//! never written.

use crate::config::{NO_SELECTION_TEXT, NOT_AN_IMAGE_TEXT, READ_ERROR_TEXT, SIZE_UNKNOWN_TEXT};
use crate::error::FileError;
use crate::image_loader;
use crate::state::{WorkspaceState, lock_workspace};
use log::{debug, warn};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Decoded preview pixels, packed RGB8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// What the preview pane shows for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    NoSelection,
    Image(PreviewImage),
    NotAnImage,
    ReadError,
}

impl Preview {
    /// Placeholder text shown instead of an image, if any.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Preview::NoSelection => Some(NO_SELECTION_TEXT),
            Preview::Image(_) => None,
            Preview::NotAnImage => Some(NOT_AN_IMAGE_TEXT),
            Preview::ReadError => Some(READ_ERROR_TEXT),
        }
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self {
            Preview::Image(image) => Some((image.width, image.height)),
            _ => None,
        }
    }

    pub fn size_label(&self) -> String {
        match self.dimensions() {
            Some((width, height)) => format!("Size: {}x{}", width, height),
            None => SIZE_UNKNOWN_TEXT.to_string(),
        }
    }
}

/// Decodes the file at `path` into a preview.
pub fn render_preview(path: &Path) -> Preview {
    match image_loader::load_image_blocking(path) {
        Ok((data, width, height)) => {
            debug!("Preview {} ({}x{})", path.display(), width, height);
            Preview::Image(PreviewImage {
                data,
                width,
                height,
            })
        }
        Err(FileError::Io(e)) => {
            warn!("Error reading {}: {}", path.display(), e);
            Preview::ReadError
        }
        Err(e) => {
            debug!("{} is not an image: {}", path.display(), e);
            Preview::NotAnImage
        }
    }
}

/// Renders previews of assets in the current directory.
#[derive(Clone)]
pub struct PreviewService {
    workspace: Arc<Mutex<WorkspaceState>>,
}

impl PreviewService {
    pub fn new(workspace: Arc<Mutex<WorkspaceState>>) -> Self {
        Self { workspace }
    }

    /// Renders the preview for `selection`, resolved against the directory
    /// that is current right now.
    pub fn preview(&self, selection: Option<&str>) -> Preview {
        let Some(name) = selection else {
            return Preview::NoSelection;
        };

        // Resolve under the lock, decode outside it.
        let path = lock_workspace(&self.workspace).resolve(name);
        match path {
            Some(path) => render_preview(&path),
            None => {
                warn!("Cannot preview {}: no directory is open", name);
                Preview::ReadError
            }
        }
    }
}
