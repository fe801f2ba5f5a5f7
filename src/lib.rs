//! Browse a directory of image assets, preview them and resize them in batches.
//!
//! The crate is split the way the application flows: [`state`] holds the open
//! directory and its assets, [`services`] turns user actions into calls, and
//! the lower modules do the file and pixel work.

pub mod config;
pub mod error;
pub mod file_utils;
pub mod image_loader;
pub mod image_writer;
pub mod report;
pub mod request;
pub mod services;
pub mod state;

pub use error::{FileError, ResizeError, ValidationError};
pub use report::{BatchReport, FileFailure};
pub use request::{Resampling, ResizeMode, ResizeRequest};
pub use services::{DirectoryService, Preview, PreviewService, ResizeJob, ResizeService};
pub use state::{AppState, AssetEntry, WorkspaceState};
