//! Service layer for business logic.
//!
//! Each user action maps to a plain request/response call here, so the
//! behaviour can be driven and tested without any UI toolkit.

pub mod directory_service;
pub mod preview_service;
pub mod resize_service;

pub use directory_service::DirectoryService;
pub use preview_service::{Preview, PreviewImage, PreviewService, render_preview};
pub use resize_service::{ResizeJob, ResizeService, resize_batch};
