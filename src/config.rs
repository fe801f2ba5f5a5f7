//! Application configuration constants.

use crate::request::Resampling;

/// Image file extensions picked up when scanning a directory.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Prefix of the file name suggested for save-as when no destination is given.
pub const SAVE_AS_PREFIX: &str = "resized_";

/// Filter used when a resize request does not name one.
pub const DEFAULT_RESAMPLING: Resampling = Resampling::Bilinear;

pub const NO_SELECTION_TEXT: &str = "(No image selected)";
pub const NOT_AN_IMAGE_TEXT: &str = "Not an image file";
pub const READ_ERROR_TEXT: &str = "Error reading image";
pub const SIZE_UNKNOWN_TEXT: &str = "Size: N/A";
