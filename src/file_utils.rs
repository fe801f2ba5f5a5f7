use crate::config::{SAVE_AS_PREFIX, SUPPORTED_IMAGE_EXTENSIONS};
use log::warn;
use std::fs;
use std::path::Path;

/// Returns the suffix after the last `.` of a file name, if any.
pub fn suffix_of(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, suffix)| suffix)
}

/// Whether a file name carries one of the supported image suffixes (case-insensitive).
pub fn is_supported_image_name(name: &str) -> bool {
    suffix_of(name)
        .map(|suffix| SUPPORTED_IMAGE_EXTENSIONS.contains(&suffix.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// File name offered as the default save-as destination for `name`.
pub fn suggested_save_name(name: &str) -> String {
    format!("{}{}", SAVE_AS_PREFIX, name)
}

/// Lists the image-suffixed file names of a directory, in the order the
/// filesystem returns them.
///
/// A missing or unreadable directory yields an empty list.
pub fn scan_directory(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot list {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| match entry.file_name().into_string() {
            Ok(name) => Some(name),
            Err(raw) => {
                warn!("Skipping non UTF-8 file name {:?}", raw);
                None
            }
        })
        .filter(|name| is_supported_image_name(name))
        .collect()
}
