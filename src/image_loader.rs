use crate::error::FileError;
use image::DynamicImage;
use std::path::Path;

/// Decodes an image file, sniffing the format from its content and falling
/// back to the file suffix.
///
/// I/O failures and unrecognised content are reported as distinct
/// [`FileError`] variants so callers can tell "cannot read" from "not an image".
pub fn decode(path: &Path) -> Result<DynamicImage, FileError> {
    let reader = image::ImageReader::open(path)?.with_guessed_format()?;
    reader.decode().map_err(FileError::from_decode)
}

/// Decodes an image and flattens it to packed RGB8 for display.
pub fn load_image_blocking(path: &Path) -> Result<(Vec<u8>, u32, u32), FileError> {
    let image = decode(path)?;
    let (width, height) = (image.width(), image.height());
    Ok((image.to_rgb8().into_raw(), width, height))
}
