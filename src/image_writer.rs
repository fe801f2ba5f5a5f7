//! Resampling and encoding of resized rasters.

use crate::error::FileError;
use crate::file_utils::suffix_of;
use crate::request::{Resampling, ResizeRequest};
use image::{DynamicImage, ImageFormat, Limits};
use log::debug;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Keeps the source color model when it is one we can resample directly,
/// otherwise widens it to RGBA8.
fn with_known_color_model(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageRgba8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_)
        | DynamicImage::ImageRgb32F(_)
        | DynamicImage::ImageRgba32F(_) => image,
        other => DynamicImage::ImageRgba8(other.to_rgba8()),
    }
}

/// Bytes per pixel of the `f32` RGBA scratch buffer used by filtered resampling.
const FILTER_SCRATCH_BYTES_PER_PIXEL: u64 = 16;

/// Bytes the resampler allocates to scale `image` to `request`.
///
/// Filtered resampling first scales vertically into a scratch buffer that is
/// as wide as the source and as tall as the output. `None` on overflow.
fn resize_allocation(image: &DynamicImage, request: &ResizeRequest) -> Option<u64> {
    let width = u64::from(request.width());
    let height = u64::from(request.height());
    let output = width
        .checked_mul(height)?
        .checked_mul(u64::from(image.color().bytes_per_pixel()))?;
    let scratch = match request.resampling() {
        Resampling::Nearest => 0,
        Resampling::Bilinear => u64::from(image.width())
            .checked_mul(height)?
            .checked_mul(FILTER_SCRATCH_BYTES_PER_PIXEL)?,
    };
    output.checked_add(scratch)
}

/// Scales `image` to exactly the requested dimensions, ignoring aspect ratio.
///
/// Requests whose buffers would not fit the decoder's default allocation
/// limit are refused before anything is allocated.
pub fn resize(image: DynamicImage, request: &ResizeRequest) -> Result<DynamicImage, FileError> {
    let image = with_known_color_model(image);
    let max_alloc = Limits::default().max_alloc.unwrap_or(u64::MAX);
    match resize_allocation(&image, request) {
        Some(bytes) if bytes <= max_alloc => {}
        _ => {
            return Err(FileError::TooLarge {
                width: request.width(),
                height: request.height(),
            });
        }
    }

    Ok(image.resize_exact(
        request.width(),
        request.height(),
        request.resampling().filter(),
    ))
}

/// Picks the output format from a file name's suffix.
pub fn format_for_name(name: &str) -> Result<ImageFormat, FileError> {
    let suffix = suffix_of(name).unwrap_or_default();
    ImageFormat::from_extension(suffix)
        .ok_or_else(|| FileError::EncodeUnsupported(suffix.to_string()))
}

/// Encodes `image` as `format` and writes it to `destination`.
///
/// Encoding happens in memory first; the destination is only opened once the
/// encoder has succeeded, so a rejected format leaves an existing file intact.
pub fn write_image(
    image: &DynamicImage,
    format: ImageFormat,
    destination: &Path,
) -> Result<(), FileError> {
    let mut encoded = Cursor::new(Vec::new());
    image
        .write_to(&mut encoded, format)
        .map_err(|e| FileError::from_encode(e, format_label(format)))?;

    let bytes = encoded.into_inner();
    fs::write(destination, &bytes)?;
    debug!(
        "Wrote {} ({}x{}, {:?}, {} bytes)",
        destination.display(),
        image.width(),
        image.height(),
        format,
        bytes.len()
    );
    Ok(())
}

fn format_label(format: ImageFormat) -> &'static str {
    format
        .extensions_str()
        .first()
        .copied()
        .unwrap_or("unknown")
}
