//! Unified error types for the asset resizer.

use std::io;
use thiserror::Error;

/// Input rejected before any file is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter valid numbers for {field}: {value:?}")]
    NotNumeric { field: &'static str, value: String },
    #[error("Width and height must be positive numbers ({field} = {value})")]
    NonPositive { field: &'static str, value: i64 },
    #[error("No images selected")]
    EmptySelection,
    #[error("Please select a single image to save ({count} selected)")]
    SaveAsSelection { count: usize },
    #[error("No directory is open")]
    NoDirectory,
}

/// Failure of a single file inside a batch. The batch carries on past it.
#[derive(Error, Debug)]
pub enum FileError {
    /// The file was read but its content is not a recognised image.
    #[error("not a valid image: {0}")]
    NotAnImage(String),
    /// Reading or writing the file failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The destination format cannot be written with this raster.
    #[error("unsupported output format: {0}")]
    EncodeUnsupported(String),
    /// The resampling buffers for these dimensions exceed the allocation limit.
    #[error("{width}x{height} is too large to resize in memory")]
    TooLarge { width: u32, height: u32 },
}

impl FileError {
    /// Short machine-readable kind, used in JSON reports.
    pub fn kind(&self) -> &'static str {
        match self {
            FileError::NotAnImage(_) => "not_an_image",
            FileError::Io(_) => "io",
            FileError::EncodeUnsupported(_) => "encode_unsupported",
            FileError::TooLarge { .. } => "too_large",
        }
    }

    /// Classifies an error raised while decoding a source file.
    pub fn from_decode(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => FileError::Io(e),
            other => FileError::NotAnImage(other.to_string()),
        }
    }

    /// Classifies an error raised while encoding a resized raster.
    pub fn from_encode(err: image::ImageError, format: &str) -> Self {
        match err {
            image::ImageError::IoError(e) => FileError::Io(e),
            image::ImageError::Unsupported(_) => FileError::EncodeUnsupported(format.to_string()),
            other => FileError::EncodeUnsupported(format!("{format} ({other})")),
        }
    }
}

/// Errors returned by the resize service.
#[derive(Error, Debug)]
pub enum ResizeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Another batch is still running on the worker.
    #[error("A resize is already in progress")]
    Busy,
}

/// Top-level application errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Resize(#[from] ResizeError),
    #[error("Invalid arguments: {0}")]
    Usage(String),
    #[error("Failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
    #[error("Resize worker stopped before reporting back")]
    WorkerLost,
}

impl From<pico_args::Error> for AppError {
    fn from(err: pico_args::Error) -> Self {
        AppError::Usage(err.to_string())
    }
}

/// Type alias for Results in this application.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use image::error::{
        DecodingError, ImageFormatHint, ParameterError, ParameterErrorKind, UnsupportedError,
    };

    #[test]
    fn decode_io_errors_stay_io() {
        let err = image::ImageError::IoError(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(matches!(FileError::from_decode(err), FileError::Io(_)));
    }

    #[test]
    fn decode_format_errors_mean_not_an_image() {
        let err = image::ImageError::Decoding(DecodingError::new(
            ImageFormatHint::Exact(image::ImageFormat::Png),
            "bad signature",
        ));
        let classified = FileError::from_decode(err);
        assert_eq!(classified.kind(), "not_an_image");
    }

    #[test]
    fn encode_unsupported_names_the_format() {
        let err = image::ImageError::Unsupported(UnsupportedError::from(ImageFormatHint::Unknown));
        match FileError::from_encode(err, "tiff") {
            FileError::EncodeUnsupported(format) => assert_eq!(format, "tiff"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn other_encoder_rejections_keep_the_format_and_detail() {
        let err = image::ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        ));
        let classified = FileError::from_encode(err, "gif");
        assert_eq!(classified.kind(), "encode_unsupported");
        match classified {
            FileError::EncodeUnsupported(detail) => assert!(detail.starts_with("gif (")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn too_large_names_the_dimensions() {
        let err = FileError::TooLarge {
            width: 70000,
            height: 3,
        };
        assert_eq!(err.kind(), "too_large");
        assert!(err.to_string().starts_with("70000x3 "));
    }
}
