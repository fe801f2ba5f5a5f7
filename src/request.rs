//! Resize request parsing and validation.

use crate::config::DEFAULT_RESAMPLING;
use crate::error::ValidationError;
use image::imageops::FilterType;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::str::FromStr;

/// Interpolation used when scaling a source into the destination raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resampling {
    Nearest,
    Bilinear,
}

impl Resampling {
    pub fn filter(self) -> FilterType {
        match self {
            Resampling::Nearest => FilterType::Nearest,
            Resampling::Bilinear => FilterType::Triangle,
        }
    }
}

impl FromStr for Resampling {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nearest" => Ok(Resampling::Nearest),
            "bilinear" => Ok(Resampling::Bilinear),
            other => Err(format!(
                "unknown filter '{other}', expected nearest or bilinear"
            )),
        }
    }
}

/// Validated target dimensions of a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeRequest {
    width: NonZeroU32,
    height: NonZeroU32,
    resampling: Resampling,
}

impl ResizeRequest {
    /// Builds a request from already-numeric dimensions.
    pub fn new(width: i64, height: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            width: positive("width", width)?,
            height: positive("height", height)?,
            resampling: DEFAULT_RESAMPLING,
        })
    }

    /// Parses the width and height as typed by the user.
    ///
    /// The text must be a plain 32-bit integer: surrounding whitespace is
    /// rejected, as is anything that is not strictly positive.
    pub fn parse(width: &str, height: &str) -> Result<Self, ValidationError> {
        let width = parse_dimension("width", width)?;
        let height = parse_dimension("height", height)?;
        Self::new(width, height)
    }

    pub fn with_resampling(mut self, resampling: Resampling) -> Self {
        self.resampling = resampling;
        self
    }

    pub fn width(&self) -> u32 {
        self.width.get()
    }

    pub fn height(&self) -> u32 {
        self.height.get()
    }

    pub fn resampling(&self) -> Resampling {
        self.resampling
    }
}

fn parse_dimension(field: &'static str, text: &str) -> Result<i64, ValidationError> {
    text.parse::<i32>()
        .map(i64::from)
        .map_err(|_| ValidationError::NotNumeric {
            field,
            value: text.to_string(),
        })
}

fn positive(field: &'static str, value: i64) -> Result<NonZeroU32, ValidationError> {
    u32::try_from(value)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(ValidationError::NonPositive { field, value })
}

/// Where the resized output of a batch goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResizeMode {
    /// Write each result back over its source file.
    Overwrite,
    /// Write the single selected entry to this path, in the source's format.
    SaveAs(PathBuf),
}
