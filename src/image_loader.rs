//! Photo loading for the quality check
//!
//! Photos arrive either as a file on disk or as bytes already in memory
//! (an upload body, a cached download). Loading is split in two steps:
//!
//! - [`probe_dimensions`] reads only the header. If this fails the photo is
//!   unreachable and the error is returned to the caller.
//! - [`decode_rgb`] decodes the full pixel buffer. The photo checker treats a
//!   failure here as "pixels unavailable" and degrades to a resolution-only
//!   check instead of failing.
//!
//! ## Supported Formats
//!
//! Everything the `image` crate decodes with its default features:
//! JPEG, PNG, GIF, WebP, TIFF, BMP, ICO, TGA, EXR, PNM, QOI, DDS, HDR.

use crate::error::{QuoteError, Result};
use image::{ImageReader, RgbImage};
use std::io::{BufReader, Cursor};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
    /// GIF image (first frame only)
    Gif,
    /// WebP image
    WebP,
    /// TIFF image
    Tiff,
    /// BMP image
    Bmp,
    /// ICO image
    Ico,
    /// TGA image
    Tga,
    /// OpenEXR image
    Exr,
    /// PNM image (PBM, PGM, PPM)
    Pnm,
    /// QOI image
    Qoi,
    /// DDS image
    Dds,
    /// HDR image
    Hdr,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            "ico" => Some(ImageFormat::Ico),
            "tga" => Some(ImageFormat::Tga),
            "exr" => Some(ImageFormat::Exr),
            "pbm" | "pgm" | "ppm" | "pnm" => Some(ImageFormat::Pnm),
            "qoi" => Some(ImageFormat::Qoi),
            "dds" => Some(ImageFormat::Dds),
            "hdr" => Some(ImageFormat::Hdr),
            _ => None,
        }
    }
}

/// Where a photo comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    /// Image file on disk; format detected from the extension
    Path(PathBuf),
    /// Encoded image bytes; format guessed from the content
    Bytes(Vec<u8>),
}

impl PhotoSource {
    /// Short description for logs and error messages
    pub fn describe(&self) -> String {
        match self {
            PhotoSource::Path(path) => path.display().to_string(),
            PhotoSource::Bytes(bytes) => format!("<{} bytes>", bytes.len()),
        }
    }
}

impl From<&Path> for PhotoSource {
    fn from(path: &Path) -> Self {
        PhotoSource::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for PhotoSource {
    fn from(path: PathBuf) -> Self {
        PhotoSource::Path(path)
    }
}

impl From<Vec<u8>> for PhotoSource {
    fn from(bytes: Vec<u8>) -> Self {
        PhotoSource::Bytes(bytes)
    }
}

/// Read the image dimensions from the header only
///
/// # Errors
///
/// Returns `QuoteError::UnsupportedFormat` for unknown file extensions and
/// `QuoteError::ImageLoadError` if the file cannot be opened or the header
/// cannot be parsed.
pub fn probe_dimensions(source: &PhotoSource) -> Result<(u32, u32)> {
    match source {
        PhotoSource::Path(path) => open_path(path)?.into_dimensions().map_err(|e| {
            QuoteError::image_load(format!("Failed to read header: {}", path.display()), e)
        }),
        PhotoSource::Bytes(bytes) => open_bytes(bytes)?
            .into_dimensions()
            .map_err(|e| QuoteError::image_load("Failed to read image header", e)),
    }
}

/// Decode the full image to 8-bit RGB
///
/// Alpha is discarded and higher bit depths are reduced to 8 bits.
pub fn decode_rgb(source: &PhotoSource) -> Result<RgbImage> {
    let image = match source {
        PhotoSource::Path(path) => open_path(path)?.decode().map_err(|e| {
            QuoteError::image_load(format!("Failed to decode image: {}", path.display()), e)
        })?,
        PhotoSource::Bytes(bytes) => open_bytes(bytes)?
            .decode()
            .map_err(|e| QuoteError::image_load("Failed to decode image", e))?,
    };
    Ok(image.to_rgb8())
}

fn open_path(path: &Path) -> Result<ImageReader<BufReader<File>>> {
    if ImageFormat::from_extension(path).is_none() {
        return Err(QuoteError::UnsupportedFormat {
            path: path.display().to_string(),
        });
    }

    ImageReader::open(path).map_err(|e| {
        QuoteError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })
}

fn open_bytes(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| QuoteError::image_load("Failed to detect image format", e))
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp", "ico",
        "tga", "exr", "pbm", "pgm", "ppm", "pnm", "qoi", "dds", "hdr",
    ]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}
