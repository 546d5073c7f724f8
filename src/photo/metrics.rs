//! Brightness and sharpness metrics over a downsampled luma plane
//!
//! The photo is first shrunk so its longest side is at most the configured
//! analysis dimension, then reduced to a single luma channel. Two numbers come
//! out of that plane:
//!
//! - brightness: mean luma on a 0-255 scale
//! - sharpness: mean 3x3 Sobel gradient magnitude over interior pixels
//!
//! Sharpness depends on the analysis size, so thresholds are only comparable
//! between runs that use the same `analysis_max_dimension`.

use crate::config::PhotoCheckConfig;
use crate::constants::luma;
use image::imageops::{self, FilterType};
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Row-major single-channel luma buffer
#[derive(Debug, Clone, PartialEq)]
pub struct LumaPlane {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl LumaPlane {
    /// Wrap an existing buffer; `None` if the length does not match
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Option<Self> {
        (width.checked_mul(height)? == data.len()).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    fn at(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }
}

/// Metrics measured on the analysis buffer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhotoMetrics {
    pub analyzed_width: u32,
    pub analyzed_height: u32,
    /// Mean luma, 0-255
    pub brightness: f32,
    /// Mean Sobel gradient magnitude
    pub sharpness: f32,
}

/// Target size that fits inside `max_dimension` while keeping aspect ratio.
///
/// Never upscales; each side is at least one pixel, and a `max_dimension`
/// of zero is treated as one.
pub fn analysis_size(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let max_dimension = max_dimension.max(1);
    let longest = width.max(height);
    if longest <= max_dimension || longest == 0 {
        return (width, height);
    }
    let scale = max_dimension as f64 / longest as f64;
    let scaled = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, max_dimension);
    (scaled(width), scaled(height))
}

/// Shrink an image for analysis; borrows the input when it is already small
pub fn downsample(image: &RgbImage, max_dimension: u32) -> Cow<'_, RgbImage> {
    let (width, height) = image.dimensions();
    let (target_w, target_h) = analysis_size(width, height, max_dimension);
    if (target_w, target_h) == (width, height) {
        return Cow::Borrowed(image);
    }
    Cow::Owned(imageops::resize(image, target_w, target_h, FilterType::Triangle))
}

/// Per-pixel Rec. 601 luma
pub fn luma_plane(image: &RgbImage) -> LumaPlane {
    let data = image
        .pixels()
        .map(|p| {
            let [r, g, b] = p.0;
            luma::RED * r as f32 + luma::GREEN * g as f32 + luma::BLUE * b as f32
        })
        .collect();

    LumaPlane {
        width: image.width() as usize,
        height: image.height() as usize,
        data,
    }
}

/// Mean luma; zero for an empty plane
pub fn mean_brightness(plane: &LumaPlane) -> f32 {
    if plane.data.is_empty() {
        return 0.0;
    }
    let sum: f64 = plane.data.iter().map(|&v| v as f64).sum();
    (sum / plane.data.len() as f64) as f32
}

/// Mean Sobel gradient magnitude over interior pixels.
///
/// Border pixels have no full 3x3 neighborhood and are skipped. Planes
/// narrower or shorter than three pixels yield zero.
pub fn mean_sobel_magnitude(plane: &LumaPlane) -> f32 {
    let (w, h) = (plane.width, plane.height);
    if w < 3 || h < 3 {
        return 0.0;
    }

    let mut sum = 0.0f64;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let tl = plane.at(x - 1, y - 1);
            let tc = plane.at(x, y - 1);
            let tr = plane.at(x + 1, y - 1);
            let ml = plane.at(x - 1, y);
            let mr = plane.at(x + 1, y);
            let bl = plane.at(x - 1, y + 1);
            let bc = plane.at(x, y + 1);
            let br = plane.at(x + 1, y + 1);

            let gx = (tr + 2.0 * mr + br) - (tl + 2.0 * ml + bl);
            let gy = (bl + 2.0 * bc + br) - (tl + 2.0 * tc + tr);
            sum += (gx * gx + gy * gy).sqrt() as f64;
        }
    }

    let interior = ((w - 2) * (h - 2)) as f64;
    (sum / interior) as f32
}

/// Downsample and measure brightness and sharpness
pub fn analyze_pixels(image: &RgbImage, config: &PhotoCheckConfig) -> PhotoMetrics {
    let small = downsample(image, config.analysis_max_dimension);
    let plane = luma_plane(&small);

    PhotoMetrics {
        analyzed_width: small.width(),
        analyzed_height: small.height(),
        brightness: mean_brightness(&plane),
        sharpness: mean_sobel_magnitude(&plane),
    }
}
