//! Photo-quality gate
//!
//! Decides whether a customer's photo is good enough to review by hand:
//! large enough, neither too dark nor washed out, and not blurry.
//!
//! The check is best-effort. If the header can be read but the pixels
//! cannot be decoded, the report carries no metrics and the verdict is
//! [`PhotoVerdict::Unchecked`], which still allows submission. Only a photo
//! that was actually measured and found lacking is rejected.

use crate::config::PhotoCheckConfig;
use crate::error::{QuoteError, Result};
use crate::image_loader::{decode_rgb, probe_dimensions, PhotoSource};
use crate::photo::metrics::{analyze_pixels, PhotoMetrics};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// A single reason a photo fails the quality gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhotoIssue {
    LowResolution {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },
    TooDark {
        brightness: f32,
        minimum: f32,
    },
    TooBright {
        brightness: f32,
        maximum: f32,
    },
    Blurry {
        sharpness: f32,
        minimum: f32,
    },
}

impl PhotoIssue {
    /// What the customer should do about it
    pub fn hint(&self) -> &'static str {
        match self {
            PhotoIssue::LowResolution { .. } => {
                "Please upload a larger photo, straight from the camera if possible."
            }
            PhotoIssue::TooDark { .. } => "Please retake the photo in better light.",
            PhotoIssue::TooBright { .. } => {
                "Please avoid direct sunlight or flash glare on the furniture."
            }
            PhotoIssue::Blurry { .. } => "Please hold the camera steady and let it focus.",
        }
    }
}

impl fmt::Display for PhotoIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoIssue::LowResolution {
                width,
                height,
                min_width,
                min_height,
            } => write!(
                f,
                "resolution {}x{} is below the {}x{} minimum",
                width, height, min_width, min_height
            ),
            PhotoIssue::TooDark { brightness, minimum } => {
                write!(f, "too dark (brightness {:.1}, minimum {:.1})", brightness, minimum)
            }
            PhotoIssue::TooBright { brightness, maximum } => {
                write!(f, "too bright (brightness {:.1}, maximum {:.1})", brightness, maximum)
            }
            PhotoIssue::Blurry { sharpness, minimum } => {
                write!(f, "blurry (sharpness {:.1}, minimum {:.1})", sharpness, minimum)
            }
        }
    }
}

/// Outcome of the quality gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoVerdict {
    /// Measured and within every threshold
    Accepted,
    /// At least one issue found
    Rejected,
    /// Pixels could not be read; only resolution was checked
    Unchecked,
}

/// Full result of checking one photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoReport {
    /// Original width in pixels
    pub width: u32,
    /// Original height in pixels
    pub height: u32,
    pub metrics: Option<PhotoMetrics>,
    pub issues: Vec<PhotoIssue>,
    pub verdict: PhotoVerdict,
}

impl PhotoReport {
    fn new(width: u32, height: u32, metrics: Option<PhotoMetrics>, issues: Vec<PhotoIssue>) -> Self {
        let verdict = if !issues.is_empty() {
            PhotoVerdict::Rejected
        } else if metrics.is_none() {
            PhotoVerdict::Unchecked
        } else {
            PhotoVerdict::Accepted
        };

        Self {
            width,
            height,
            metrics,
            issues,
            verdict,
        }
    }

    /// Whether the quote form may be submitted with this photo
    pub fn allows_submission(&self) -> bool {
        self.verdict != PhotoVerdict::Rejected
    }

    /// Convert a rejection into an error carrying the issues
    pub fn into_result(self) -> Result<Self> {
        if self.allows_submission() {
            Ok(self)
        } else {
            Err(QuoteError::PhotoRejected {
                issues: self.issues,
            })
        }
    }
}

/// Runs the quality gate against a [`PhotoCheckConfig`]
#[derive(Debug, Clone, Default)]
pub struct PhotoChecker {
    config: PhotoCheckConfig,
}

impl PhotoChecker {
    pub fn new(config: PhotoCheckConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PhotoCheckConfig {
        &self.config
    }

    /// Check a photo from disk or memory
    ///
    /// # Errors
    ///
    /// Returns `QuoteError` only when the photo cannot be reached at all
    /// (missing file, unsupported format, unreadable header). Decode
    /// failures produce an `Unchecked` report instead.
    pub fn check(&self, source: &PhotoSource) -> Result<PhotoReport> {
        let (width, height) = probe_dimensions(source)?;
        debug!(source = %source.describe(), width, height, "photo header read");

        let mut issues = self.resolution_issues(width, height);

        let rgb = match decode_rgb(source) {
            Ok(rgb) => rgb,
            Err(e) => {
                warn!(
                    source = %source.describe(),
                    error = %e,
                    "photo pixels unreadable, skipping brightness and blur checks"
                );
                return Ok(PhotoReport::new(width, height, None, issues));
            }
        };

        let metrics = analyze_pixels(&rgb, &self.config);
        issues.extend(self.metric_issues(&metrics));

        let report = PhotoReport::new(width, height, Some(metrics), issues);
        info!(
            source = %source.describe(),
            brightness = metrics.brightness,
            sharpness = metrics.sharpness,
            verdict = ?report.verdict,
            "photo checked"
        );
        Ok(report)
    }

    /// Check an already-decoded image
    pub fn check_image(&self, image: &DynamicImage) -> PhotoReport {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut issues = self.resolution_issues(width, height);
        let metrics = analyze_pixels(&rgb, &self.config);
        issues.extend(self.metric_issues(&metrics));

        PhotoReport::new(width, height, Some(metrics), issues)
    }

    fn resolution_issues(&self, width: u32, height: u32) -> Vec<PhotoIssue> {
        if width < self.config.min_width || height < self.config.min_height {
            vec![PhotoIssue::LowResolution {
                width,
                height,
                min_width: self.config.min_width,
                min_height: self.config.min_height,
            }]
        } else {
            Vec::new()
        }
    }

    fn metric_issues(&self, metrics: &PhotoMetrics) -> Vec<PhotoIssue> {
        let mut issues = Vec::new();

        if metrics.brightness < self.config.min_brightness {
            issues.push(PhotoIssue::TooDark {
                brightness: metrics.brightness,
                minimum: self.config.min_brightness,
            });
        } else if metrics.brightness > self.config.max_brightness {
            issues.push(PhotoIssue::TooBright {
                brightness: metrics.brightness,
                maximum: self.config.max_brightness,
            });
        }

        if metrics.sharpness < self.config.min_sharpness {
            issues.push(PhotoIssue::Blurry {
                sharpness: metrics.sharpness,
                minimum: self.config.min_sharpness,
            });
        }

        issues
    }
}
