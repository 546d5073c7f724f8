//! Automated photo-quality check
//!
//! This module measures resolution, brightness and blur on a customer photo
//! and decides whether the quote request may be submitted with it.

pub mod metrics;
pub mod quality;

pub use metrics::{analyze_pixels, LumaPlane, PhotoMetrics};
pub use quality::{PhotoChecker, PhotoIssue, PhotoReport, PhotoVerdict};
