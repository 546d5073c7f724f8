//! # Upholstery Quote
//!
//! A Rust crate for furniture-upholstery quote requests.
//!
//! This library provides:
//! - Baseline labor + fabric price estimates from seat measurements
//! - An automated photo-quality gate (resolution, brightness, blur)
//! - Quote form workflow state and the relay submission payload
//! - Interpretation of the relay's reply
//!
//! ## Example
//!
//! ```rust,no_run
//! use upholstery_quote::{check_photo, estimate_quote};
//! use std::path::Path;
//!
//! let estimate = estimate_quote("72", "36", "premium")?;
//! println!("{}", estimate.summary());
//!
//! let report = check_photo(Path::new("sofa.jpg"))?;
//! println!("verdict: {:?}, issues: {:?}", report.verdict, report.issues);
//! # Ok::<(), upholstery_quote::QuoteError>(())
//! ```

use std::path::Path;

pub mod error;
pub mod constants;
pub mod config;
pub mod image_loader;
pub mod pricing;
pub mod photo;
pub mod quote;

pub use config::{PhotoCheckConfig, PricingConfig, QuoteConfig};
pub use error::{QuoteError, Result};
pub use image_loader::PhotoSource;
pub use photo::{PhotoChecker, PhotoIssue, PhotoReport, PhotoVerdict};
pub use pricing::{Dimensions, Estimate, Estimator, Fabric};
pub use quote::{QuoteFields, QuoteForm, RelayOutcome, SubmissionDecision, SubmissionPayload};

/// Estimate a quote from raw form text using the default pricing rules
///
/// # Arguments
///
/// * `width` - Seat width in inches, as typed
/// * `depth` - Seat depth in inches, as typed
/// * `fabric` - `"standard"`, `"premium"`, or empty for standard
///
/// # Errors
///
/// Returns `QuoteError::InvalidParameter` for an unknown fabric grade.
/// Missing or unusable measurements are not an error; they give a
/// labor-only estimate.
pub fn estimate_quote(width: &str, depth: &str, fabric: &str) -> Result<Estimate> {
    Estimator::default().estimate_from_text(width, depth, fabric)
}

/// Run the photo-quality gate on an image file with default thresholds
///
/// # Errors
///
/// Returns `QuoteError` if:
/// - The file does not exist or cannot be opened
/// - The extension is not a supported image format
/// - The image header cannot be read
///
/// A photo whose pixels cannot be decoded yields an `Unchecked` report, not
/// an error.
pub fn check_photo(image_path: &Path) -> Result<PhotoReport> {
    PhotoChecker::default().check(&PhotoSource::from(image_path))
}
