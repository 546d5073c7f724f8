//! Integration tests for the quote workflow
//!
//! These tests exercise the public API end to end:
//! - Photo loading from disk and memory
//! - The quality gate on synthetic photos
//! - Estimate, approval and submission through `QuoteForm`
//! - Config files driving the checker
//!
//! Synthetic photos are generated with the `image` crate into a temporary
//! directory so no binary assets are needed.

use chrono::Utc;
use image::{Rgb, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use upholstery_quote::{
    check_photo, Estimator, PhotoChecker, PhotoIssue, PhotoSource, PhotoVerdict, QuoteConfig,
    QuoteError, QuoteFields, QuoteForm, SubmissionDecision,
};

fn checkerboard(width: u32, height: u32, cell: u32, light: u8, dark: u8) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgb([light, light, light])
        } else {
            Rgb([dark, dark, dark])
        }
    })
}

fn save_png(dir: &TempDir, name: &str, img: &RgbImage) -> PathBuf {
    let path = dir.path().join(name);
    img.save(&path).unwrap();
    path
}

fn png_bytes(img: &RgbImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn test_check_photo_file_not_found() {
    let result = check_photo(Path::new("nonexistent_file.jpg"));

    match result {
        Err(QuoteError::ImageLoadError { .. }) => {}
        other => panic!("Expected ImageLoadError, got: {:?}", other),
    }
}

#[test]
fn test_check_photo_unsupported_extension() {
    let result = check_photo(Path::new("sofa.heic"));
    assert!(matches!(result, Err(QuoteError::UnsupportedFormat { .. })));
}

#[test]
fn test_check_photo_empty_path() {
    assert!(check_photo(Path::new("")).is_err());
}

// ============================================================================
// Quality Gate Tests
// ============================================================================

#[test]
fn test_sharp_photo_accepted_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = save_png(&dir, "sofa.png", &checkerboard(1024, 768, 32, 210, 50));

    let report = check_photo(&path).unwrap();

    assert_eq!(report.verdict, PhotoVerdict::Accepted, "issues: {:?}", report.issues);
    assert_eq!((report.width, report.height), (1024, 768));
    let metrics = report.metrics.unwrap();
    assert_eq!((metrics.analyzed_width, metrics.analyzed_height), (256, 192));
    assert!(metrics.brightness > 100.0 && metrics.brightness < 160.0);
}

#[test]
fn test_low_resolution_photo_rejected() {
    let dir = TempDir::new().unwrap();
    let path = save_png(&dir, "thumb.png", &checkerboard(300, 200, 10, 210, 50));

    let report = check_photo(&path).unwrap();

    assert_eq!(report.verdict, PhotoVerdict::Rejected);
    assert!(report
        .issues
        .iter()
        .any(|i| matches!(i, PhotoIssue::LowResolution { .. })));
}

#[test]
fn test_smooth_gradient_is_blurry() {
    // A ramp across the whole frame has no edges worth the name
    let img = RgbImage::from_fn(800, 600, |x, _| {
        let v = 60 + (x * 120 / 800) as u8;
        Rgb([v, v, v])
    });
    let report = PhotoChecker::default()
        .check(&PhotoSource::Bytes(png_bytes(&img)))
        .unwrap();

    assert_eq!(report.verdict, PhotoVerdict::Rejected);
    assert!(report
        .issues
        .iter()
        .any(|i| matches!(i, PhotoIssue::Blurry { .. })));
}

#[test]
fn test_undecodable_pixels_leave_photo_unchecked() {
    let mut bytes = png_bytes(&checkerboard(900, 700, 30, 210, 50));
    let idat = bytes.windows(4).position(|w| w == b"IDAT").unwrap();
    bytes.truncate(idat + 6);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.png");
    std::fs::write(&path, &bytes).unwrap();

    let report = check_photo(&path).unwrap();

    assert_eq!(report.verdict, PhotoVerdict::Unchecked);
    assert!(report.metrics.is_none());
    assert!(report.allows_submission());
    assert_eq!((report.width, report.height), (900, 700));
}

#[test]
fn test_undecodable_small_photo_still_rejected() {
    let mut bytes = png_bytes(&checkerboard(200, 150, 10, 210, 50));
    let idat = bytes.windows(4).position(|w| w == b"IDAT").unwrap();
    bytes.truncate(idat + 6);

    let report = PhotoChecker::default()
        .check(&PhotoSource::Bytes(bytes))
        .unwrap();

    assert_eq!(report.verdict, PhotoVerdict::Rejected);
    assert!(report.metrics.is_none());
}

#[test]
fn test_config_file_drives_thresholds() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("quote.json");

    let mut config = QuoteConfig::default();
    config.photo_check.min_width = 200;
    config.photo_check.min_height = 100;
    config.to_json_file(&config_path).unwrap();

    let loaded = QuoteConfig::from_json_file(&config_path).unwrap();
    let checker = PhotoChecker::new(loaded.photo_check);
    let path = save_png(&dir, "thumb.png", &checkerboard(300, 200, 10, 210, 50));

    let report = checker.check(&PhotoSource::from(path.as_path())).unwrap();
    assert_eq!(report.verdict, PhotoVerdict::Accepted, "issues: {:?}", report.issues);
}

// ============================================================================
// Workflow Tests
// ============================================================================

#[test]
fn test_full_quote_workflow() {
    let dir = TempDir::new().unwrap();
    let photo = save_png(&dir, "loveseat.png", &checkerboard(1200, 900, 40, 200, 60));

    let mut form = QuoteForm::new(QuoteFields {
        photo_url: "https://photos.example.com/loveseat.png".into(),
        width: "58".into(),
        depth: "32".into(),
        fabric: "standard".into(),
        email: "owner@example.com".into(),
        ..QuoteFields::default()
    });

    let estimate = form.request_estimate(&Estimator::default()).unwrap().clone();
    // 58 * 32 / 1296 * 1.25 = 1.79 yd -> $32 fabric
    assert_eq!(estimate.yards_display(), "1.79");
    assert_eq!(estimate.fabric_cost, 32);
    assert_eq!(estimate.total, 62);

    form.set_price_approval(true).unwrap();
    form.attach_photo_report(check_photo(&photo).unwrap());

    let payload = match form.prepare_submission(None, Utc::now()).unwrap() {
        SubmissionDecision::Ready(payload) => payload,
        SubmissionDecision::Dropped => panic!("legitimate request dropped"),
    };

    let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
    assert_eq!(json["fabric"], "standard");
    assert_eq!(json["priceApproved"], true);
    assert_eq!(json["bookingCompleted"], false);
    assert_eq!(json["photoCheck"]["verdict"], "accepted");
    assert!(json["estimateText"]
        .as_str()
        .unwrap()
        .starts_with("Baseline estimate: $62"));
}

#[test]
fn test_rejected_photo_blocks_submission() {
    let dir = TempDir::new().unwrap();
    let dark = save_png(&dir, "dark.png", &checkerboard(1200, 900, 40, 30, 5));

    let mut form = QuoteForm::new(QuoteFields {
        photo_url: "https://photos.example.com/dark.png".into(),
        width: "20".into(),
        depth: "20".into(),
        phone: "555-0199".into(),
        ..QuoteFields::default()
    });
    form.request_estimate(&Estimator::default()).unwrap();
    form.set_price_approval(true).unwrap();
    form.attach_photo_report(check_photo(&dark).unwrap());

    let err = form.prepare_submission(None, Utc::now()).unwrap_err();
    assert!(err.is_recoverable());
    assert!(err.user_message().contains("better light"));
}
