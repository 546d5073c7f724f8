//! Pricing rules and photo-quality thresholds
//!
//! Compile-time defaults. [`crate::config::QuoteConfig::default`] is built
//! from these values; a JSON config file can override any of them.

/// Baseline pricing rules
pub mod pricing {
    /// Flat labor charge in dollars applied to every quote
    pub const BASE_LABOR_USD: u32 = 30;

    /// Standard fabric price in dollars per yard
    pub const STANDARD_RATE_USD: u32 = 18;

    /// Premium fabric price in dollars per yard
    pub const PREMIUM_RATE_USD: u32 = 28;

    /// Square inches in one square yard (36 x 36)
    pub const SQUARE_INCHES_PER_YARD: f64 = 1296.0;

    /// Extra fabric for seams, tucks and pattern matching
    pub const WASTE_FACTOR: f64 = 1.25;

    /// Smallest fabric order in yards
    pub const MIN_YARDS: f64 = 0.4;
}

/// Photo-quality gate thresholds
pub mod photo {
    /// Minimum original width in pixels
    pub const MIN_WIDTH: u32 = 600;

    /// Minimum original height in pixels
    pub const MIN_HEIGHT: u32 = 400;

    /// Longest side of the downsampled analysis buffer
    pub const ANALYSIS_MAX_DIMENSION: u32 = 256;

    /// Mean luma below this is too dark (0-255 scale)
    pub const MIN_BRIGHTNESS: f32 = 50.0;

    /// Mean luma above this is washed out (0-255 scale)
    pub const MAX_BRIGHTNESS: f32 = 215.0;

    /// Mean Sobel magnitude below this is treated as blurry
    pub const MIN_SHARPNESS: f32 = 12.0;
}

/// Rec. 601 luma weights
pub mod luma {
    pub const RED: f32 = 0.299;
    pub const GREEN: f32 = 0.587;
    pub const BLUE: f32 = 0.114;
}
