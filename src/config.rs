//! Configuration structures for quote pricing and the photo-quality gate.
//!
//! All tunable parameters live here, grouped by concern. Defaults come from
//! [`crate::constants`].
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use upholstery_quote::QuoteConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = QuoteConfig::from_json_file(Path::new("quote.json"))?;
//!
//! // Or use defaults
//! let config = QuoteConfig::default();
//! # Ok::<(), upholstery_quote::QuoteError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`PricingConfig`]: labor charge, fabric rates, yardage rules
//! - [`PhotoCheckConfig`]: resolution, brightness and sharpness thresholds

use crate::constants::{photo, pricing};
use crate::error::{QuoteError, Result};
use crate::pricing::Fabric;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete configuration for the quote workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QuoteConfig {
    /// Pricing rules
    pub pricing: PricingConfig,

    /// Photo-quality gate
    pub photo_check: PhotoCheckConfig,
}

/// Pricing parameters for the baseline estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Flat labor charge in dollars
    pub base_labor: u32,

    /// Dollars per yard for each fabric grade
    pub fabric_rates: FabricRates,

    /// Square inches per yard of fabric
    pub square_inches_per_yard: f64,

    /// Multiplier applied to the seat area for seams and waste
    pub waste_factor: f64,

    /// Smallest billable yardage
    pub min_yards: f64,
}

/// Fabric price per yard, by grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FabricRates {
    pub standard: u32,
    pub premium: u32,
}

impl FabricRates {
    /// Price per yard for a fabric grade
    pub fn rate(&self, fabric: Fabric) -> u32 {
        match fabric {
            Fabric::Standard => self.standard,
            Fabric::Premium => self.premium,
        }
    }
}

/// Photo-quality thresholds.
///
/// Brightness and sharpness are measured on a downsampled copy whose longest
/// side is `analysis_max_dimension`, so sharpness thresholds are tied to that
/// size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoCheckConfig {
    /// Minimum original width in pixels
    pub min_width: u32,

    /// Minimum original height in pixels
    pub min_height: u32,

    /// Longest side of the analysis buffer in pixels
    pub analysis_max_dimension: u32,

    /// Minimum mean luma (0-255)
    pub min_brightness: f32,

    /// Maximum mean luma (0-255)
    pub max_brightness: f32,

    /// Minimum mean Sobel gradient magnitude
    pub min_sharpness: f32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_labor: pricing::BASE_LABOR_USD,
            fabric_rates: FabricRates {
                standard: pricing::STANDARD_RATE_USD,
                premium: pricing::PREMIUM_RATE_USD,
            },
            square_inches_per_yard: pricing::SQUARE_INCHES_PER_YARD,
            waste_factor: pricing::WASTE_FACTOR,
            min_yards: pricing::MIN_YARDS,
        }
    }
}

impl Default for PhotoCheckConfig {
    fn default() -> Self {
        Self {
            min_width: photo::MIN_WIDTH,
            min_height: photo::MIN_HEIGHT,
            analysis_max_dimension: photo::ANALYSIS_MAX_DIMENSION,
            min_brightness: photo::MIN_BRIGHTNESS,
            max_brightness: photo::MAX_BRIGHTNESS,
            min_sharpness: photo::MIN_SHARPNESS,
        }
    }
}

impl PricingConfig {
    /// Reject values that would produce nonsensical estimates
    pub fn validate(&self) -> Result<()> {
        if !(self.square_inches_per_yard.is_finite() && self.square_inches_per_yard > 0.0) {
            return Err(invalid("pricing.square_inches_per_yard", self.square_inches_per_yard));
        }
        if !(self.waste_factor.is_finite() && self.waste_factor > 0.0) {
            return Err(invalid("pricing.waste_factor", self.waste_factor));
        }
        if !(self.min_yards.is_finite() && self.min_yards >= 0.0) {
            return Err(invalid("pricing.min_yards", self.min_yards));
        }
        Ok(())
    }
}

impl PhotoCheckConfig {
    /// Reject thresholds that can never pass or make analysis impossible
    pub fn validate(&self) -> Result<()> {
        // Sobel needs at least a 3x3 neighborhood
        if self.analysis_max_dimension < 3 {
            return Err(invalid(
                "photo_check.analysis_max_dimension",
                self.analysis_max_dimension,
            ));
        }
        if self.min_brightness.is_nan()
            || self.max_brightness.is_nan()
            || self.min_brightness >= self.max_brightness
        {
            return Err(invalid(
                "photo_check.min_brightness",
                format!("{} (max {})", self.min_brightness, self.max_brightness),
            ));
        }
        if !(self.min_sharpness.is_finite() && self.min_sharpness >= 0.0) {
            return Err(invalid("photo_check.min_sharpness", self.min_sharpness));
        }
        Ok(())
    }
}

fn invalid(parameter: &str, value: impl ToString) -> QuoteError {
    QuoteError::InvalidParameter {
        parameter: parameter.to_string(),
        value: value.to_string(),
    }
}

impl QuoteConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.pricing.validate()?;
        self.photo_check.validate()
    }

    /// Load and validate configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            QuoteError::config(format!("Failed to read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            QuoteError::config(format!("Failed to parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| {
            QuoteError::config(format!("Failed to write {}", path.display()), e)
        })?;
        Ok(())
    }
}
