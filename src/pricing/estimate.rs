//! Labor + fabric estimate from seat measurements

use crate::config::PricingConfig;
use crate::error::{QuoteError, Result};
use crate::pricing::Fabric;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Seat measurements in inches. `None` means missing or unusable input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub width: Option<f64>,
    pub depth: Option<f64>,
}

impl Dimensions {
    pub fn new(width: f64, depth: f64) -> Self {
        Self {
            width: Some(width).filter(|w| w.is_finite() && *w > 0.0),
            depth: Some(depth).filter(|d| d.is_finite() && *d > 0.0),
        }
    }

    /// Parse raw form text for both measurements
    pub fn from_text(width: &str, depth: &str) -> Self {
        Self {
            width: parse_dimension(width),
            depth: parse_dimension(depth),
        }
    }

    /// Seat area in square inches when both measurements are present
    pub fn area(&self) -> Option<f64> {
        Some(self.width? * self.depth?)
    }
}

/// Parse a measurement field.
///
/// Empty, non-numeric, non-finite and non-positive values all yield `None`.
pub fn parse_dimension(text: &str) -> Option<f64> {
    let value: f64 = text.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Baseline price estimate in whole dollars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub labor: u32,
    pub fabric_cost: u32,
    pub total: u32,
    /// Fabric yardage; zero when measurements are missing
    pub yards: f64,
    pub fabric: Fabric,
}

impl Estimate {
    /// Yardage with two decimals, as shown to the customer.
    ///
    /// A labor-only estimate shows `0.00`.
    pub fn yards_display(&self) -> String {
        format!("{:.2}", self.yards)
    }

    /// Customer-facing summary of the estimate
    pub fn summary(&self) -> String {
        format!(
            "Baseline estimate: ${}\nLabor ${} + Fabric ~${} ({} yd, {})\nFinal price confirmed after manual review of your photo.",
            self.total,
            self.labor,
            self.fabric_cost,
            self.yards_display(),
            self.fabric
        )
    }
}

/// Computes estimates from a [`PricingConfig`]
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    config: PricingConfig,
}

impl Estimator {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Estimate labor and fabric cost.
    ///
    /// Without both measurements the estimate is labor only.
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::InvalidParameter` for `"dimensions"` when the
    /// yardage is not finite or the price does not fit in whole dollars.
    pub fn estimate(&self, dimensions: Dimensions, fabric: Fabric) -> Result<Estimate> {
        let labor = self.config.base_labor;

        let Some(area) = dimensions.area() else {
            debug!(fabric = %fabric, "measurements missing, labor-only estimate");
            return Ok(Estimate {
                labor,
                fabric_cost: 0,
                total: labor,
                yards: 0.0,
                fabric,
            });
        };

        let yards = (area / self.config.square_inches_per_yard * self.config.waste_factor)
            .max(self.config.min_yards);
        let rate = self.config.fabric_rates.rate(fabric) as f64;
        let out_of_range = || QuoteError::InvalidParameter {
            parameter: "dimensions".to_string(),
            value: format!("{:?} x {:?}", dimensions.width, dimensions.depth),
        };

        if !yards.is_finite() {
            return Err(out_of_range());
        }
        let fabric_cost = round_half_up(yards * rate).ok_or_else(out_of_range)?;
        let total = labor.checked_add(fabric_cost).ok_or_else(out_of_range)?;

        debug!(area, yards, fabric = %fabric, fabric_cost, "estimate computed");

        Ok(Estimate {
            labor,
            fabric_cost,
            total,
            yards,
            fabric,
        })
    }

    /// Estimate straight from raw form text
    pub fn estimate_from_text(&self, width: &str, depth: &str, fabric: &str) -> Result<Estimate> {
        let fabric = Fabric::from_form_value(fabric)?;
        self.estimate(Dimensions::from_text(width, depth), fabric)
    }
}

/// Round to whole dollars; `None` when the amount does not fit in `u32`
fn round_half_up(value: f64) -> Option<u32> {
    let rounded = (value + 0.5).floor().max(0.0);
    (rounded <= u32::MAX as f64).then_some(rounded as u32)
}
