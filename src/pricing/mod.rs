//! Baseline price estimation
//!
//! Turns seat measurements and a fabric grade into a labor + fabric estimate.
//! The estimate is a baseline only; the final price is confirmed after the
//! photo is reviewed by hand.

pub mod fabric;
pub mod estimate;

pub use fabric::Fabric;
pub use estimate::{parse_dimension, Dimensions, Estimate, Estimator};
