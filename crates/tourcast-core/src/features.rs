//! The fixed-order feature representation consumed by the model.

use serde::Serialize;

/// Number of features the model and scaler were fitted on.
pub const FEATURE_COUNT: usize = 8;

/// Column order used at training time. Order is significant.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "country",
    "year",
    "tourism_receipts",
    "tourism_exports",
    "tourism_expenditures",
    "gdp",
    "inflation",
    "unemployment",
];

/// A single row of model input, in [`FEATURE_NAMES`] order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Looks up a feature by column name.
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| self.0[idx])
    }
}
