//! Axis range model

use serde::Serialize;

/// Axis bounds derived from a point set
///
/// `min_price` is always 0 and `max_price` is always a multiple of the price
/// step, so gridlines land on round numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub min_mileage: f64,
    pub max_mileage: f64,
    pub min_price: f64,
    pub max_price: f64,
}

impl Range {
    /// Zero-width mileage axis (single point or identical mileages)
    pub fn is_degenerate(&self) -> bool {
        self.max_mileage == self.min_mileage
    }
}
