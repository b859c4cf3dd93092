//! Chart input models

use serde::{Deserialize, Serialize};

use crate::utils::ChartError;

/// A single (mileage, price) observation on the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub mileage: f64,
    pub price: f64,
}

impl Point {
    pub fn new(mileage: f64, price: f64) -> Self {
        Point { mileage, price }
    }

    /// Both fields finite and non-negative
    pub fn is_valid(&self) -> bool {
        self.mileage.is_finite() && self.price.is_finite() && self.mileage >= 0.0 && self.price >= 0.0
    }

    pub(crate) fn validate(&self, index: usize) -> Result<(), ChartError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ChartError::InvalidPoint {
                index,
                mileage: self.mileage,
                price: self.price,
            })
        }
    }
}

/// The JSON document consumed by the loader
///
/// ```json
/// { "pricePoints": [{ "mileage": 12000, "price": 1850000 }],
///   "currentPoint": { "mileage": 12000, "price": 1850000 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub price_points: Vec<Point>,
    pub current_point: Point,
}
