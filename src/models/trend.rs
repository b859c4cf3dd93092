//! Trend curve models

use serde::Serialize;

/// Polynomial coefficients, index `i` holds the coefficient of `x^i`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolynomialCoefficients(pub Vec<f64>);

impl PolynomialCoefficients {
    pub fn degree(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// One sample of the fitted trend curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendSample {
    pub x: f64,
    pub y: f64,
}
