use tracing::debug;

use crate::models::{Point, Range};
use crate::utils::ChartError;

/// Fraction of the mileage span added on each side of the axis
pub const MILEAGE_PADDING: f64 = 0.15;
/// Fraction of the highest price added above it
pub const PRICE_HEADROOM: f64 = 0.15;
/// Price axis maximum is rounded up to a multiple of this
pub const PRICE_STEP: f64 = 10_000_000.0;

/// Derive axis bounds from a point set
///
/// Mileage bounds are padded by 15% of the span on both ends (never below
/// zero). The price axis starts at 0 and ends at the highest price plus 15%,
/// rounded up to the next multiple of [`PRICE_STEP`]. A single point or a set
/// of identical mileages gives `min_mileage == max_mileage`.
pub fn compute_range(points: &[Point]) -> Result<Range, ChartError> {
    if points.is_empty() {
        return Err(ChartError::EmptyDataset);
    }

    let min_mileage = points.iter().map(|p| p.mileage).fold(f64::INFINITY, f64::min);
    let max_mileage = points.iter().map(|p| p.mileage).fold(f64::NEG_INFINITY, f64::max);
    let max_price_raw = points.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);

    let span = max_mileage - min_mileage;
    let padding = span * MILEAGE_PADDING;

    let range = Range {
        min_mileage: (min_mileage - padding).max(0.0),
        max_mileage: max_mileage + padding,
        min_price: 0.0,
        max_price: round_up_to_step(max_price_raw + max_price_raw * PRICE_HEADROOM),
    };

    debug!(
        "Range over {} points: mileage {}..{}, price {}..{}",
        points.len(),
        range.min_mileage,
        range.max_mileage,
        range.min_price,
        range.max_price
    );

    Ok(range)
}

fn round_up_to_step(value: f64) -> f64 {
    (value / PRICE_STEP).ceil() * PRICE_STEP
}
