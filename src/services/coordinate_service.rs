use serde::Serialize;

use crate::models::{Point, Range};

/// Position returned for every value on a zero-width axis
pub const DEGENERATE_POSITION: f64 = 0.5;

/// A point in normalized plot space: `x` grows to the right, `y` grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotPosition {
    pub x: f64,
    pub y: f64,
}

/// Map a domain value onto `[0, 1]` relative to `min..max`
///
/// Not clamped: a value outside the range maps outside `[0, 1]`, which is
/// expected for a highlighted point that is not part of the fitted set.
pub fn to_plot_position(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return DEGENERATE_POSITION;
    }
    (value - min) / (max - min)
}

/// Same as [`to_plot_position`], clamped into `[0, 1]`
pub fn to_plot_position_clamped(value: f64, min: f64, max: f64) -> f64 {
    to_plot_position(value, min, max).clamp(0.0, 1.0)
}

/// Inverse of [`to_plot_position`]; a zero-width range always yields `min`
pub fn from_plot_position(fraction: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return min;
    }
    min + fraction * (max - min)
}

/// Horizontal fraction for a mileage
pub fn mileage_to_x(mileage: f64, range: &Range) -> f64 {
    to_plot_position(mileage, range.min_mileage, range.max_mileage)
}

/// Vertical fraction for a price, measured from the top
pub fn price_to_y(price: f64, range: &Range) -> f64 {
    1.0 - to_plot_position(price, range.min_price, range.max_price)
}

/// Mileage at a horizontal fraction
pub fn x_to_mileage(x: f64, range: &Range) -> f64 {
    from_plot_position(x, range.min_mileage, range.max_mileage)
}

/// Price at a vertical fraction measured from the top
pub fn y_to_price(y: f64, range: &Range) -> f64 {
    from_plot_position(1.0 - y, range.min_price, range.max_price)
}

pub fn point_position(point: &Point, range: &Range) -> PlotPosition {
    PlotPosition {
        x: mileage_to_x(point.mileage, range),
        y: price_to_y(point.price, range),
    }
}

/// Scale a normalized position into a pixel rectangle
pub fn to_pixels(position: PlotPosition, width: u32, height: u32) -> (i32, i32) {
    (
        (position.x * width as f64).round() as i32,
        (position.y * height as f64).round() as i32,
    )
}
