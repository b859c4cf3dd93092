//! Mileage-to-price chart: trend fitting, axis ranges and plot coordinates
//!
//! The numeric core lives in [`math`] and [`services`]; it is pure and
//! deterministic. [`services::chart_service`] draws the result with plotters.

pub mod config;
pub mod math;
pub mod models;
pub mod services;
pub mod utils;

pub use models::{ChartDataset, Point, PolynomialCoefficients, Range, TrendSample};
pub use services::ChartDataModel;
pub use utils::ChartError;
