//! Data models shared by the trend pipeline and the renderer
//!
//! Points come in through `chart`, everything in `range` and `trend` is
//! derived per render pass and never cached.

pub mod chart;
pub mod range;
pub mod trend;

pub use chart::{ChartDataset, Point};
pub use range::Range;
pub use trend::{PolynomialCoefficients, TrendSample};
