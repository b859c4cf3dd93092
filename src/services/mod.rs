//! Range, coordinate and trend services plus the loader and renderer built on them

pub mod chart_model;
pub mod chart_service;
pub mod coordinate_service;
pub mod data_service;
pub mod range_service;

pub use chart_model::ChartDataModel;
pub use coordinate_service::{to_plot_position, PlotPosition};
pub use range_service::compute_range;
