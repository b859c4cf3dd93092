use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{debug, info, warn};

use crate::config::ChartConfig;
use crate::models::Range;
use crate::services::chart_model::ChartDataModel;
use crate::services::coordinate_service;
use crate::services::range_service::PRICE_STEP;
use crate::utils::{ChartError, RenderError};

/// What ended up on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub output_path: String,
    pub points_drawn: usize,
    pub trend_drawn: bool,
    pub current_point_drawn: bool,
    /// Stored point drawn as the current point, `None` when it lies outside the set
    pub highlighted_index: Option<usize>,
}

/// Widen zero-width axes so plotters can still lay them out
///
/// A single mileage ends up in the middle of the axis, matching the midpoint
/// the coordinate mapper reports for a degenerate range.
fn drawable_range(range: &Range) -> Range {
    let mut drawable = *range;
    if drawable.is_degenerate() {
        let half = (drawable.min_mileage * 0.1).max(1.0);
        drawable.min_mileage -= half;
        drawable.max_mileage += half;
    }
    if drawable.max_price <= drawable.min_price {
        drawable.max_price = drawable.min_price + PRICE_STEP;
    }
    drawable
}

/// Render the model to a PNG at `config.output_path`
///
/// An empty dataset produces a captioned blank canvas; a trend that cannot be
/// fitted is left out and the points are still drawn.
pub fn render_chart(model: &ChartDataModel, config: &ChartConfig) -> Result<RenderSummary, RenderError> {
    let backend = BitMapBackend::new(&config.output_path, (config.width, config.height));
    let root = backend.into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| RenderError::Drawing(format!("Failed to fill canvas: {}", e)))?;

    let range = match model.range() {
        Ok(range) => range,
        Err(ChartError::EmptyDataset) => {
            warn!("No price points to plot, drawing placeholder");
            let centered = TextStyle::from(("sans-serif", 24.0).into_font())
                .pos(Pos::new(HPos::Center, VPos::Center));
            root.draw(&Text::new(
                "No price data available",
                ((config.width / 2) as i32, (config.height / 2) as i32),
                centered,
            ))
            .map_err(|e| RenderError::Drawing(format!("Failed to draw placeholder: {}", e)))?;
            root.present()
                .map_err(|e| RenderError::Drawing(format!("Failed to render chart: {}", e)))?;
            return Ok(RenderSummary {
                output_path: config.output_path.clone(),
                points_drawn: 0,
                trend_drawn: false,
                current_point_drawn: false,
                highlighted_index: None,
            });
        }
        Err(e) => return Err(RenderError::Drawing(e.to_string())),
    };
    let axes = drawable_range(&range);

    let mileage_label = |v: &f64| config.formats.mileage.format(*v);
    let price_label = |v: &f64| config.formats.price.format(*v);

    let mut chart = ChartBuilder::on(&root)
        .caption("Price by Mileage", ("sans-serif", 32.0).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(axes.min_mileage..axes.max_mileage, axes.min_price..axes.max_price)
        .map_err(|e| RenderError::Drawing(format!("Failed to build chart: {}", e)))?;

    chart
        .configure_mesh()
        .x_desc("Mileage")
        .y_desc("Price")
        .x_label_formatter(&mileage_label)
        .y_label_formatter(&price_label)
        .draw()
        .map_err(|e| RenderError::Drawing(format!("Failed to draw mesh: {}", e)))?;

    let points = model.points();
    let highlighted_index = model.highlight_index();
    chart
        .draw_series(
            points
                .iter()
                .enumerate()
                .filter(|(i, _)| Some(*i) != highlighted_index)
                .map(|(_, p)| Circle::new((p.mileage, p.price), 3, BLUE.filled())),
        )
        .map_err(|e| RenderError::Drawing(format!("Failed to draw points: {}", e)))?;

    let trend_drawn = match model.trend(config.trend_samples) {
        Ok(samples) => {
            chart
                .draw_series(LineSeries::new(
                    samples.iter().map(|s| (s.x, s.y)),
                    RED.stroke_width(2),
                ))
                .map_err(|e| RenderError::Drawing(format!("Failed to draw trend: {}", e)))?;
            true
        }
        Err(e) => {
            warn!("Trend curve omitted: {}", e);
            false
        }
    };

    let current_point_drawn = match model.current_point() {
        Some(current) => {
            // A matched point is drawn filled in place of its blue dot; a
            // current point outside the set gets a hollow marker
            let style = match highlighted_index {
                Some(_) => GREEN.filled(),
                None => GREEN.stroke_width(2),
            };
            chart
                .draw_series(std::iter::once(Circle::new(
                    (current.mileage, current.price),
                    7,
                    style,
                )))
                .map_err(|e| RenderError::Drawing(format!("Failed to draw current point: {}", e)))?;

            // Label placement goes through the normalized plot coordinates
            let (x_px, y_px) = chart.plotting_area().get_pixel_range();
            let position = coordinate_service::point_position(&current, &axes);
            let (dx, dy) = coordinate_service::to_pixels(
                position,
                (x_px.end - x_px.start) as u32,
                (y_px.end - y_px.start) as u32,
            );
            let label = format!(
                "{} / {}",
                config.formats.tooltip.format(current.mileage),
                config.formats.tooltip.format(current.price)
            );
            debug!("Current point label at plot fraction {:?}", position);

            root.draw(&Text::new(
                label,
                (x_px.start + dx + 10, y_px.start + dy - 20),
                ("sans-serif", 16.0).into_font(),
            ))
            .map_err(|e| RenderError::Drawing(format!("Failed to draw label: {}", e)))?;
            true
        }
        None => false,
    };

    root.present()
        .map_err(|e| RenderError::Drawing(format!("Failed to render chart: {}", e)))?;

    info!(
        "Chart written to {} ({} points, trend: {})",
        config.output_path,
        points.len(),
        trend_drawn
    );

    Ok(RenderSummary {
        output_path: config.output_path.clone(),
        points_drawn: points.len(),
        trend_drawn,
        current_point_drawn,
        highlighted_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;

    fn config_for(name: &str) -> ChartConfig {
        let output = std::env::temp_dir().join(format!(
            "mileage_chart_{}_{}.png",
            name,
            std::process::id()
        ));
        let mut config = ChartConfig::from_lookup(|_| None).expect("config failed");
        config.output_path = output.to_string_lossy().into_owned();
        config.width = 400;
        config.height = 300;
        config
    }

    fn render(name: &str, model: &ChartDataModel) -> RenderSummary {
        let config = config_for(name);
        let summary = render_chart(model, &config).expect("render failed");
        assert!(std::path::Path::new(&summary.output_path).exists());
        let _ = std::fs::remove_file(&summary.output_path);
        summary
    }

    #[test]
    fn test_render_empty_dataset_placeholder() {
        let summary = render("empty", &ChartDataModel::new());
        assert_eq!(summary.points_drawn, 0);
        assert!(!summary.trend_drawn);
        assert!(!summary.current_point_drawn);
        assert_eq!(summary.highlighted_index, None);
    }

    #[test]
    fn test_render_single_point_omits_trend() {
        let mut model = ChartDataModel::new();
        let point = Point::new(10.0, 1_000_000.0);
        model.load(vec![point], point).unwrap();

        let summary = render("single", &model);
        assert_eq!(summary.points_drawn, 1);
        assert!(!summary.trend_drawn);
        assert!(summary.current_point_drawn);
        assert_eq!(summary.highlighted_index, Some(0));
    }

    #[test]
    fn test_render_all_zero_prices() {
        let mut model = ChartDataModel::new();
        let points = vec![
            Point::new(1_000.0, 0.0),
            Point::new(2_000.0, 0.0),
            Point::new(3_000.0, 0.0),
        ];
        model.load(points, Point::new(2_000.0, 0.0)).unwrap();

        let summary = render("zero_prices", &model);
        assert_eq!(summary.points_drawn, 3);
        assert!(summary.trend_drawn);
        assert_eq!(summary.highlighted_index, Some(1));
    }

    #[test]
    fn test_render_current_point_outside_set() {
        let mut model = ChartDataModel::new();
        let points = vec![
            Point::new(20_000.0, 1_900_000.0),
            Point::new(60_000.0, 1_600_000.0),
            Point::new(110_000.0, 1_250_000.0),
            Point::new(150_000.0, 1_100_000.0),
        ];
        model.load(points, Point::new(80_000.0, 1_500_000.0)).unwrap();

        let summary = render("outside", &model);
        assert_eq!(summary.points_drawn, 4);
        assert!(summary.trend_drawn);
        assert!(summary.current_point_drawn);
        assert_eq!(summary.highlighted_index, None);
    }

    #[test]
    fn test_drawable_range_widens_degenerate_axes() {
        let range = Range {
            min_mileage: 50.0,
            max_mileage: 50.0,
            min_price: 0.0,
            max_price: 0.0,
        };

        let drawable = drawable_range(&range);
        assert_eq!(drawable.min_mileage, 45.0);
        assert_eq!(drawable.max_mileage, 55.0);
        assert_eq!(drawable.max_price, PRICE_STEP);
        assert_eq!(coordinate_service::mileage_to_x(50.0, &drawable), 0.5);
    }

    #[test]
    fn test_drawable_range_keeps_normal_axes() {
        let range = Range {
            min_mileage: 0.0,
            max_mileage: 150_000.0,
            min_price: 0.0,
            max_price: 20_000_000.0,
        };
        assert_eq!(drawable_range(&range), range);
    }
}
