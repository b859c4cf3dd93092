use tracing::{debug, info};

use crate::math::{self, TREND_DEGREE};
use crate::models::{ChartDataset, Point, PolynomialCoefficients, Range, TrendSample};
use crate::services::{coordinate_service, range_service};
use crate::utils::ChartError;

/// Holds the loaded point set and the highlighted point
///
/// Range and trend are recomputed on every query from the stored points, so
/// repeated queries without an intervening `load` return identical values.
#[derive(Debug, Clone, Default)]
pub struct ChartDataModel {
    points: Vec<Point>,
    current_point: Option<Point>,
    highlight_index: Option<usize>,
}

impl ChartDataModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dataset(dataset: ChartDataset) -> Result<Self, ChartError> {
        let mut model = Self::new();
        model.load(dataset.price_points, dataset.current_point)?;
        Ok(model)
    }

    /// Replace the point set and the current point
    ///
    /// Everything is validated before anything is stored: on error the model
    /// keeps its previous contents.
    pub fn load(&mut self, points: Vec<Point>, current_point: Point) -> Result<(), ChartError> {
        for (index, point) in points.iter().enumerate() {
            point.validate(index)?;
        }
        current_point.validate(points.len())?;

        let highlight_index = points.iter().position(|p| *p == current_point);
        if highlight_index.is_none() {
            debug!("Current point {:?} is not part of the point set", current_point);
        }

        info!("Loaded {} price points", points.len());
        self.points = points;
        self.current_point = Some(current_point);
        self.highlight_index = highlight_index;
        Ok(())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn current_point(&self) -> Option<Point> {
        self.current_point
    }

    /// Index of the first stored point whose mileage and price both equal the
    /// current point exactly, fixed at load time
    pub fn highlight_index(&self) -> Option<usize> {
        self.highlight_index
    }

    pub fn range(&self) -> Result<Range, ChartError> {
        range_service::compute_range(&self.points)
    }

    pub fn coefficients(&self) -> Result<PolynomialCoefficients, ChartError> {
        math::fit(&self.points, TREND_DEGREE)
    }

    /// `sample_count` evenly spaced samples of the fitted curve across the mileage axis
    pub fn trend(&self, sample_count: usize) -> Result<Vec<TrendSample>, ChartError> {
        let range = self.range()?;
        let coefficients = self.coefficients()?;

        let last = sample_count.saturating_sub(1).max(1) as f64;
        let samples = (0..sample_count)
            .map(|i| {
                let x = coordinate_service::x_to_mileage(i as f64 / last, &range);
                TrendSample {
                    x,
                    y: math::evaluate(&coefficients, x),
                }
            })
            .collect();

        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<Point> {
        vec![
            Point::new(15_000.0, 2_100_000.0),
            Point::new(42_000.0, 1_850_000.0),
            Point::new(68_000.0, 1_600_000.0),
            Point::new(95_000.0, 1_450_000.0),
            Point::new(130_000.0, 1_200_000.0),
        ]
    }

    #[test]
    fn test_load_and_highlight() {
        let mut model = ChartDataModel::new();
        model
            .load(sample_points(), Point::new(68_000.0, 1_600_000.0))
            .expect("load failed");

        assert_eq!(model.points().len(), 5);
        assert_eq!(model.highlight_index(), Some(2));

        // Matching is exact on both fields
        model
            .load(sample_points(), Point::new(68_000.0, 1_600_000.01))
            .expect("load failed");
        assert_eq!(model.highlight_index(), None);
    }

    #[test]
    fn test_current_point_outside_set() {
        let mut model = ChartDataModel::new();
        model
            .load(sample_points(), Point::new(200_000.0, 900_000.0))
            .expect("load failed");

        assert_eq!(model.highlight_index(), None);
        let range = model.range().unwrap();
        let x = coordinate_service::mileage_to_x(200_000.0, &range);
        assert!(x > 1.0);
    }

    #[test]
    fn test_failed_load_keeps_previous_state() {
        let mut model = ChartDataModel::new();
        let current = Point::new(42_000.0, 1_850_000.0);
        model.load(sample_points(), current).expect("load failed");

        let mut bad = sample_points();
        bad.push(Point::new(f64::NAN, 1.0));
        let err = model.load(bad, Point::new(1.0, 1.0)).unwrap_err();
        assert!(matches!(err, ChartError::InvalidPoint { index: 5, .. }));

        let err = model.load(vec![], Point::new(-1.0, 1.0)).unwrap_err();
        assert!(matches!(err, ChartError::InvalidPoint { index: 0, .. }));

        assert_eq!(model.points(), sample_points().as_slice());
        assert_eq!(model.current_point(), Some(current));
        assert_eq!(model.highlight_index(), Some(1));
    }

    #[test]
    fn test_trend_spans_range() {
        let mut model = ChartDataModel::new();
        model.load(sample_points(), Point::new(1.0, 1.0)).unwrap();

        let range = model.range().unwrap();
        let trend = model.trend(50).expect("trend failed");
        assert_eq!(trend.len(), 50);
        assert_eq!(trend[0].x, range.min_mileage);
        assert_eq!(trend[49].x, range.max_mileage);
        assert!(trend.windows(2).all(|w| w[0].x < w[1].x));
        assert!(trend.iter().all(|s| s.y.is_finite()));

        // The fitted curve passes close to the data it was fitted on
        let coefficients = model.coefficients().unwrap();
        for point in model.points() {
            let fitted = math::evaluate(&coefficients, point.mileage);
            assert!((fitted - point.price).abs() / point.price < 0.05);
        }
    }

    #[test]
    fn test_queries_are_idempotent() {
        let mut model = ChartDataModel::new();
        model.load(sample_points(), Point::new(95_000.0, 1_450_000.0)).unwrap();

        assert_eq!(model.range(), model.range());
        let first = model.trend(30).unwrap();
        let second = model.trend(30).unwrap();
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        let model = ChartDataModel::new();
        assert_eq!(model.range(), Err(ChartError::EmptyDataset));
        assert_eq!(model.trend(10), Err(ChartError::EmptyDataset));

        let mut model = ChartDataModel::new();
        model.load(vec![Point::new(10.0, 1_000_000.0)], Point::new(10.0, 1_000_000.0)).unwrap();
        let range = model.range().unwrap();
        assert_eq!(range.min_mileage, 10.0);
        assert_eq!(range.max_mileage, 10.0);
        assert_eq!(coordinate_service::mileage_to_x(123.0, &range), 0.5);
        assert!(model.trend(10).unwrap_err().is_singular());
    }

    #[test]
    fn test_small_sample_counts() {
        let mut model = ChartDataModel::new();
        model.load(sample_points(), Point::new(1.0, 1.0)).unwrap();

        assert!(model.trend(0).unwrap().is_empty());
        let single = model.trend(1).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].x, model.range().unwrap().min_mileage);
    }
}
