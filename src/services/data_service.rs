use rand::Rng;
use tracing::{info, warn};

use crate::models::{ChartDataset, Point};
use crate::utils::LoadError;

/// Price of a new vehicle in the synthetic dataset
const SYNTHETIC_BASE_PRICE: f64 = 2_400_000.0;
/// Relative value lost per kilometre (exponential depreciation)
const SYNTHETIC_DECAY_PER_KM: f64 = 0.000_004;
const SYNTHETIC_MAX_MILEAGE: f64 = 200_000.0;

/// Parse and validate a dataset document
pub fn parse_dataset(json: &str) -> Result<ChartDataset, LoadError> {
    let dataset: ChartDataset = serde_json::from_str(json)?;

    for (index, point) in dataset.price_points.iter().enumerate() {
        point.validate(index)?;
    }
    dataset.current_point.validate(dataset.price_points.len())?;

    Ok(dataset)
}

/// Read a dataset from disk
pub async fn load_dataset(path: &str) -> Result<ChartDataset, LoadError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_string(),
            source,
        })?;

    let dataset = parse_dataset(&json)?;
    info!("Read {} price points from {}", dataset.price_points.len(), path);
    Ok(dataset)
}

/// Read a dataset, falling back to generated data when the file is unusable
pub async fn load_or_generate(path: &str, fallback_points: usize) -> ChartDataset {
    match load_dataset(path).await {
        Ok(dataset) => dataset,
        Err(e) => {
            warn!("{}; using {} generated points instead", e, fallback_points);
            synthetic_dataset(&mut rand::thread_rng(), fallback_points)
        }
    }
}

/// Generate a depreciation-shaped point cloud with ±10% noise
///
/// The current point is one of the generated points. At least one point is
/// always produced.
pub fn synthetic_dataset<R: Rng>(rng: &mut R, count: usize) -> ChartDataset {
    let count = count.max(1);

    let price_points: Vec<Point> = (0..count)
        .map(|_| {
            let mileage = rng.gen_range(0.0..SYNTHETIC_MAX_MILEAGE).round();
            let noise = rng.gen_range(0.9..1.1);
            let price = SYNTHETIC_BASE_PRICE * (-SYNTHETIC_DECAY_PER_KM * mileage).exp() * noise;
            Point::new(mileage, price.round())
        })
        .collect();

    let current_point = price_points[rng.gen_range(0..count)];

    ChartDataset {
        price_points,
        current_point,
    }
}
