use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mileage_chart::config::ChartConfig;
use mileage_chart::services::{chart_service, data_service, ChartDataModel};
use mileage_chart::utils::RenderError;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mileage_chart=debug")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting mileage chart renderer...");

    let config = match ChartConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let dataset = data_service::load_or_generate(&config.data_path, config.fallback_points).await;

    let model = match ChartDataModel::from_dataset(dataset) {
        Ok(model) => model,
        Err(e) => {
            error!("Failed to load chart data: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = tokio::task::spawn_blocking(move || chart_service::render_chart(&model, &config))
        .await
        .map_err(|e| RenderError::Task(e.to_string()))
        .and_then(|rendered| rendered);

    match result {
        Ok(summary) => {
            info!(
                "Rendered {} points to {} (trend: {}, current point: {}, matched index: {:?})",
                summary.points_drawn,
                summary.output_path,
                summary.trend_drawn,
                summary.current_point_drawn,
                summary.highlighted_index
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
