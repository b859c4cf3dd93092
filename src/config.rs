use chrono::Utc;
use tracing::debug;

use crate::utils::{ConfigError, LabelFormat};

pub const DEFAULT_DATA_PATH: &str = "data/prices.json";
pub const DEFAULT_WIDTH: u32 = 1024;
pub const DEFAULT_HEIGHT: u32 = 768;
pub const DEFAULT_TREND_SAMPLES: usize = 100;
pub const DEFAULT_FALLBACK_POINTS: usize = 40;

/// Formatting strategy for every formattable label on the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelFormats {
    pub mileage: LabelFormat,
    pub price: LabelFormat,
    pub tooltip: LabelFormat,
}

impl Default for LabelFormats {
    fn default() -> Self {
        LabelFormats {
            mileage: LabelFormat::Thousands,
            price: LabelFormat::Millions,
            tooltip: LabelFormat::Plain,
        }
    }
}

/// Renderer settings, defaults merged with `CHART_*` overrides
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub data_path: String,
    pub output_path: String,
    pub width: u32,
    pub height: u32,
    pub trend_samples: usize,
    pub fallback_points: usize,
    pub formats: LabelFormats,
}

impl ChartConfig {
    /// Read overrides from the process environment (after `.env` is loaded)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config, asking `lookup` for each `CHART_*` override
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = LabelFormats::default();

        let config = ChartConfig {
            data_path: lookup("CHART_DATA_PATH").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string()),
            output_path: lookup("CHART_OUTPUT_PATH").unwrap_or_else(default_output_path),
            width: parse_positive(&lookup, "CHART_WIDTH", DEFAULT_WIDTH)?,
            height: parse_positive(&lookup, "CHART_HEIGHT", DEFAULT_HEIGHT)?,
            trend_samples: parse_positive(&lookup, "CHART_TREND_SAMPLES", DEFAULT_TREND_SAMPLES)?,
            fallback_points: parse_positive(&lookup, "CHART_FALLBACK_POINTS", DEFAULT_FALLBACK_POINTS)?,
            formats: LabelFormats {
                mileage: parse_format(&lookup, "CHART_MILEAGE_FORMAT", defaults.mileage)?,
                price: parse_format(&lookup, "CHART_PRICE_FORMAT", defaults.price)?,
                tooltip: parse_format(&lookup, "CHART_TOOLTIP_FORMAT", defaults.tooltip)?,
            },
        };

        debug!("Chart config: {:?}", config);
        Ok(config)
    }
}

fn default_output_path() -> String {
    format!("chart_{}.png", Utc::now().format("%Y%m%d_%H%M%S"))
}

fn parse_positive<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    let value: T = raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })?;

    if value <= T::default() {
        return Err(ConfigError::InvalidValue {
            key,
            value: raw,
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(value)
}

fn parse_format<F>(lookup: &F, key: &'static str, default: LabelFormat) -> Result<LabelFormat, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.parse().map_err(|reason| ConfigError::InvalidValue {
            key,
            value: raw,
            reason,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ChartConfig::from_lookup(|_| None).expect("config failed");
        assert_eq!(config.data_path, DEFAULT_DATA_PATH);
        assert!(config.output_path.starts_with("chart_"));
        assert!(config.output_path.ends_with(".png"));
        assert_eq!((config.width, config.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert_eq!(config.trend_samples, DEFAULT_TREND_SAMPLES);
        assert_eq!(config.formats, LabelFormats::default());
    }

    #[test]
    fn test_overrides() {
        let lookup = lookup_from(&[
            ("CHART_DATA_PATH", "cars.json"),
            ("CHART_OUTPUT_PATH", "out.png"),
            ("CHART_WIDTH", "640"),
            ("CHART_TREND_SAMPLES", " 25 "),
            ("CHART_PRICE_FORMAT", "compact"),
        ]);

        let config = ChartConfig::from_lookup(lookup).expect("config failed");
        assert_eq!(config.data_path, "cars.json");
        assert_eq!(config.output_path, "out.png");
        assert_eq!(config.width, 640);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.trend_samples, 25);
        assert_eq!(config.formats.price, LabelFormat::Compact);
        assert_eq!(config.formats.mileage, LabelFormat::Thousands);
    }

    #[test]
    fn test_invalid_values() {
        let err = ChartConfig::from_lookup(lookup_from(&[("CHART_WIDTH", "wide")])).unwrap_err();
        assert!(err.to_string().contains("CHART_WIDTH"));

        let err = ChartConfig::from_lookup(lookup_from(&[("CHART_TREND_SAMPLES", "0")])).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));

        let err = ChartConfig::from_lookup(lookup_from(&[("CHART_TOOLTIP_FORMAT", "euro")])).unwrap_err();
        assert!(err.to_string().contains("CHART_TOOLTIP_FORMAT"));
    }
}
