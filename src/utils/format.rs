use std::str::FromStr;

use num_format::{Locale, ToFormattedString};

/// How a numeric axis or tooltip label is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelFormat {
    /// `1234567`
    Plain,
    /// `1,234,567`
    Thousands,
    /// `1.2M`, `350k`
    Compact,
    /// `1.85M`
    Millions,
}

impl LabelFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            LabelFormat::Plain => format!("{:.0}", value),
            LabelFormat::Thousands => (value.round() as i64).to_formatted_string(&Locale::en),
            LabelFormat::Compact => {
                let abs = value.abs();
                if abs >= 1_000_000.0 {
                    format!("{:.1}M", value / 1_000_000.0)
                } else if abs >= 1_000.0 {
                    format!("{:.0}k", value / 1_000.0)
                } else {
                    format!("{:.0}", value)
                }
            }
            LabelFormat::Millions => format!("{:.2}M", value / 1_000_000.0),
        }
    }
}

impl FromStr for LabelFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(LabelFormat::Plain),
            "thousands" => Ok(LabelFormat::Thousands),
            "compact" => Ok(LabelFormat::Compact),
            "millions" => Ok(LabelFormat::Millions),
            other => Err(format!(
                "unknown label format '{}', expected plain, thousands, compact or millions",
                other
            )),
        }
    }
}
