pub mod errors;
pub mod format;

pub use errors::{ChartError, ConfigError, LoadError, RenderError};
pub use format::LabelFormat;
