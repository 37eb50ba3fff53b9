mod core;
mod json_formatter;
mod text_formatter;

pub use self::core::{LogFormatter, TIME_FORMAT};
pub use json_formatter::{JsonFormatter, JsonFormatterConfig, JsonMessage};
pub use text_formatter::{TextFormatter, TextFormatterConfig};

use serde::Deserialize;
use std::sync::Arc;

/// 输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// 文本格式
    #[default]
    Text,
    /// JSON 格式
    Json,
}

/// 根据输出格式创建 formatter
pub fn create_formatter(format: Format, colored: bool) -> Arc<dyn LogFormatter> {
    match format {
        Format::Text => Arc::new(TextFormatter::new(TextFormatterConfig { colored })),
        Format::Json => Arc::new(JsonFormatter::new(JsonFormatterConfig::default())),
    }
}
