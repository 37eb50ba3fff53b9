mod console_sink;
mod daily_file_sink;
mod rolling_file_sink;
mod trait_;
mod writer_sink;

pub use console_sink::{ConsoleSink, ConsoleSinkConfig, Target};
pub use daily_file_sink::{daily_file_name, DailyFileSink, DailyFileSinkConfig};
pub use rolling_file_sink::{RollingFileSink, RollingFileSinkConfig};
pub use trait_::LogSink;
pub use writer_sink::WriterSink;

use crate::error::Result;
use chrono::{DateTime, Local};
use serde::Deserialize;

/// 输出目标配置
///
/// 与 `{ type: "...", options: { ... } }` 形式的配置对应
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", content = "options")]
pub enum SinkConfig {
    #[serde(rename = "ConsoleSink")]
    Console(ConsoleSinkConfig),
    #[serde(rename = "FileSink")]
    File(DailyFileSinkConfig),
    #[serde(rename = "RollingFileSink")]
    RollingFile(RollingFileSinkConfig),
}

impl Default for SinkConfig {
    fn default() -> Self {
        SinkConfig::Console(ConsoleSinkConfig::default())
    }
}

/// 根据配置创建输出目标
pub fn create_sink(config: &SinkConfig, now: DateTime<Local>) -> Result<Box<dyn LogSink>> {
    Ok(match config {
        SinkConfig::Console(options) => Box::new(ConsoleSink::new(options.clone())),
        SinkConfig::File(options) => Box::new(DailyFileSink::open(options.clone(), now)?),
        SinkConfig::RollingFile(options) => Box::new(RollingFileSink::new(options.clone())?),
    })
}
