use crate::error::Result;
use crate::formatter::core::{LogFormatter, TIME_FORMAT};
use crate::log_record::{LogEvent, Record};
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// JsonFormatter 配置（保留扩展性）
#[derive(Debug, Clone, Deserialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct JsonFormatterConfig {}

/// 一条 JSON 日志，字段固定为 LEVEL、TIME、DIR、MSG
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct JsonMessage {
    #[serde(rename = "LEVEL")]
    pub level: String,
    #[serde(rename = "TIME")]
    pub time: String,
    #[serde(rename = "DIR")]
    pub dir: String,
    #[serde(rename = "MSG")]
    pub message: String,
}

/// JSON 格式化器
///
/// 每条日志输出为一行 JSON 对象
pub struct JsonFormatter {}

impl JsonFormatter {
    pub fn new(_: JsonFormatterConfig) -> Self {
        Self {}
    }
}

impl LogFormatter for JsonFormatter {
    fn format(&self, event: &LogEvent) -> Result<Record> {
        let message = JsonMessage {
            level: event.level.tag().to_string(),
            time: event.time.format(TIME_FORMAT).to_string(),
            dir: event.location.to_string(),
            message: event.message.clone(),
        };

        let mut data = serde_json::to_vec(&message)?;
        data.push(b'\n');
        Ok(data)
    }
}

impl From<JsonFormatterConfig> for JsonFormatter {
    fn from(config: JsonFormatterConfig) -> Self {
        JsonFormatter::new(config)
    }
}
