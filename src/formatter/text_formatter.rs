use crate::error::Result;
use crate::formatter::core::{LogFormatter, TIME_FORMAT};
use crate::log_record::{LogEvent, Record};
use serde::Deserialize;
use smart_default::SmartDefault;
use std::fmt::Write;

const RESET: &str = "\x1b[0m";

/// TextFormatter 配置
#[derive(Debug, Clone, Deserialize, SmartDefault, PartialEq)]
#[serde(default)]
pub struct TextFormatterConfig {
    /// 是否按级别着色
    #[default = true]
    pub colored: bool,
}

/// 文本格式化器
///
/// 输出格式：`[LEVEL] YYYY/MM/DD HH:MM:SS |                 file.rs:12 | message`
pub struct TextFormatter {
    config: TextFormatterConfig,
}

impl TextFormatter {
    pub fn new(config: TextFormatterConfig) -> Self {
        Self { config }
    }

    pub fn colored(&self) -> bool {
        self.config.colored
    }
}

impl LogFormatter for TextFormatter {
    fn format(&self, event: &LogEvent) -> Result<Record> {
        // 固定部分约 40 字节 + 位置 25 字节 + 颜色控制符
        let mut result = String::with_capacity(80 + event.message.len());

        if self.config.colored {
            result.push_str(event.level.color());
        }

        write!(
            result,
            "[{}] {} | {:>25} | {}",
            event.level.tag(),
            event.time.format(TIME_FORMAT),
            event.location.to_string(),
            event.message
        )?;

        if self.config.colored {
            result.push_str(RESET);
        }
        result.push('\n');

        Ok(result.into_bytes())
    }
}

impl From<TextFormatterConfig> for TextFormatter {
    fn from(config: TextFormatterConfig) -> Self {
        TextFormatter::new(config)
    }
}
