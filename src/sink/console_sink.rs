use crate::error::Result;
use crate::sink::LogSink;
use serde::Deserialize;
use smart_default::SmartDefault;
use std::io::{self, Write};

/// 终端输出目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, SmartDefault)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Stdout,
    Stderr,
}

/// ConsoleSink 配置
#[derive(Debug, Clone, Deserialize, SmartDefault, PartialEq)]
#[serde(default)]
pub struct ConsoleSinkConfig {
    /// 输出到 stdout 还是 stderr
    pub target: Target,
}

/// 终端输出
pub struct ConsoleSink {
    config: ConsoleSinkConfig,
}

impl ConsoleSink {
    pub fn new(config: ConsoleSinkConfig) -> Self {
        Self { config }
    }

    pub fn target(&self) -> Target {
        self.config.target
    }
}

impl LogSink for ConsoleSink {
    fn write(&mut self, record: &[u8]) -> Result<()> {
        match self.config.target {
            Target::Stdout => io::stdout().lock().write_all(record)?,
            Target::Stderr => io::stderr().lock().write_all(record)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.config.target {
            Target::Stdout => io::stdout().flush()?,
            Target::Stderr => io::stderr().flush()?,
        }
        Ok(())
    }
}

impl From<ConsoleSinkConfig> for ConsoleSink {
    fn from(config: ConsoleSinkConfig) -> Self {
        ConsoleSink::new(config)
    }
}
