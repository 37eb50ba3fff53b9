use crate::error::LogError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 日志级别
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// 调试信息
    #[default]
    Debug = 0,
    /// 一般信息
    Info = 1,
    /// 警告信息
    Warn = 2,
    /// 错误信息
    Error = 3,
    /// 致命错误，输出后进程退出
    Fatal = 4,
}

impl Level {
    /// 所有级别，按从低到高排序
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    /// 日志中输出的级别标记，固定 5 个字符
    pub fn tag(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO0",
            Level::Warn => "WARN0",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    /// 级别对应的 ANSI 颜色前缀
    pub fn color(&self) -> &'static str {
        color_for_tag(self.tag())
    }

    /// 按名称设置级别时使用的解析规则
    ///
    /// 只识别 `info`、`warn`、`error`（大小写不敏感），其余返回 None，
    /// 调用方保持原级别不变
    pub fn from_name(name: &str) -> Option<Level> {
        match name.to_lowercase().as_str() {
            "info" => Some(Level::Info),
            "warn" => Some(Level::Warn),
            "error" => Some(Level::Error),
            _ => None,
        }
    }
}

/// 根据级别标记获取颜色，未知标记使用白色
pub fn color_for_tag(tag: &str) -> &'static str {
    match tag {
        "FATAL" | "ERROR" => "\x1b[0;31m",
        "WARN0" => "\x1b[0;33m",
        "INFO0" => "\x1b[0;34m",
        "DEBUG" => "\x1b[0;36m",
        _ => "\x1b[0;37m",
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" | "info0" => Ok(Level::Info),
            "warn" | "warn0" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            _ => Err(LogError::InvalidLevel(s.to_string())),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
