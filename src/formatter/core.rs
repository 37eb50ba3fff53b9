use crate::error::Result;
use crate::log_record::{LogEvent, Record};

/// 时间戳格式，精确到秒
pub const TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// 日志格式化器 trait
///
/// 负责将 LogEvent 渲染为以换行结尾的 Record
pub trait LogFormatter: Send + Sync {
    /// 格式化日志事件
    fn format(&self, event: &LogEvent) -> Result<Record>;
}
