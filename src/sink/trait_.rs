use crate::error::Result;
use chrono::{DateTime, Local};

/// 日志输出目标 trait
///
/// 由后台线程独占，写入和切分都在同一个线程中串行执行，实现无需加锁
pub trait LogSink: Send {
    /// 原样写出一条日志
    fn write(&mut self, record: &[u8]) -> Result<()>;

    /// 刷新缓冲区（默认实现为空操作）
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// 周期性回调，用于检查是否需要切分（默认实现为空操作）
    fn on_tick(&mut self, _now: DateTime<Local>) -> Result<()> {
        Ok(())
    }

    /// 开启或关闭按天切分（默认实现为空操作）
    fn set_rotate_by_day(&mut self, _enabled: bool) {}

    /// 是否适合输出带颜色的内容
    fn highlighting(&self) -> bool {
        true
    }
}
