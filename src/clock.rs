//! 时钟抽象
//!
//! 时间戳和按天切分都通过 [`Clock`] 获取当前时间，测试中可以用
//! [`ManualClock`] 模拟跨天

use chrono::{DateTime, Duration, Local};
use std::sync::{Arc, RwLock};

/// 时钟 trait
pub trait Clock: Send + Sync {
    /// 当前本地时间
    fn now(&self) -> DateTime<Local>;
}

/// 系统时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// 手动时钟
///
/// 克隆后共享同一个时间，便于在测试线程中推进后台线程看到的时间
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<RwLock<DateTime<Local>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            now: Arc::new(RwLock::new(start)),
        }
    }

    /// 设置当前时间
    pub fn set(&self, time: DateTime<Local>) {
        let mut now = self.now.write().unwrap_or_else(|e| e.into_inner());
        *now = time;
    }

    /// 推进时间
    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.write().unwrap_or_else(|e| e.into_inner());
        *now += duration;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Local::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.read().unwrap_or_else(|e| e.into_inner())
    }
}
