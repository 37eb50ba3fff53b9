use crate::level::Level;
use chrono::{DateTime, Local};
use std::fmt;

/// 调用位置
///
/// 由宏（`file!()`/`line!()`）或 `#[track_caller]` 在调用点捕获
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
}

impl Location {
    pub const UNKNOWN: Location = Location {
        file: "???",
        line: 0,
    };

    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// 当前调用者位置
    #[track_caller]
    pub fn caller() -> Self {
        std::panic::Location::caller().into()
    }

    /// 文件名（去掉目录部分）
    pub fn file_name(&self) -> &'static str {
        self.file
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or(Self::UNKNOWN.file)
    }
}

impl From<&'static std::panic::Location<'static>> for Location {
    fn from(location: &'static std::panic::Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 只保留文件名和行号
        write!(f, "{}:{}", self.file_name(), self.line)
    }
}

/// 日志事件
///
/// 通过级别过滤之后才会创建，交给 formatter 渲染成 [`Record`]
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub level: Level,
    pub message: String,
    pub location: Location,
    pub time: DateTime<Local>,
}

impl LogEvent {
    pub fn new(level: Level, message: String, location: Location, time: DateTime<Local>) -> Self {
        Self {
            level,
            message,
            location,
            time,
        }
    }
}

/// 渲染完成的一条日志（以换行结尾的字节序列）
///
/// 进入队列后不再修改，由后台线程独占直到写出
pub type Record = Vec<u8>;
