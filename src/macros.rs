//! 日志宏模块
//!
//! 提供自动捕获文件和行号信息的日志宏。第一个参数是格式字符串时写入全局默认 logger，
//! 否则第一个参数作为 logger
//!
//! # 示例
//!
//! ```ignore
//! use logx::{info, warn, Logger};
//!
//! fn main() -> anyhow::Result<()> {
//!     // 全局默认 logger
//!     info!("application started");
//!     warn!("slow query, duration={}ms", 1500);
//!
//!     // 指定 logger
//!     let logger = Logger::with_file("./logs/app/debug")?;
//!     info!(logger, "user {} logged in", "alice");
//!
//!     Ok(())
//! }
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($level:expr, $fmt:literal $($arg:tt)*) => {
        $crate::global::log(
            $level,
            format_args!($fmt $($arg)*),
            $crate::Location::new(file!(), line!()),
        )
    };
    ($level:expr, $logger:expr, $($arg:tt)+) => {
        $logger.log(
            $level,
            format_args!($($arg)+),
            $crate::Location::new(file!(), line!()),
        )
    };
}

/// 记录 DEBUG 级别日志
///
/// ```ignore
/// debug!("processing request {}", id);
/// debug!(logger, "processing request {}", id);
/// ```
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::__log!($crate::Level::Debug, $($arg)+)
    };
}

/// 记录 INFO 级别日志
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::__log!($crate::Level::Info, $($arg)+)
    };
}

/// 记录 WARN 级别日志
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::__log!($crate::Level::Warn, $($arg)+)
    };
}

/// 记录 ERROR 级别日志
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::__log!($crate::Level::Error, $($arg)+)
    };
}

/// 记录 FATAL 级别日志，写出后以状态码 1 退出进程
#[macro_export]
macro_rules! fatal {
    ($fmt:literal $($arg:tt)*) => {
        $crate::global::get_default().fatal_at(
            format_args!($fmt $($arg)*),
            $crate::Location::new(file!(), line!()),
        )
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal_at(
            format_args!($($arg)+),
            $crate::Location::new(file!(), line!()),
        )
    };
}
