//! 接入 `log` crate
//!
//! 安装后，依赖库中的 `log::info!` 等调用也会写入同一个 Logger

use crate::level::Level;
use crate::log_record::Location;
use crate::logger::Logger;
use anyhow::Result;

/// `log::Log` 到 [`Logger`] 的桥接
pub struct LogBridge {
    logger: Logger,
}

impl LogBridge {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// `log` 没有 FATAL，TRACE 合并到 DEBUG
    fn level(level: log::Level) -> Level {
        match level {
            log::Level::Trace | log::Level::Debug => Level::Debug,
            log::Level::Info => Level::Info,
            log::Level::Warn => Level::Warn,
            log::Level::Error => Level::Error,
        }
    }

    fn max_level(level: Level) -> log::LevelFilter {
        match level {
            Level::Debug => log::LevelFilter::Trace,
            Level::Info => log::LevelFilter::Info,
            Level::Warn => log::LevelFilter::Warn,
            Level::Error | Level::Fatal => log::LevelFilter::Error,
        }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.logger.is_enabled(Self::level(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let location = match (record.file_static(), record.line()) {
            (Some(file), Some(line)) => Location::new(file, line),
            _ => Location::UNKNOWN,
        };
        self.logger
            .log(Self::level(record.level()), *record.args(), location);
    }

    fn flush(&self) {
        let _ = self.logger.flush();
    }
}

/// 把 Logger 安装为 `log` crate 的全局实现，每个进程只能安装一次
pub fn install(logger: Logger) -> Result<()> {
    let max_level = LogBridge::max_level(logger.level());
    log::set_boxed_logger(Box::new(LogBridge::new(logger)))?;
    log::set_max_level(max_level);
    Ok(())
}
