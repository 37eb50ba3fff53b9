use crate::level::Level;
use crate::log_record::Location;
use crate::logger::{Logger, LoggerConfig};
use anyhow::Result;
use arc_swap::ArcSwap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// 全局默认 Logger
///
/// 首次使用时创建，输出到终端的带颜色文本形式 logger
static DEFAULT_LOGGER: once_cell::sync::Lazy<ArcSwap<Logger>> = once_cell::sync::Lazy::new(|| {
    ArcSwap::from_pointee(Logger::console().expect("Failed to create default logger"))
});

/// 用配置初始化全局默认 Logger
///
/// # 示例
///
/// ```ignore
/// use logx::global;
///
/// fn main() -> anyhow::Result<()> {
///     let config = logx::LoggerConfig::from_yaml(include_str!("log.yaml"))?;
///     global::init(config)?;
///     logx::info!("server started on {}", 8080);
///     Ok(())
/// }
/// ```
pub fn init(config: LoggerConfig) -> Result<()> {
    set_default(Logger::new(config)?);
    Ok(())
}

/// 替换全局默认 Logger
///
/// 旧 Logger 在最后一个句柄释放时写出剩余日志
pub fn set_default(logger: Logger) {
    DEFAULT_LOGGER.store(Arc::new(logger));
}

/// 获取全局默认 Logger
pub fn get_default() -> Arc<Logger> {
    DEFAULT_LOGGER.load_full()
}

// ========== 全局配置 ==========

/// 设置全局最低输出级别
pub fn set_level(level: Level) {
    DEFAULT_LOGGER.rcu(|current| Logger::clone(current).with_level(level));
}

/// 按名称设置全局级别，只识别 info、warn、error
pub fn set_level_by_name(name: &str) {
    DEFAULT_LOGGER.rcu(|current| Logger::clone(current).with_level_name(name));
}

/// 全局 Logger 改用 JSON 格式
pub fn set_json() {
    DEFAULT_LOGGER.rcu(|current| Logger::clone(current).with_json());
}

/// 全局 Logger 关闭颜色
pub fn set_no_color() {
    DEFAULT_LOGGER.rcu(|current| Logger::clone(current).with_no_color());
}

/// 全局 Logger 开启或关闭按天切分
pub fn set_rotate_by_day(enabled: bool) {
    get_default().set_rotate_by_day(enabled);
}

/// 全局 Logger 改为写入按日期命名的文件，保留当前级别和格式
pub fn write_to_file(path: impl AsRef<Path>) -> Result<()> {
    let current = get_default();
    let mut logger = Logger::with_file(path)?.with_level(current.level());
    if current.format() == crate::formatter::Format::Json {
        logger = logger.with_json();
    }
    set_default(logger);
    Ok(())
}

// ========== 默认 logger 的便捷 log 方法 ==========

/// 使用默认 logger 记录日志
pub fn log(level: Level, args: fmt::Arguments<'_>, location: Location) {
    get_default().log(level, args, location)
}

/// 等待默认 logger 中之前的日志全部写出
pub fn flush() -> crate::error::Result<()> {
    get_default().flush()
}

/// 使用默认 logger 记录 DEBUG 级别日志
#[track_caller]
pub fn debug(message: impl fmt::Display) {
    log(Level::Debug, format_args!("{}", message), Location::caller())
}

/// 使用默认 logger 记录 INFO 级别日志
#[track_caller]
pub fn info(message: impl fmt::Display) {
    log(Level::Info, format_args!("{}", message), Location::caller())
}

/// 使用默认 logger 记录 WARN 级别日志
#[track_caller]
pub fn warn(message: impl fmt::Display) {
    log(Level::Warn, format_args!("{}", message), Location::caller())
}

/// 使用默认 logger 记录 ERROR 级别日志
#[track_caller]
pub fn error(message: impl fmt::Display) {
    log(Level::Error, format_args!("{}", message), Location::caller())
}

/// 使用默认 logger 记录 FATAL 级别日志并退出进程
#[track_caller]
pub fn fatal(message: impl fmt::Display) -> ! {
    get_default().fatal_at(format_args!("{}", message), Location::caller())
}

#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    log(Level::Debug, args, Location::caller())
}

#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    log(Level::Info, args, Location::caller())
}

#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    log(Level::Warn, args, Location::caller())
}

#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    log(Level::Error, args, Location::caller())
}

#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    get_default().fatal_at(args, Location::caller())
}
