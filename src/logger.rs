use crate::clock::{Clock, SystemClock};
use crate::dispatcher::{Dispatcher, DispatcherOptions, DEFAULT_QUEUE_CAPACITY};
use crate::error::ErrorPolicy;
use crate::formatter::{create_formatter, Format, LogFormatter};
use crate::level::Level;
use crate::log_record::{LogEvent, Location};
use crate::sink::{create_sink, DailyFileSinkConfig, LogSink, SinkConfig, WriterSink};
use anyhow::Result;
use serde::Deserialize;
use smart_default::SmartDefault;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Logger 配置
#[derive(Debug, Clone, Deserialize, SmartDefault, PartialEq)]
#[serde(default)]
pub struct LoggerConfig {
    /// 最低输出级别
    #[default(Level::Debug)]
    pub level: Level,

    /// 输出格式
    pub format: Format,

    /// 是否按级别着色（文件输出始终不着色）
    #[default = true]
    pub colored: bool,

    /// 输出目标
    pub sink: SinkConfig,

    /// 队列容量
    #[default(DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,

    /// 检查切分的间隔（毫秒）
    #[default = 1000]
    pub tick_interval_ms: u64,
}

impl LoggerConfig {
    /// 从 JSON 字符串创建（支持 JSON5 格式）
    pub fn from_json(json_str: &str) -> Result<Self> {
        Ok(json5::from_str(json_str)?)
    }

    /// 从 YAML 字符串创建
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// 从 TOML 字符串创建
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    fn dispatcher_options(&self) -> DispatcherOptions {
        DispatcherOptions {
            queue_capacity: self.queue_capacity,
            tick_interval: Duration::from_millis(self.tick_interval_ms.max(1)),
        }
    }
}

/// 核心日志器
///
/// 不可变的句柄，克隆开销很小。`with_*` 方法返回新的句柄，
/// 新旧句柄共享同一个分发器（队列、后台线程和输出目标）
#[derive(Clone)]
pub struct Logger {
    level: Level,
    format: Format,
    colored: bool,
    formatter: Arc<dyn LogFormatter>,
    clock: Arc<dyn Clock>,
    policy: ErrorPolicy,
    dispatcher: Arc<Dispatcher>,
}

impl Logger {
    /// 从配置创建 Logger
    pub fn new(config: LoggerConfig) -> Result<Self> {
        Self::with_policy(config, ErrorPolicy::Drop)
    }

    /// 从配置创建 Logger，并指定错误处理策略
    pub fn with_policy(config: LoggerConfig, policy: ErrorPolicy) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock), policy)
    }

    /// 从配置创建 Logger，使用指定的时钟
    pub fn with_clock(
        config: LoggerConfig,
        clock: Arc<dyn Clock>,
        policy: ErrorPolicy,
    ) -> Result<Self> {
        let sink = create_sink(&config.sink, clock.now())?;
        Self::from_sink(sink, &config, clock, policy)
    }

    /// 使用自定义输出目标创建 Logger，忽略 `config.sink`
    pub fn from_sink(
        sink: Box<dyn LogSink>,
        config: &LoggerConfig,
        clock: Arc<dyn Clock>,
        policy: ErrorPolicy,
    ) -> Result<Self> {
        let colored = config.colored && sink.highlighting();
        let dispatcher = Dispatcher::spawn(
            sink,
            Arc::clone(&clock),
            config.dispatcher_options(),
            policy.clone(),
        )?;

        Ok(Self {
            level: config.level,
            format: config.format,
            colored,
            formatter: create_formatter(config.format, colored),
            clock,
            policy,
            dispatcher: Arc::new(dispatcher),
        })
    }

    /// 输出到 stdout 的默认 Logger
    pub fn console() -> Result<Self> {
        Self::new(LoggerConfig::default())
    }

    /// 输出到指定 writer
    pub fn with_writer(writer: impl Write + Send + 'static) -> Result<Self> {
        Self::from_sink(
            Box::new(WriterSink::new(writer)),
            &LoggerConfig::default(),
            Arc::new(SystemClock),
            ErrorPolicy::Drop,
        )
    }

    /// 输出到按日期命名的文件 `<path>.<YYYY>.<MM>.<DD>.log`，自动创建父目录
    pub fn with_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(LoggerConfig {
            sink: SinkConfig::File(DailyFileSinkConfig {
                path: path.as_ref().to_string_lossy().to_string(),
                rotate_by_day: false,
            }),
            ..Default::default()
        })
    }

    // ========== 配置（返回新句柄） ==========

    /// 设置最低输出级别
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// 按名称设置级别，只识别 info、warn、error，其他名称保持原级别
    pub fn with_level_name(self, name: &str) -> Self {
        match Level::from_name(name) {
            Some(level) => self.with_level(level),
            None => self,
        }
    }

    /// 使用 JSON 格式输出
    pub fn with_json(mut self) -> Self {
        self.format = Format::Json;
        self.formatter = create_formatter(self.format, self.colored);
        self
    }

    /// 关闭颜色
    pub fn with_no_color(mut self) -> Self {
        self.colored = false;
        self.formatter = create_formatter(self.format, self.colored);
        self
    }

    /// 开启或关闭按天切分，只对文件输出生效
    pub fn set_rotate_by_day(&self, enabled: bool) {
        if let Err(e) = self.dispatcher.set_rotate_by_day(enabled) {
            self.policy.handle(e);
        }
    }

    /// 获取当前日志级别
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn colored(&self) -> bool {
        self.colored
    }

    /// 指定级别是否会输出
    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    // ========== 输出 ==========

    /// 记录日志
    ///
    /// 级别低于最低级别时直接返回，不做格式化也不分配内存
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>, location: Location) {
        if !self.is_enabled(level) {
            return;
        }

        let event = LogEvent::new(level, fmt::format(args), location, self.clock.now());
        let result = self
            .formatter
            .format(&event)
            .and_then(|record| self.dispatcher.enqueue(record));

        if let Err(e) = result {
            self.policy.handle(e);
        }
    }

    /// 等待之前的日志全部写出
    pub fn flush(&self) -> crate::error::Result<()> {
        self.dispatcher.flush()
    }

    /// 写出剩余日志并停止后台线程，所有共享该分发器的句柄都会失效
    pub fn shutdown(&self) -> crate::error::Result<()> {
        self.dispatcher.shutdown()
    }

    /// 记录 FATAL 日志，等待写出后以状态码 1 退出进程
    pub fn fatal_at(&self, args: fmt::Arguments<'_>, location: Location) -> ! {
        self.log(Level::Fatal, args, location);
        if let Err(e) = self.dispatcher.flush() {
            self.policy.handle(e);
        }
        std::process::exit(1)
    }

    /// 记录 DEBUG 级别日志
    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, format_args!("{}", message), Location::caller());
    }

    /// 记录 INFO 级别日志
    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, format_args!("{}", message), Location::caller());
    }

    /// 记录 WARN 级别日志
    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Level::Warn, format_args!("{}", message), Location::caller());
    }

    /// 记录 ERROR 级别日志
    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, format_args!("{}", message), Location::caller());
    }

    /// 记录 FATAL 级别日志并退出进程
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) -> ! {
        self.fatal_at(format_args!("{}", message), Location::caller())
    }

    /// 记录 DEBUG 级别日志（格式化）
    ///
    /// ```ignore
    /// logger.debugf(format_args!("user {} logged in", user_id));
    /// ```
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args, Location::caller());
    }

    /// 记录 INFO 级别日志（格式化）
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args, Location::caller());
    }

    /// 记录 WARN 级别日志（格式化）
    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args, Location::caller());
    }

    /// 记录 ERROR 级别日志（格式化）
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args, Location::caller());
    }

    /// 记录 FATAL 级别日志（格式化）并退出进程
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.fatal_at(args, Location::caller())
    }
}
