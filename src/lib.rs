//! logx - 异步、按天切分、多格式的日志库
//!
//! 调用线程只做级别判断和格式化，写出由每个 Logger 独占的后台线程完成。
//!
//! ## 模块
//!
//! - **formatter**: 文本（可着色）和 JSON 两种格式
//! - **sink**: 终端、按日期命名的文件、按大小滚动的文件、任意 writer
//! - **dispatcher**: 有界队列 + 后台写线程，周期性检查切分
//! - **logger**: 不可变的 Logger 句柄和配置
//! - **global**: 全局默认 Logger
//! - **facade**: 接入 `log` crate
//!
//! ## 示例
//!
//! ```ignore
//! use logx::{info, Logger, Level};
//!
//! fn main() -> anyhow::Result<()> {
//!     let logger = Logger::with_file("./logs/app/debug")?.with_level(Level::Info);
//!     logger.set_rotate_by_day(true);
//!
//!     info!(logger, "listening on {}", 8080);
//!     logger.flush()?;
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod dispatcher;
pub mod error;
pub mod facade;
pub mod formatter;
pub mod global;
pub mod level;
pub mod log_record;
pub mod logger;
pub mod sink;

mod macros;

// 重新导出主要的公共 API
pub use clock::{Clock, ManualClock, SystemClock};
pub use dispatcher::{Dispatcher, DispatcherOptions};
pub use error::{ErrorPolicy, LogError, Result};
pub use formatter::{Format, JsonFormatter, LogFormatter, TextFormatter};
pub use level::Level;
pub use log_record::{LogEvent, Location, Record};
pub use logger::{Logger, LoggerConfig};
pub use sink::{ConsoleSink, DailyFileSink, LogSink, RollingFileSink, SinkConfig, WriterSink};
