use crossbeam::channel::Sender;
use std::path::PathBuf;
use thiserror::Error;

/// 日志模块统一错误类型
///
/// 稳态运行中的错误（写入失败、切分失败、序列化失败）不会抛给调用方，
/// 而是交给 [`ErrorPolicy`](crate::ErrorPolicy) 处理
#[derive(Error, Debug)]
pub enum LogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("format error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("invalid log level: {0}")]
    InvalidLevel(String),

    #[error("logger is closed")]
    Closed,

    #[error("rotate to {path} failed: {source}")]
    Rotate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LogError>;

/// 稳态错误的处理策略
#[derive(Debug, Clone, Default)]
pub enum ErrorPolicy {
    /// 静默丢弃
    #[default]
    Drop,
    /// 发送到错误通道，通道已满或已关闭时丢弃
    Report(Sender<LogError>),
}

impl ErrorPolicy {
    pub fn handle(&self, err: LogError) {
        if let ErrorPolicy::Report(tx) = self {
            let _ = tx.try_send(err);
        }
    }
}
