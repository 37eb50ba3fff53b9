use crate::error::{LogError, Result};
use crate::sink::LogSink;
use chrono::{DateTime, Local};
use serde::Deserialize;
use smart_default::SmartDefault;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// DailyFileSink 配置
#[derive(Debug, Clone, Deserialize, SmartDefault, PartialEq)]
#[serde(default)]
pub struct DailyFileSinkConfig {
    /// 文件路径模板，实际文件为 `<path>.<YYYY>.<MM>.<DD>.log`
    #[default("logs/app".to_string())]
    pub path: String,

    /// 是否按天切分
    #[default = false]
    pub rotate_by_day: bool,
}

/// 生成指定时间对应的文件名: `<template>.2025.01.19.log`
pub fn daily_file_name(template: &Path, now: DateTime<Local>) -> PathBuf {
    let mut name = template.as_os_str().to_os_string();
    name.push(now.format(".%Y.%m.%d.log").to_string());
    PathBuf::from(name)
}

fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// 按日期命名的文件输出
///
/// 开启按天切分后，每次 tick 时比较当前日期对应的文件名，
/// 不同则打开新文件替换当前文件并关闭旧文件
pub struct DailyFileSink {
    template: PathBuf,
    path: PathBuf,
    file: File,
    rotate_by_day: bool,
}

impl DailyFileSink {
    /// 创建父目录并以追加模式打开当天的文件
    pub fn open(config: DailyFileSinkConfig, now: DateTime<Local>) -> Result<Self> {
        let template = PathBuf::from(&config.path);

        // 确保父目录存在
        if let Some(parent) = template.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let path = daily_file_name(&template, now);
        let file = open_append(&path)?;

        Ok(Self {
            template,
            path,
            file,
            rotate_by_day: config.rotate_by_day,
        })
    }

    /// 当前正在写入的文件
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rotate_by_day(&self) -> bool {
        self.rotate_by_day
    }

    /// 检查并执行切分，返回是否发生了切分
    ///
    /// 打开新文件失败时放弃本次切分，继续写入旧文件
    pub fn maybe_rotate(&mut self, now: DateTime<Local>) -> Result<bool> {
        if !self.rotate_by_day {
            return Ok(false);
        }

        let path = daily_file_name(&self.template, now);
        if path == self.path {
            return Ok(false);
        }

        let file = open_append(&path).map_err(|source| LogError::Rotate {
            path: path.clone(),
            source,
        })?;

        // 旧文件在 drop 时关闭
        drop(std::mem::replace(&mut self.file, file));
        self.path = path;

        Ok(true)
    }
}

impl LogSink for DailyFileSink {
    fn write(&mut self, record: &[u8]) -> Result<()> {
        self.file.write_all(record)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }

    fn on_tick(&mut self, now: DateTime<Local>) -> Result<()> {
        self.maybe_rotate(now).map(|_| ())
    }

    fn set_rotate_by_day(&mut self, enabled: bool) {
        self.rotate_by_day = enabled;
    }

    fn highlighting(&self) -> bool {
        false
    }
}
