use crate::error::Result;
use crate::sink::LogSink;
use serde::Deserialize;
use smart_default::SmartDefault;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// RollingFileSink 配置
#[derive(Debug, Clone, Deserialize, SmartDefault, PartialEq)]
#[serde(default)]
pub struct RollingFileSinkConfig {
    // ========== 基本信息 ==========
    /// 日志文件路径
    #[default("app.log".to_string())]
    pub file_path: String,

    // ========== 切分策略 ==========
    /// 单个文件最大大小（MB），0 表示不按大小切分
    #[default(100)]
    pub max_size_mb: u64,

    // ========== 清理策略 ==========
    /// 保留的最大备份数量，None 表示不按数量清理
    #[default(None)]
    pub max_backups: Option<usize>,

    /// 备份最多保留的天数，None 表示不按时间清理
    #[default(None)]
    pub max_age_days: Option<u64>,

    // ========== 其他选项 ==========
    /// 是否压缩备份文件
    #[default(false)]
    pub compress: bool,
}

/// 按大小滚动的文件输出
///
/// 当前文件始终是 `app.log`，切分时备份依次后移：
/// `app.log` → `app.log.1` → `app.log.2` ...，开启压缩后备份为 `app.log.N.gz`
pub struct RollingFileSink {
    config: RollingFileSinkConfig,
    file: File,
    path: PathBuf,
    size: u64,
    base_path: PathBuf,
    file_name: String,
    /// 测试中可以直接指定字节数
    max_bytes: u64,
}

impl RollingFileSink {
    pub fn new(config: RollingFileSinkConfig) -> Result<Self> {
        let path = PathBuf::from(&config.file_path);
        let base_path = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "app.log".to_string());

        // 确保父目录存在
        std::fs::create_dir_all(&base_path)?;

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let size = file.metadata().map(|m| m.len()).unwrap_or(0);
        let max_bytes = config.max_size_mb.saturating_mul(1024 * 1024);

        Ok(Self {
            config,
            file,
            path,
            size,
            base_path,
            file_name,
            max_bytes,
        })
    }

    /// 以字节为单位设置切分阈值
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 检查是否需要切分
    fn should_rollover(&self, incoming: usize) -> bool {
        self.max_bytes > 0 && self.size > 0 && self.size + incoming as u64 > self.max_bytes
    }

    /// 生成备份文件路径
    fn backup_path(&self, sequence: usize, compressed: bool) -> PathBuf {
        let name = if compressed {
            format!("{}.{}.gz", self.file_name, sequence)
        } else {
            format!("{}.{}", self.file_name, sequence)
        };
        self.base_path.join(name)
    }

    /// 从文件路径中提取序号
    fn extract_sequence(&self, path: &Path) -> Option<(usize, bool)> {
        let filename = path.file_name()?.to_str()?;
        let (stem, compressed) = match filename.strip_suffix(".gz") {
            Some(stem) => (stem, true),
            None => (filename, false),
        };

        // app.log.1 -> 1
        // app.log.2.gz -> 2
        let suffix = stem.strip_prefix(&format!("{}.", self.file_name))?;
        suffix.parse().ok().map(|seq| (seq, compressed))
    }

    /// 查找所有备份文件
    fn find_backups(&self) -> Result<Vec<(usize, bool, PathBuf)>> {
        let mut backups = Vec::new();
        for entry in std::fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if let Some((seq, compressed)) = self.extract_sequence(&path) {
                backups.push((seq, compressed, path));
            }
        }
        Ok(backups)
    }

    /// 执行切分
    fn rollover(&mut self) -> Result<()> {
        self.file.flush()?;

        // 按序号降序重命名，避免覆盖
        let mut backups = self.find_backups()?;
        backups.sort_by(|a, b| b.0.cmp(&a.0));
        for (seq, compressed, old_path) in backups {
            let new_path = self.backup_path(seq + 1, compressed);
            std::fs::rename(&old_path, &new_path)?;
        }

        let first = self.backup_path(1, false);
        std::fs::rename(&self.path, &first)?;

        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.size = 0;

        if self.config.compress {
            compress_file(&first)?;
        }

        self.cleanup_old_files()
    }

    /// 清理旧备份
    fn cleanup_old_files(&self) -> Result<()> {
        if self.config.max_backups.is_none() && self.config.max_age_days.is_none() {
            return Ok(());
        }

        // 天数过大时截断，超出时间范围则视为不按时间清理
        let cutoff = self.config.max_age_days.and_then(|days| {
            SystemTime::now().checked_sub(Duration::from_secs(days.saturating_mul(24 * 3600)))
        });

        for (seq, _, path) in self.find_backups()? {
            let over_count = self.config.max_backups.is_some_and(|max| seq > max);
            let too_old = cutoff.is_some_and(|cutoff| {
                std::fs::metadata(&path)
                    .and_then(|m| m.modified())
                    .map(|modified| modified < cutoff)
                    .unwrap_or(false)
            });

            if over_count || too_old {
                std::fs::remove_file(&path).ok();
            }
        }

        Ok(())
    }
}

/// 压缩文件为 `<path>.gz` 并删除原文件
fn compress_file(path: &Path) -> Result<()> {
    let mut compressed = path.as_os_str().to_os_string();
    compressed.push(".gz");

    let mut input = File::open(path)?;
    let output = File::create(PathBuf::from(compressed))?;

    // 使用 flate2 压缩
    let mut encoder = flate2::write::GzEncoder::new(output, flate2::Compression::default());
    std::io::copy(&mut input, &mut encoder)?;
    encoder.finish()?;

    std::fs::remove_file(path)?;
    Ok(())
}

impl LogSink for RollingFileSink {
    fn write(&mut self, record: &[u8]) -> Result<()> {
        // 切分失败时继续写入当前文件，写完再把错误交给调用方
        let rotated = if self.should_rollover(record.len()) {
            let result = self.rollover();
            if result.is_err() {
                // 重新计数，下次切分至少间隔一个阈值，避免每次写入都移动备份
                self.size = 0;
            }
            result
        } else {
            Ok(())
        };

        self.file.write_all(record)?;
        self.size += record.len() as u64;

        rotated
    }

    fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }

    fn highlighting(&self) -> bool {
        false
    }
}
