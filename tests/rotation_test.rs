//! 按天切分的集成测试
//!
//! 使用 ManualClock 模拟跨天，tick 间隔缩短到毫秒级

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use logx::sink::{daily_file_name, DailyFileSinkConfig};
use logx::{ErrorPolicy, LogError, Logger, LoggerConfig, ManualClock, SinkConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(y, m, d, h, min, s).single().unwrap()
}

fn file_config(template: &Path, rotate_by_day: bool) -> LoggerConfig {
    LoggerConfig {
        sink: SinkConfig::File(DailyFileSinkConfig {
            path: template.to_string_lossy().to_string(),
            rotate_by_day,
        }),
        tick_interval_ms: 5,
        ..Default::default()
    }
}

fn wait_until(condition: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn test_rotate_by_day_switches_file() -> Result<()> {
    let dir = TempDir::new()?;
    let template = dir.path().join("logs").join("app").join("debug");
    let day1 = local(2025, 1, 19, 23, 59, 58);
    let day2 = local(2025, 1, 20, 0, 0, 1);
    let clock = ManualClock::new(day1);

    let logger = Logger::with_clock(
        file_config(&template, false),
        Arc::new(clock.clone()),
        ErrorPolicy::Drop,
    )?;
    logger.set_rotate_by_day(true);

    logger.info("day one");
    logger.flush()?;

    let file1 = daily_file_name(&template, day1);
    let file2 = daily_file_name(&template, day2);
    assert_eq!(
        file1.file_name().unwrap().to_string_lossy(),
        "debug.2025.01.19.log"
    );

    let before = std::fs::read_to_string(&file1)?;
    assert!(before.starts_with("[INFO0] 2025/01/19 23:59:58 | "));
    assert!(before.ends_with(" | day one\n"));
    assert!(!before.contains('\x1b'));

    clock.set(day2);
    assert!(wait_until(|| file2.exists()), "rotation did not happen");

    logger.info("day two");
    logger.flush()?;

    assert_eq!(std::fs::read_to_string(&file1)?, before);
    let after = std::fs::read_to_string(&file2)?;
    assert!(after.starts_with("[INFO0] 2025/01/20 00:00:01 | "));
    assert!(after.ends_with(" | day two\n"));
    Ok(())
}

#[test]
fn test_no_rotation_when_disabled() -> Result<()> {
    let dir = TempDir::new()?;
    let template = dir.path().join("app");
    let day1 = local(2025, 3, 1, 12, 0, 0);
    let day2 = local(2025, 3, 2, 12, 0, 0);
    let clock = ManualClock::new(day1);

    let logger = Logger::with_clock(
        file_config(&template, false),
        Arc::new(clock.clone()),
        ErrorPolicy::Drop,
    )?;

    logger.info("first");
    clock.set(day2);
    thread::sleep(Duration::from_millis(50));
    logger.info("second");
    logger.flush()?;

    let contents = std::fs::read_to_string(daily_file_name(&template, day1))?;
    assert_eq!(contents.lines().count(), 2);
    assert!(!daily_file_name(&template, day2).exists());
    Ok(())
}

#[test]
fn test_rotation_failure_is_logged_to_current_file() -> Result<()> {
    let dir = TempDir::new()?;
    let template = dir.path().join("app");
    let day1 = local(2025, 6, 30, 23, 0, 0);
    let day2 = local(2025, 7, 1, 1, 0, 0);
    let clock = ManualClock::new(day1);

    // 新文件的路径被目录占用，打开失败
    let blocked: PathBuf = daily_file_name(&template, day2);
    std::fs::create_dir_all(&blocked)?;

    let (tx, rx) = crossbeam::channel::unbounded();
    let logger = Logger::with_clock(
        file_config(&template, true),
        Arc::new(clock.clone()),
        ErrorPolicy::Report(tx),
    )?;

    clock.set(day2);
    let err = rx.recv_timeout(Duration::from_secs(5))?;
    assert!(matches!(err, LogError::Rotate { .. }));

    logger.info("still here");
    logger.shutdown()?;

    let contents = std::fs::read_to_string(daily_file_name(&template, day1))?;
    assert!(contents.starts_with("<<<logger error>>>>:"));
    assert!(contents.contains(" | still here\n"));
    Ok(())
}
