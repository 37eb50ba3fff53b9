//! 日志分发器
//!
//! 每个 Logger 实例对应一个分发器：多个生产者线程把渲染好的 Record 写入有界队列，
//! 唯一的后台线程按到达顺序逐条写出，并在周期性 tick 时检查是否需要切分。
//!
//! 控制消息（flush、切换按天切分、关闭）和日志走同一个队列，因此
//! flush 返回时，之前入队的日志一定已经写出

use crate::clock::Clock;
use crate::error::{ErrorPolicy, LogError, Result};
use crate::log_record::Record;
use crate::sink::LogSink;
use crossbeam::channel::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// 队列默认容量
pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;

/// 默认 tick 间隔
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// 切分失败时写入日志的前缀
pub const ROTATE_ERROR_PREFIX: &str = "<<<logger error>>>>:";

enum Message {
    Record(Record),
    Flush(Sender<()>),
    SetRotateByDay(bool),
    Shutdown,
}

/// 分发器选项
#[derive(Debug, Clone, Copy)]
pub struct DispatcherOptions {
    pub queue_capacity: usize,
    pub tick_interval: Duration,
}

impl Default for DispatcherOptions {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

/// 分发器：有界队列 + 单个后台写线程
pub struct Dispatcher {
    tx: Sender<Message>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Dispatcher {
    /// 启动后台线程，sink 的所有权转移给后台线程
    pub fn spawn(
        sink: Box<dyn LogSink>,
        clock: Arc<dyn Clock>,
        options: DispatcherOptions,
        policy: ErrorPolicy,
    ) -> Result<Self> {
        let (tx, rx) = channel::bounded(options.queue_capacity.max(1));
        let tick_interval = options.tick_interval;

        let handle = thread::Builder::new()
            .name("logx-dispatcher".to_string())
            .spawn(move || drain(rx, sink, clock, tick_interval, policy))?;

        Ok(Self {
            tx,
            handle: Mutex::new(Some(handle)),
        })
    }

    /// 写入一条日志，队列满时阻塞等待
    pub fn enqueue(&self, record: Record) -> Result<()> {
        self.tx
            .send(Message::Record(record))
            .map_err(|_| LogError::Closed)
    }

    /// 等待之前入队的日志全部写出并刷新
    pub fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = channel::bounded(1);
        self.tx
            .send(Message::Flush(ack_tx))
            .map_err(|_| LogError::Closed)?;
        ack_rx.recv().map_err(|_| LogError::Closed)
    }

    /// 开启或关闭按天切分，和日志按相同顺序生效
    pub fn set_rotate_by_day(&self, enabled: bool) -> Result<()> {
        self.tx
            .send(Message::SetRotateByDay(enabled))
            .map_err(|_| LogError::Closed)
    }

    /// 队列中等待写出的消息数
    pub fn pending(&self) -> usize {
        self.tx.len()
    }

    /// 写出队列中剩余的日志后停止后台线程
    ///
    /// 重复调用是安全的，之后的写入返回 [`LogError::Closed`]
    pub fn shutdown(&self) -> Result<()> {
        let handle = self
            .handle
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        if let Some(handle) = handle {
            let _ = self.tx.send(Message::Shutdown);
            handle
                .join()
                .map_err(|_| LogError::Config("dispatcher thread panicked".to_string()))?;
        }
        Ok(())
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

/// 后台线程主循环
fn drain(
    rx: Receiver<Message>,
    mut sink: Box<dyn LogSink>,
    clock: Arc<dyn Clock>,
    tick_interval: Duration,
    policy: ErrorPolicy,
) {
    let ticker = channel::tick(tick_interval);

    loop {
        crossbeam::select! {
            recv(rx) -> message => match message {
                Ok(Message::Record(record)) => {
                    if let Err(e) = sink.write(&record) {
                        policy.handle(e);
                    }
                }
                Ok(Message::Flush(ack)) => {
                    if let Err(e) = sink.flush() {
                        policy.handle(e);
                    }
                    let _ = ack.send(());
                }
                Ok(Message::SetRotateByDay(enabled)) => sink.set_rotate_by_day(enabled),
                Ok(Message::Shutdown) | Err(_) => break,
            },
            recv(ticker) -> _ => {
                if let Err(e) = sink.on_tick(clock.now()) {
                    // 只有后台线程写 sink，错误日志直接写入，不再经过队列
                    let record = format!("{}{}\n", ROTATE_ERROR_PREFIX, e);
                    let _ = sink.write(record.as_bytes());
                    policy.handle(e);
                }
            }
        }
    }

    if let Err(e) = sink.flush() {
        policy.handle(e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use chrono::{DateTime, Local};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 记录写入内容的测试 sink
    #[derive(Clone, Default)]
    struct MemorySink {
        records: Arc<Mutex<Vec<Vec<u8>>>>,
        ticks: Arc<AtomicUsize>,
        fail_tick: bool,
    }

    impl LogSink for MemorySink {
        fn write(&mut self, record: &[u8]) -> Result<()> {
            self.records.lock().unwrap().push(record.to_vec());
            Ok(())
        }

        fn on_tick(&mut self, _now: DateTime<Local>) -> Result<()> {
            self.ticks.fetch_add(1, Ordering::SeqCst);
            if self.fail_tick {
                return Err(LogError::Config("cannot open".to_string()));
            }
            Ok(())
        }
    }

    fn options(tick_ms: u64) -> DispatcherOptions {
        DispatcherOptions {
            queue_capacity: 16,
            tick_interval: Duration::from_millis(tick_ms),
        }
    }

    #[test]
    fn test_dispatcher_fifo_order() -> Result<()> {
        let sink = MemorySink::default();
        let dispatcher = Dispatcher::spawn(
            Box::new(sink.clone()),
            Arc::new(SystemClock),
            options(1000),
            ErrorPolicy::Drop,
        )?;

        for i in 0..100 {
            dispatcher.enqueue(format!("record {}\n", i).into_bytes())?;
        }
        dispatcher.flush()?;

        let records = sink.records.lock().unwrap();
        assert_eq!(records.len(), 100);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record, format!("record {}\n", i).as_bytes());
        }
        Ok(())
    }

    #[test]
    fn test_dispatcher_shutdown_drains_queue() -> Result<()> {
        let sink = MemorySink::default();
        let dispatcher = Dispatcher::spawn(
            Box::new(sink.clone()),
            Arc::new(SystemClock),
            options(1000),
            ErrorPolicy::Drop,
        )?;

        for i in 0..10 {
            dispatcher.enqueue(format!("{}\n", i).into_bytes())?;
        }
        dispatcher.shutdown()?;

        assert_eq!(sink.records.lock().unwrap().len(), 10);
        assert!(matches!(
            dispatcher.enqueue(b"late\n".to_vec()),
            Err(LogError::Closed)
        ));
        assert!(matches!(dispatcher.flush(), Err(LogError::Closed)));

        // 重复关闭
        dispatcher.shutdown()?;
        Ok(())
    }

    #[test]
    fn test_dispatcher_ticks() -> Result<()> {
        let sink = MemorySink::default();
        let dispatcher = Dispatcher::spawn(
            Box::new(sink.clone()),
            Arc::new(SystemClock),
            options(5),
            ErrorPolicy::Drop,
        )?;

        thread::sleep(Duration::from_millis(100));
        dispatcher.shutdown()?;

        assert!(sink.ticks.load(Ordering::SeqCst) > 0);
        Ok(())
    }

    #[test]
    fn test_dispatcher_tick_error_is_self_logged_and_reported() -> Result<()> {
        let sink = MemorySink {
            fail_tick: true,
            ..Default::default()
        };
        let (tx, rx) = channel::unbounded();
        let dispatcher = Dispatcher::spawn(
            Box::new(sink.clone()),
            Arc::new(SystemClock),
            options(5),
            ErrorPolicy::Report(tx),
        )?;

        let err = rx
            .recv_timeout(Duration::from_secs(5))
            .map_err(|_| LogError::Closed)?;
        assert!(matches!(err, LogError::Config(_)));
        dispatcher.shutdown()?;

        let records = sink.records.lock().unwrap();
        let first = String::from_utf8_lossy(&records[0]).to_string();
        assert!(first.starts_with(ROTATE_ERROR_PREFIX));
        assert!(first.contains("cannot open"));
        Ok(())
    }

    #[test]
    fn test_dispatcher_concurrent_producers() -> Result<()> {
        let sink = MemorySink::default();
        let dispatcher = Arc::new(Dispatcher::spawn(
            Box::new(sink.clone()),
            Arc::new(SystemClock),
            options(1000),
            ErrorPolicy::Drop,
        )?);

        let handles: Vec<_> = (0..8)
            .map(|p| {
                let dispatcher = Arc::clone(&dispatcher);
                thread::spawn(move || {
                    for k in 0..200 {
                        dispatcher
                            .enqueue(format!("p{}-{}\n", p, k).into_bytes())
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        dispatcher.flush()?;

        let records = sink.records.lock().unwrap();
        assert_eq!(records.len(), 8 * 200);

        // 同一生产者的日志保持入队顺序
        for p in 0..8 {
            let prefix = format!("p{}-", p);
            let seq: Vec<usize> = records
                .iter()
                .map(|r| String::from_utf8_lossy(r).to_string())
                .filter(|r| r.starts_with(&prefix))
                .map(|r| r.trim_end()[prefix.len()..].parse().unwrap())
                .collect();
            assert_eq!(seq, (0..200).collect::<Vec<_>>());
        }
        Ok(())
    }
}
