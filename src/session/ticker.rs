//! 答题计时器
//!
//! 后台任务按固定间隔累加秒数；进入结果页时冻结（停止任务但保留读数），
//! 重做时归零并重新启动，计时器被丢弃时任务随之终止

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::warn;

pub struct ElapsedTicker {
    elapsed: Arc<AtomicU64>,
    frozen: Arc<AtomicBool>,
    /// `None` 表示手动驱动，只通过 `tick()` 累加
    period: Option<Duration>,
    handle: Option<JoinHandle<()>>,
}

impl ElapsedTicker {
    /// 启动后台计时，需要在 tokio 运行时中调用
    pub fn start(period: Duration) -> Self {
        let mut ticker = Self {
            elapsed: Arc::new(AtomicU64::new(0)),
            frozen: Arc::new(AtomicBool::new(false)),
            period: Some(period),
            handle: None,
        };
        ticker.spawn();
        ticker
    }

    /// 不启动后台任务，由调用方通过 `tick()` 推进
    pub fn manual() -> Self {
        Self {
            elapsed: Arc::new(AtomicU64::new(0)),
            frozen: Arc::new(AtomicBool::new(false)),
            period: None,
            handle: None,
        }
    }

    fn spawn(&mut self) {
        let Some(period) = self.period else {
            return;
        };
        let Ok(runtime) = Handle::try_current() else {
            warn!("⚠️ 当前不在 tokio 运行时中，计时器改为手动模式");
            self.period = None;
            return;
        };

        let elapsed = Arc::clone(&self.elapsed);
        let frozen = Arc::clone(&self.frozen);
        // 起点在创建时确定，不依赖任务首次被调度的时间
        let first_tick = Instant::now() + period;

        self.handle = Some(runtime.spawn(async move {
            let mut ticks = interval_at(first_tick, period);
            loop {
                ticks.tick().await;
                if frozen.load(Ordering::Acquire) {
                    break;
                }
                elapsed.fetch_add(1, Ordering::AcqRel);
            }
        }));
    }

    fn stop_task(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// 手动累加一个单位；冻结后无效
    pub fn tick(&self) {
        if !self.is_frozen() {
            self.elapsed.fetch_add(1, Ordering::AcqRel);
        }
    }

    /// 停止累加，保留当前读数
    pub fn freeze(&mut self) {
        self.frozen.store(true, Ordering::Release);
        self.stop_task();
    }

    /// 归零并重新开始计时
    pub fn restart(&mut self) {
        self.stop_task();
        self.elapsed.store(0, Ordering::Release);
        self.frozen.store(false, Ordering::Release);
        self.spawn();
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.load(Ordering::Acquire)
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    pub fn is_background(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for ElapsedTicker {
    fn drop(&mut self) {
        self.stop_task();
    }
}
