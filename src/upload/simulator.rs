//! 上传处理模拟器
//!
//! ## 职责
//!
//! 1. **校验**：按类型/大小规则过滤文件，每条违规发一条拒绝通知
//! 2. **跟踪**：通过校验的文件成为候选，按提交顺序保存在候选列表中
//! 3. **模拟**：每个候选一个独立任务，按 `ProgressPlan` 逐步推进
//! 4. **移除**：随时移除候选，并终止其任务
//!
//! ## 并发约定
//!
//! - 每个任务只修改自己ID对应的条目，每步修改前先按ID查找，找不到就结束任务
//! - 候选列表的锁不跨越 `.await`
//! - 同一文件的步骤严格按顺序执行，不同文件之间不保证顺序

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::Poll;

use futures::future::poll_fn;
use futures::FutureExt;
use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::notice::Notice;
use crate::models::upload::{CandidateId, RawFile, UploadCandidate};
use crate::services::notifier::Notifier;
use crate::upload::plan::{apply_step, ProgressPlan, ProgressStep};
use crate::upload::validator::UploadRules;

type CandidateList = Arc<Mutex<Vec<UploadCandidate>>>;

pub struct UploadSimulator {
    rules: UploadRules,
    plan: ProgressPlan,
    question_range: RangeInclusive<u32>,
    candidates: CandidateList,
    tasks: Mutex<HashMap<CandidateId, JoinHandle<()>>>,
    notifier: Notifier,
}

impl UploadSimulator {
    /// 题目数量区间为空时返回配置错误
    pub fn new(
        rules: UploadRules,
        plan: ProgressPlan,
        question_range: RangeInclusive<u32>,
        notifier: Notifier,
    ) -> AppResult<Self> {
        if question_range.is_empty() {
            return Err(AppError::invalid_config(
                "question_range",
                format!(
                    "区间 {}..={} 为空",
                    question_range.start(),
                    question_range.end()
                ),
            ));
        }

        Ok(Self {
            rules,
            plan,
            question_range,
            candidates: Arc::new(Mutex::new(Vec::new())),
            tasks: Mutex::new(HashMap::new()),
            notifier,
        })
    }

    pub fn from_config(config: &Config, notifier: Notifier) -> AppResult<Self> {
        Self::new(
            UploadRules::from_config(config),
            ProgressPlan::from_config(config),
            config.question_count_range(),
            notifier,
        )
    }

    /// 提交一批文件
    ///
    /// 需要在 tokio 运行时中调用。返回通过校验的候选ID（按提交顺序）
    pub fn submit_batch(&self, files: impl IntoIterator<Item = RawFile>) -> Vec<CandidateId> {
        let mut admitted = Vec::new();

        for file in files {
            let reasons = self.rules.check(&file);
            if !reasons.is_empty() {
                for reason in reasons {
                    self.notifier.notify(Notice::Rejected {
                        file_name: file.name.clone(),
                        reason,
                    });
                }
                continue;
            }

            let id = self.admit(file);
            admitted.push(id);
        }

        // 先全部入列，再启动任务
        for id in &admitted {
            self.spawn_progress(*id);
        }

        admitted
    }

    fn admit(&self, file: RawFile) -> CandidateId {
        let mut candidates = lock(&self.candidates);

        let mut id = CandidateId::generate();
        while candidates.iter().any(|c| c.id == id) {
            id = CandidateId::generate();
        }

        info!("[文件 {}] 📤 开始上传 (ID: {})", file.name, id);
        candidates.push(UploadCandidate::admit(id, file));
        id
    }

    fn spawn_progress(&self, id: CandidateId) {
        let handle = tokio::spawn(run_progress(
            id,
            Instant::now(),
            self.plan,
            self.question_range.clone(),
            Arc::clone(&self.candidates),
            self.notifier.clone(),
        ));
        let mut tasks = lock(&self.tasks);
        tasks.retain(|_, handle| !handle.is_finished());
        tasks.insert(id, handle);
    }

    /// 移除候选，不论其处于哪个阶段；返回候选此前是否存在
    pub fn remove_candidate(&self, id: CandidateId) -> bool {
        if let Some(handle) = lock(&self.tasks).remove(&id) {
            handle.abort();
        }

        let mut candidates = lock(&self.candidates);
        let before = candidates.len();
        candidates.retain(|c| c.id != id);
        let removed = candidates.len() != before;

        if removed {
            info!("[文件 {}] 🗑️ 已移除", id);
        } else {
            debug!("[文件 {}] 移除时未找到", id);
        }
        removed
    }

    /// 候选列表快照
    pub fn candidates(&self) -> Vec<UploadCandidate> {
        lock(&self.candidates).clone()
    }

    pub fn candidate(&self, id: CandidateId) -> Option<UploadCandidate> {
        lock(&self.candidates).iter().find(|c| c.id == id).cloned()
    }

    /// 仍在运行的模拟任务数量
    pub fn active_tasks(&self) -> usize {
        lock(&self.tasks).values().filter(|h| !h.is_finished()).count()
    }

    /// 等待所有已启动的任务结束
    ///
    /// 句柄在等待期间留在任务表中，只移除已结束的；等待被取消后
    /// `shutdown` 和 `remove_candidate` 仍能终止剩余任务
    pub async fn wait_idle(&self) {
        poll_fn(|cx| {
            let mut tasks = lock(&self.tasks);
            tasks.retain(|id, handle| match handle.poll_unpin(cx) {
                Poll::Ready(Ok(())) => false,
                Poll::Ready(Err(e)) => {
                    if !e.is_cancelled() {
                        warn!("[文件 {}] 模拟任务异常结束: {}", id, e);
                    }
                    false
                }
                Poll::Pending => true,
            });

            if tasks.is_empty() {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await
    }

    /// 终止所有任务，候选保持当前状态
    pub fn shutdown(&self) {
        for (_, handle) in lock(&self.tasks).drain() {
            handle.abort();
        }
    }
}

impl Drop for UploadSimulator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// 单个候选的进度任务
///
/// 每步的截止时间从 `started_at` 起累加，不受任务首次被调度的时间影响
async fn run_progress(
    id: CandidateId,
    started_at: Instant,
    plan: ProgressPlan,
    question_range: RangeInclusive<u32>,
    candidates: CandidateList,
    notifier: Notifier,
) {
    let mut deadline = started_at;
    for step in plan.steps() {
        if let ProgressStep::Advance { delay, .. } = step {
            deadline += delay;
            tokio::time::sleep_until(deadline).await;
        }

        let outcome = with_candidate(&candidates, id, |candidate| {
            let generated = apply_step(candidate, step, || draw_question_count(&question_range));
            (candidate.name.clone(), generated)
        });

        match outcome {
            None => {
                debug!("[文件 {}] 候选已移除，停止模拟", id);
                return;
            }
            Some((file_name, Some(question_count))) => {
                notifier.notify(Notice::Completed {
                    file_name,
                    question_count,
                });
            }
            Some((file_name, None)) => {
                if step == ProgressStep::BeginProcessing {
                    info!("[文件 {}] 🧠 上传完成，开始分析", file_name);
                }
            }
        }
    }
}

/// 按ID查找候选并修改；候选不存在时返回 `None`
fn with_candidate<R>(
    candidates: &Mutex<Vec<UploadCandidate>>,
    id: CandidateId,
    f: impl FnOnce(&mut UploadCandidate) -> R,
) -> Option<R> {
    lock(candidates).iter_mut().find(|c| c.id == id).map(f)
}

fn draw_question_count(range: &RangeInclusive<u32>) -> u32 {
    rand::thread_rng().gen_range(range.clone())
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notice::RejectReason;
    use crate::models::upload::UploadStatus;
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;

    const MIB: u64 = 1024 * 1024;

    fn simulator() -> (UploadSimulator, UnboundedReceiver<Notice>) {
        let (notifier, rx) = Notifier::channel();
        let sim = UploadSimulator::new(
            UploadRules::default(),
            ProgressPlan::default(),
            5..=12,
            notifier,
        )
        .unwrap();
        (sim, rx)
    }

    fn drain(rx: &mut UnboundedReceiver<Notice>) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Ok(notice) = rx.try_recv() {
            notices.push(notice);
        }
        notices
    }

    /// 以 25ms 为粒度推进暂停的时钟，每次推进后让出一次
    async fn run_for(ms: u64) {
        for _ in 0..ms / 25 {
            tokio::time::advance(Duration::from_millis(25)).await;
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_oversized_file_is_rejected() {
        let (sim, mut rx) = simulator();
        let admitted = sim.submit_batch(vec![RawFile::new("big.pdf", 11 * MIB, "application/pdf")]);

        assert!(admitted.is_empty());
        assert!(sim.candidates().is_empty());

        let notices = drain(&mut rx);
        assert_eq!(notices.len(), 1);
        assert!(matches!(
            &notices[0],
            Notice::Rejected { file_name, reason: RejectReason::TooLarge { .. } } if file_name == "big.pdf"
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejection_does_not_block_rest_of_batch() {
        let (sim, mut rx) = simulator();
        let admitted = sim.submit_batch(vec![
            RawFile::new("slides.pptx", 100, "application/vnd.ms-powerpoint"),
            RawFile::new("notes.txt", 1000, "text/plain"),
            RawFile::new("huge.bin", 20 * MIB, "application/octet-stream"),
        ]);

        assert_eq!(admitted.len(), 1);
        let candidates = sim.candidates();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "notes.txt");
        assert_eq!(candidates[0].status, UploadStatus::Uploading);
        assert_eq!(candidates[0].progress, 0);

        // pptx 一条，huge.bin 类型和大小各一条
        assert_eq!(drain(&mut rx).len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_file_runs_to_completion() {
        let (sim, mut rx) = simulator();
        let id = sim.submit_batch(vec![RawFile::new("notes.txt", 1000, "text/plain")])[0];

        let c = sim.candidate(id).unwrap();
        assert_eq!((c.status, c.progress), (UploadStatus::Uploading, 0));

        sim.wait_idle().await;

        let c = sim.candidate(id).unwrap();
        assert_eq!(c.status, UploadStatus::Completed);
        assert_eq!(c.progress, 100);
        let count = c.question_count.unwrap();
        assert!((5..=12).contains(&count));

        let notices = drain(&mut rx);
        assert_eq!(
            notices,
            vec![Notice::Completed {
                file_name: "notes.txt".to_string(),
                question_count: count
            }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_phase_transition_resets_progress() {
        let (sim, _rx) = simulator();
        let id = sim.submit_batch(vec![RawFile::new("doc.pdf", 2048, "application/pdf")])[0];

        // 上传阶段共 11 步，截止时间 100, 200, …, 1100ms
        run_for(450).await;
        let c = sim.candidate(id).unwrap();
        assert_eq!(c.status, UploadStatus::Uploading);
        assert_eq!(c.progress, 30);

        run_for(700).await;
        let c = sim.candidate(id).unwrap();
        assert_eq!(c.status, UploadStatus::Processing);
        assert_eq!(c.progress, 0);

        // 处理阶段截止时间 1250, 1400, …
        run_for(300).await;
        let c = sim.candidate(id).unwrap();
        assert_eq!(c.status, UploadStatus::Processing);
        assert_eq!(c.progress, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_mid_simulation_leaves_no_trace() {
        let (sim, mut rx) = simulator();
        let ids = sim.submit_batch(vec![
            RawFile::new("a.txt", 10, "text/plain"),
            RawFile::new("b.txt", 10, "text/plain"),
        ]);

        run_for(325).await;
        assert!(sim.remove_candidate(ids[0]));
        assert!(!sim.remove_candidate(ids[0]));

        sim.wait_idle().await;

        let candidates = sim.candidates();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, ids[1]);
        assert_eq!(candidates[0].status, UploadStatus::Completed);
        assert!(sim.candidate(ids[0]).is_none());

        let notices = drain(&mut rx);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].file_name(), "b.txt");
    }

    #[tokio::test(start_paused = true)]
    async fn test_step_after_removal_is_noop() {
        let (sim, _rx) = simulator();
        let id = sim.submit_batch(vec![RawFile::new("a.txt", 10, "text/plain")])[0];

        // 直接从列表中删除而不终止任务，任务下一步应自行退出
        lock(&sim.candidates).clear();
        run_for(125).await;

        assert!(sim.candidates().is_empty());
        assert!(with_candidate(&sim.candidates, id, |_| ()).is_none());
        assert_eq!(sim.active_tasks(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_files_progress_independently() {
        let (sim, _rx) = simulator();
        let first = sim.submit_batch(vec![RawFile::new("a.txt", 10, "text/plain")])[0];
        run_for(650).await;
        let second = sim.submit_batch(vec![RawFile::new("b.pdf", 10, "application/pdf")])[0];
        run_for(125).await;

        assert_eq!(sim.candidate(first).unwrap().progress, 60);
        let b = sim.candidate(second).unwrap();
        assert_eq!((b.status, b.progress), (UploadStatus::Uploading, 0));
        assert_ne!(first, second);
    }

    #[test]
    fn test_empty_question_range_is_rejected() {
        let (notifier, _rx) = Notifier::channel();
        #[allow(clippy::reversed_empty_ranges)]
        let range = 5..=4;
        let result = UploadSimulator::new(
            UploadRules::default(),
            ProgressPlan::default(),
            range,
            notifier,
        );

        let err = result.err().unwrap();
        assert!(err.to_string().contains("question_range"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_after_cancelled_wait_stops_tasks() {
        let (sim, mut rx) = simulator();
        let id = sim.submit_batch(vec![RawFile::new("a.txt", 10, "text/plain")])[0];

        let waited = tokio::time::timeout(Duration::from_millis(300), sim.wait_idle()).await;
        assert!(waited.is_err());
        assert_eq!(sim.active_tasks(), 1);

        sim.shutdown();
        let frozen = sim.candidate(id).unwrap();
        assert_eq!(frozen.status, UploadStatus::Uploading);

        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(sim.candidate(id).unwrap(), frozen);
        assert_eq!(sim.active_tasks(), 0);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_handles_are_pruned_on_submit() {
        let (sim, _rx) = simulator();
        sim.submit_batch(vec![RawFile::new("a.txt", 10, "text/plain")]);
        tokio::time::sleep(Duration::from_secs(5)).await;

        sim.submit_batch(vec![RawFile::new("b.txt", 10, "text/plain")]);
        assert_eq!(lock(&sim.tasks).len(), 1);
        assert_eq!(sim.active_tasks(), 1);
    }
}
