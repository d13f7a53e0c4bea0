//! 进度模拟的步骤计划
//!
//! 把"上传 → 处理 → 完成"拆成一串离散步骤：每步先等待固定间隔再更新进度。
//! 计划本身是纯数据，测试可以不经过真实时间直接逐步套用

use std::time::Duration;

use crate::config::Config;
use crate::models::upload::UploadCandidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStep {
    /// 等待 `delay` 后把当前阶段进度设为 `progress`
    Advance { delay: Duration, progress: u8 },
    /// 上传结束，进入处理阶段，进度归零
    BeginProcessing,
    /// 处理结束，生成题目数量
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressPlan {
    pub upload_step: u8,
    pub upload_interval: Duration,
    pub processing_step: u8,
    pub processing_interval: Duration,
}

impl Default for ProgressPlan {
    fn default() -> Self {
        Self {
            upload_step: 10,
            upload_interval: Duration::from_millis(100),
            processing_step: 5,
            processing_interval: Duration::from_millis(150),
        }
    }
}

impl ProgressPlan {
    pub fn from_config(config: &Config) -> Self {
        Self {
            upload_step: config.upload_step,
            upload_interval: Duration::from_millis(config.upload_step_interval_ms),
            processing_step: config.processing_step,
            processing_interval: Duration::from_millis(config.processing_step_interval_ms),
        }
    }

    /// 完整步骤序列
    pub fn steps(&self) -> Vec<ProgressStep> {
        let mut steps = phase_steps(self.upload_step, self.upload_interval);
        steps.push(ProgressStep::BeginProcessing);
        steps.extend(phase_steps(self.processing_step, self.processing_interval));
        steps.push(ProgressStep::Complete);
        steps
    }

    /// 整个序列的总耗时
    pub fn total_duration(&self) -> Duration {
        self.steps()
            .iter()
            .map(|step| match step {
                ProgressStep::Advance { delay, .. } => *delay,
                _ => Duration::ZERO,
            })
            .sum()
    }
}

/// 0, step, 2*step, … 直到 100；步长不能整除 100 时最后补一步 100
fn phase_steps(step: u8, delay: Duration) -> Vec<ProgressStep> {
    let step = step.max(1);
    let mut steps: Vec<ProgressStep> = (0..=100u8)
        .step_by(step as usize)
        .map(|progress| ProgressStep::Advance { delay, progress })
        .collect();

    if !matches!(steps.last(), Some(ProgressStep::Advance { progress: 100, .. })) {
        steps.push(ProgressStep::Advance {
            delay,
            progress: 100,
        });
    }
    steps
}

/// 把一步套用到候选上；完成时返回生成的题目数量
pub fn apply_step(
    candidate: &mut UploadCandidate,
    step: ProgressStep,
    draw_question_count: impl FnOnce() -> u32,
) -> Option<u32> {
    match step {
        ProgressStep::Advance { progress, .. } => {
            candidate.set_progress(progress);
            None
        }
        ProgressStep::BeginProcessing => {
            candidate.begin_processing();
            None
        }
        ProgressStep::Complete => {
            let count = draw_question_count();
            candidate.complete(count).then_some(count)
        }
    }
}
