//! 学习统计 - 业务能力层
//!
//! 汇总本进程内完成的测验记录，不做持久化

use std::collections::HashMap;

use serde::Serialize;

use crate::models::attempt::AttemptRecord;
use crate::session::results::HIGH_SCORE_THRESHOLD;

#[derive(Debug, Default)]
pub struct LearningStats {
    attempts: Vec<AttemptRecord>,
}

/// 统计概览
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    pub total_attempts: usize,
    pub average_score: Option<u32>,
    pub high_score_attempts: usize,
    pub total_study_seconds: u64,
    pub best_scores: HashMap<String, u32>,
}

impl LearningStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, attempt: AttemptRecord) {
        tracing::debug!(
            "记录测验完成: {} 得分 {}%",
            attempt.quiz_title,
            attempt.score
        );
        self.attempts.push(attempt);
    }

    pub fn total_attempts(&self) -> usize {
        self.attempts.len()
    }

    /// 平均分，四舍五入；没有记录时为 `None`
    pub fn average_score(&self) -> Option<u32> {
        if self.attempts.is_empty() {
            return None;
        }
        let total: u64 = self.attempts.iter().map(|a| u64::from(a.score)).sum();
        let n = self.attempts.len() as u64;
        Some(((total * 2 + n) / (2 * n)) as u32)
    }

    pub fn best_score(&self, quiz_id: &str) -> Option<u32> {
        self.attempts
            .iter()
            .filter(|a| a.quiz_id == quiz_id)
            .map(|a| a.score)
            .max()
    }

    pub fn total_study_seconds(&self) -> u64 {
        self.attempts.iter().map(|a| a.elapsed_seconds).sum()
    }

    pub fn high_score_attempts(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| a.score >= HIGH_SCORE_THRESHOLD)
            .count()
    }

    /// 最近的记录，新的在前
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &AttemptRecord> {
        self.attempts.iter().rev().take(limit)
    }

    pub fn summary(&self) -> StatsSummary {
        let mut best_scores = HashMap::new();
        for attempt in &self.attempts {
            best_scores
                .entry(attempt.quiz_id.clone())
                .and_modify(|best: &mut u32| *best = (*best).max(attempt.score))
                .or_insert(attempt.score);
        }

        StatsSummary {
            total_attempts: self.total_attempts(),
            average_score: self.average_score(),
            high_score_attempts: self.high_score_attempts(),
            total_study_seconds: self.total_study_seconds(),
            best_scores,
        }
    }
}
