use std::collections::HashMap;

use serde::Serialize;

/// 题目ID → 学员提交的答案；没有条目即未作答
pub type AnswerRecord = HashMap<String, String>;

/// 会话所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    InProgress(usize),
    Results,
}

/// 会话状态快照
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuizSessionState {
    pub current_index: usize,
    pub answers: AnswerRecord,
    pub elapsed_seconds: u64,
    pub results_shown: bool,
}

/// 题目导航条上单个题号的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigatorStatus {
    Current,
    Answered,
    Unanswered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigatorEntry {
    pub index: usize,
    pub question_id: String,
    pub status: NavigatorStatus,
}
