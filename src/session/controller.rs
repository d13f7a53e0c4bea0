//! 测验会话控制器
//!
//! 状态机：`InProgress(i)` ↔ `InProgress(j)`，最后一题 `go_to_next` 进入 `Results`，
//! `Results` 只能通过 `reset` 回到 `InProgress(0)`。
//!
//! 所有操作都不返回错误：越界跳转、首题后退、结果页中的导航都被静默忽略

use std::time::Duration;

use tracing::{debug, info};

use crate::error::AppResult;
use crate::models::attempt::AttemptRecord;
use crate::models::question::{Question, QuizDefinition};
use crate::session::results::{round_percent, score_percent, QuizResults};
use crate::session::state::{
    AnswerRecord, NavigatorEntry, NavigatorStatus, QuizSessionState, SessionPhase,
};
use crate::session::ticker::ElapsedTicker;
use crate::utils::format::format_elapsed;
use crate::utils::logging::truncate_text;

pub struct QuizSession {
    quiz: QuizDefinition,
    current_index: usize,
    answers: AnswerRecord,
    /// 当前题目输入框/选项中显示的答案，切题时从 `answers` 重新载入
    displayed_answer: String,
    results_shown: bool,
    ticker: ElapsedTicker,
}

impl QuizSession {
    /// 打开会话并启动后台计时，需要在 tokio 运行时中调用
    pub fn open(quiz: QuizDefinition, tick_interval: Duration) -> AppResult<Self> {
        Self::with_ticker(quiz, ElapsedTicker::start(tick_interval))
    }

    /// 打开会话，计时由调用方通过 `tick()` 推进
    pub fn open_manual(quiz: QuizDefinition) -> AppResult<Self> {
        Self::with_ticker(quiz, ElapsedTicker::manual())
    }

    fn with_ticker(quiz: QuizDefinition, ticker: ElapsedTicker) -> AppResult<Self> {
        quiz.validate()?;
        info!(
            "[测验 {}] 📝 开始答题: {} (共 {} 题)",
            quiz.id,
            quiz.title,
            quiz.len()
        );

        Ok(Self {
            quiz,
            current_index: 0,
            answers: AnswerRecord::new(),
            displayed_answer: String::new(),
            results_shown: false,
            ticker,
        })
    }

    // ========== 读取 ==========

    pub fn quiz(&self) -> &QuizDefinition {
        &self.quiz
    }

    pub fn phase(&self) -> SessionPhase {
        if self.results_shown {
            SessionPhase::Results
        } else {
            SessionPhase::InProgress(self.current_index)
        }
    }

    pub fn state(&self) -> QuizSessionState {
        QuizSessionState {
            current_index: self.current_index,
            answers: self.answers.clone(),
            elapsed_seconds: self.ticker.elapsed_seconds(),
            results_shown: self.results_shown,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        // current_index 始终小于题目数，open 时已保证题目非空
        &self.quiz.questions[self.current_index]
    }

    pub fn displayed_answer(&self) -> &str {
        &self.displayed_answer
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.quiz
            .questions
            .iter()
            .filter(|q| self.answers.contains_key(&q.id))
            .count()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.quiz.len()
    }

    pub fn is_results_shown(&self) -> bool {
        self.results_shown
    }

    /// 界面层的"下一题"按钮是否可用：当前显示的答案非空白
    pub fn can_advance(&self) -> bool {
        !self.results_shown && !self.displayed_answer.trim().is_empty()
    }

    /// 进度条百分比，按"第几题 / 总题数"计算
    pub fn progress_percent(&self) -> u32 {
        round_percent(self.current_index + 1, self.quiz.len())
    }

    /// 题目导航条
    pub fn navigator(&self) -> Vec<NavigatorEntry> {
        self.quiz
            .questions
            .iter()
            .enumerate()
            .map(|(index, q)| {
                let status = if index == self.current_index {
                    NavigatorStatus::Current
                } else if self.answers.contains_key(&q.id) {
                    NavigatorStatus::Answered
                } else {
                    NavigatorStatus::Unanswered
                };
                NavigatorEntry {
                    index,
                    question_id: q.id.clone(),
                    status,
                }
            })
            .collect()
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.ticker.elapsed_seconds()
    }

    pub fn format_elapsed(&self) -> String {
        format_elapsed(self.elapsed_seconds())
    }

    // ========== 操作 ==========

    /// 记录当前题目的答案，覆盖之前的答案
    pub fn select_answer(&mut self, answer: impl Into<String>) {
        if self.results_shown {
            debug!("[测验 {}] 结果页中忽略作答", self.quiz.id);
            return;
        }

        let answer = answer.into();
        let question_id = self.current_question().id.clone();
        debug!(
            "[测验 {}] 第 {} 题作答: {}",
            self.quiz.id,
            self.current_index + 1,
            truncate_text(&answer, 40)
        );

        self.displayed_answer = answer.clone();
        self.answers.insert(question_id, answer);
    }

    /// 下一题；最后一题时进入结果页并冻结计时
    ///
    /// 不检查当前题是否已作答，该限制由界面层通过 `can_advance` 实现
    pub fn go_to_next(&mut self) {
        if self.results_shown {
            debug!("[测验 {}] 已在结果页，忽略下一题", self.quiz.id);
            return;
        }

        if self.is_last_question() {
            self.results_shown = true;
            self.ticker.freeze();
            info!(
                "[测验 {}] 🏁 答题完成: 得分 {}%，用时 {}",
                self.quiz.id,
                self.compute_score(),
                self.format_elapsed()
            );
        } else {
            self.current_index += 1;
            self.sync_displayed_answer();
        }
    }

    /// 上一题；已在第一题时忽略
    pub fn go_to_previous(&mut self) {
        if self.results_shown || self.current_index == 0 {
            debug!("[测验 {}] 忽略上一题", self.quiz.id);
            return;
        }

        self.current_index -= 1;
        self.sync_displayed_answer();
    }

    /// 跳转到指定题目；越界时保持当前位置，返回是否跳转
    pub fn jump_to(&mut self, index: usize) -> bool {
        if self.results_shown || index >= self.quiz.len() {
            debug!(
                "[测验 {}] 忽略跳转: 目标 {}，题目数 {}",
                self.quiz.id,
                index,
                self.quiz.len()
            );
            return false;
        }

        self.current_index = index;
        self.sync_displayed_answer();
        true
    }

    /// 当前答案的得分百分比，不改变任何状态
    pub fn compute_score(&self) -> u32 {
        score_percent(&self.quiz, &self.answers)
    }

    /// 结果页汇总，只在 `Results` 阶段返回
    pub fn results(&self) -> Option<QuizResults> {
        self.results_shown
            .then(|| QuizResults::build(&self.quiz, &self.answers, self.elapsed_seconds()))
    }

    /// 完成记录，供学习统计使用
    pub fn attempt_record(&self) -> Option<AttemptRecord> {
        self.results_shown.then(|| AttemptRecord {
            quiz_id: self.quiz.id.clone(),
            quiz_title: self.quiz.title.clone(),
            score: self.compute_score(),
            elapsed_seconds: self.elapsed_seconds(),
            finished_at: chrono::Local::now(),
        })
    }

    /// 重做：清空答案、回到第一题、计时归零
    pub fn reset(&mut self) {
        self.answers.clear();
        self.current_index = 0;
        self.displayed_answer.clear();
        self.results_shown = false;
        self.ticker.restart();
        info!("[测验 {}] 🔄 重新开始", self.quiz.id);
    }

    /// 手动推进计时一个单位
    pub fn tick(&self) {
        if !self.results_shown {
            self.ticker.tick();
        }
    }

    /// 关闭会话，停止计时
    pub fn close(self) {
        info!("[测验 {}] 关闭会话", self.quiz.id);
    }

    fn sync_displayed_answer(&mut self) {
        let question_id = &self.quiz.questions[self.current_index].id;
        self.displayed_answer = self.answers.get(question_id).cloned().unwrap_or_default();
    }
}
