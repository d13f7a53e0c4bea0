//! 评分与结果汇总
//!
//! 全部是纯函数，可以在任意阶段重复调用

use serde::Serialize;

use crate::models::question::QuizDefinition;
use crate::session::state::AnswerRecord;
use crate::utils::format::format_elapsed;

/// 达到该分数视为高分
pub const HIGH_SCORE_THRESHOLD: u32 = 80;

/// `part / total` 的整数百分比，0.5 向上取整
pub fn round_percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part * 200 + total) / (2 * total)) as u32
}

/// 统计答对的题数（忽略大小写和首尾空白）
pub fn count_correct(quiz: &QuizDefinition, answers: &AnswerRecord) -> usize {
    quiz.questions
        .iter()
        .filter(|q| {
            answers
                .get(&q.id)
                .is_some_and(|answer| q.is_correct(answer))
        })
        .count()
}

pub fn score_percent(quiz: &QuizDefinition, answers: &AnswerRecord) -> u32 {
    round_percent(count_correct(quiz, answers), quiz.len())
}

/// 单题回顾
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionReview {
    pub question_id: String,
    pub prompt: String,
    pub submitted: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

/// 结果页汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResults {
    pub quiz_id: String,
    pub quiz_title: String,
    pub correct: usize,
    pub incorrect: usize,
    pub total: usize,
    pub score: u32,
    pub elapsed_seconds: u64,
    pub is_high_score: bool,
    pub reviews: Vec<QuestionReview>,
}

impl QuizResults {
    pub fn build(quiz: &QuizDefinition, answers: &AnswerRecord, elapsed_seconds: u64) -> Self {
        let reviews: Vec<QuestionReview> = quiz
            .questions
            .iter()
            .map(|q| {
                let submitted = answers.get(&q.id).cloned();
                QuestionReview {
                    question_id: q.id.clone(),
                    prompt: q.prompt.clone(),
                    is_correct: submitted.as_deref().is_some_and(|a| q.is_correct(a)),
                    submitted,
                    correct_answer: q.correct_answer.clone(),
                    explanation: q.explanation.clone(),
                }
            })
            .collect();

        let correct = reviews.iter().filter(|r| r.is_correct).count();
        let total = reviews.len();
        let score = round_percent(correct, total);

        Self {
            quiz_id: quiz.id.clone(),
            quiz_title: quiz.title.clone(),
            correct,
            incorrect: total - correct,
            total,
            score,
            elapsed_seconds,
            is_high_score: score >= HIGH_SCORE_THRESHOLD,
            reviews,
        }
    }

    /// 结果页徽章文字
    pub fn verdict(&self) -> &'static str {
        if self.is_high_score {
            "Excellent!"
        } else {
            "Good Effort!"
        }
    }

    pub fn formatted_time(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }
}
