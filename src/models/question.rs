use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// 题型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "single-select", alias = "multiple-choice")]
    SingleSelect,
    #[serde(rename = "fill-blank")]
    FillBlank,
    #[serde(rename = "short-answer")]
    ShortAnswer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub kind: QuestionKind,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    /// 判断答案是否正确（忽略大小写和首尾空白）
    pub fn is_correct(&self, answer: &str) -> bool {
        normalize_answer(answer) == normalize_answer(&self.correct_answer)
    }

    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }
}

/// 测验定义
///
/// `questions` 的顺序就是展示顺序，加载后不再变化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<Question>,
}

impl QuizDefinition {
    /// 检查题目列表非空、ID 唯一、标准答案非空、单选题带选项
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.is_empty() {
            return Err(QuizError::EmptyQuiz {
                quiz_id: self.id.clone(),
            });
        }

        let mut seen = HashSet::with_capacity(self.questions.len());
        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(QuizError::DuplicateQuestionId {
                    quiz_id: self.id.clone(),
                    question_id: question.id.clone(),
                });
            }
            if question.correct_answer.trim().is_empty() {
                return Err(QuizError::BlankAnswer {
                    question_id: question.id.clone(),
                });
            }
            if question.kind == QuestionKind::SingleSelect && question.options().is_empty() {
                return Err(QuizError::MissingOptions {
                    question_id: question.id.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// 答案归一化：去掉首尾空白并转小写
pub fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}
