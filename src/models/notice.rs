//! 面向用户的通知
//!
//! 对应界面上的 toast，由界面层自行渲染

use serde::Serialize;
use thiserror::Error;

use crate::utils::format::format_file_size;

/// 文件未通过校验的原因
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RejectReason {
    #[error("unsupported content type: {content_type}")]
    UnsupportedType { content_type: String },
    #[error("size {size} exceeds limit {limit}")]
    TooLarge { size: u64, limit: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    Rejected {
        file_name: String,
        reason: RejectReason,
    },
    Completed {
        file_name: String,
        question_count: u32,
    },
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::Rejected {
                reason: RejectReason::UnsupportedType { .. },
                ..
            } => "Invalid file type",
            Notice::Rejected {
                reason: RejectReason::TooLarge { .. },
                ..
            } => "File too large",
            Notice::Completed { .. } => "Document processed successfully!",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Notice::Rejected {
                file_name,
                reason: RejectReason::UnsupportedType { .. },
            } => format!(
                "{} is not supported. Please upload PDF or TXT files only.",
                file_name
            ),
            Notice::Rejected {
                file_name,
                reason: RejectReason::TooLarge { limit, .. },
            } => format!("{} exceeds the {} limit.", file_name, format_file_size(*limit)),
            Notice::Completed {
                file_name,
                question_count,
            } => format!(
                "Generated {} questions from {}.",
                question_count, file_name
            ),
        }
    }

    /// 是否为错误类通知（界面上用 destructive 样式）
    pub fn is_destructive(&self) -> bool {
        matches!(self, Notice::Rejected { .. })
    }

    pub fn file_name(&self) -> &str {
        match self {
            Notice::Rejected { file_name, .. } | Notice::Completed { file_name, .. } => file_name,
        }
    }
}
