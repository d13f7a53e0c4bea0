use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 待上传的原始文件描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFile {
    pub name: String,
    pub size: u64,
    pub content_type: String,
}

impl RawFile {
    pub fn new(name: impl Into<String>, size: u64, content_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            content_type: content_type.into(),
        }
    }
}

/// 上传候选ID，在文件通过校验时生成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(Uuid);

impl CandidateId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// 上传候选状态
///
/// 只会按 Uploading → Processing → Completed 推进。
/// `Error` 预留给真实 I/O 失败，模拟流程从不产生
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Uploading,
    Processing,
    Completed,
    Error,
}

impl UploadStatus {
    /// 界面上显示的状态文字
    pub fn label(&self) -> &'static str {
        match self {
            UploadStatus::Uploading => "uploading",
            UploadStatus::Processing => "Analyzing...",
            UploadStatus::Completed => "completed",
            UploadStatus::Error => "error",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, UploadStatus::Uploading | UploadStatus::Processing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadCandidate {
    pub id: CandidateId,
    pub name: String,
    pub size: u64,
    pub content_type: String,
    pub status: UploadStatus,
    /// 当前阶段进度，0..=100
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_count: Option<u32>,
}

impl UploadCandidate {
    /// 由通过校验的文件创建，初始为 uploading / 0
    pub fn admit(id: CandidateId, file: RawFile) -> Self {
        Self {
            id,
            name: file.name,
            size: file.size,
            content_type: file.content_type,
            status: UploadStatus::Uploading,
            progress: 0,
            question_count: None,
        }
    }

    /// 推进当前阶段进度，进度只增不减
    pub fn set_progress(&mut self, progress: u8) {
        if self.status.is_active() {
            self.progress = self.progress.max(progress.min(100));
        }
    }

    /// uploading → processing，进度归零
    pub fn begin_processing(&mut self) -> bool {
        if self.status != UploadStatus::Uploading {
            return false;
        }
        self.status = UploadStatus::Processing;
        self.progress = 0;
        true
    }

    /// processing → completed，附带生成的题目数量
    pub fn complete(&mut self, question_count: u32) -> bool {
        if self.status != UploadStatus::Processing {
            return false;
        }
        self.status = UploadStatus::Completed;
        self.progress = 100;
        self.question_count = Some(question_count);
        true
    }
}
