use chrono::{DateTime, Local};

/// 一次完成的测验记录，只保存在内存中
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptRecord {
    pub quiz_id: String,
    pub quiz_title: String,
    pub score: u32,
    pub elapsed_seconds: u64,
    pub finished_at: DateTime<Local>,
}
