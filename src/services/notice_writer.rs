//! 通知记录服务 - 业务能力层
//!
//! 只负责把通知追加写入记录文件，不关心通知从哪里来

use std::path::PathBuf;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::notice::Notice;

/// 通知记录服务
///
/// 每条通知一行：时间 | 标题 | 描述
pub struct NoticeWriter {
    notice_file_path: PathBuf,
}

impl NoticeWriter {
    pub fn new() -> Self {
        Self::with_path("notices.txt")
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            notice_file_path: path.into(),
        }
    }

    pub async fn write(&self, notice: &Notice) -> AppResult<()> {
        debug!("写入通知: {} | {}", notice.file_name(), notice.title());

        let path_display = self.notice_file_path.display().to_string();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.notice_file_path)
            .await
            .map_err(|e| AppError::file_write_failed(&path_display, e))?;

        let line = format!(
            "{} | {} | {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            notice.title(),
            notice.description()
        );

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| AppError::file_write_failed(&path_display, e))?;

        Ok(())
    }
}

impl Default for NoticeWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notice::RejectReason;
    use tokio_test::assert_ok;

    #[test]
    fn test_write_to_missing_directory_fails() {
        let writer = NoticeWriter::with_path("/definitely/not/here/notices.txt");
        let result = tokio_test::block_on(writer.write(&Notice::Completed {
            file_name: "a.txt".to_string(),
            question_count: 5,
        }));
        assert!(result.unwrap_err().to_string().contains("写入文件失败"));
    }

    #[tokio::test]
    async fn test_appends_one_line_per_notice() {
        let path = std::env::temp_dir().join(format!("notices_{}.txt", uuid::Uuid::new_v4().simple()));
        let writer = NoticeWriter::with_path(&path);

        assert_ok!(
            writer
                .write(&Notice::Rejected {
                    file_name: "slides.pptx".to_string(),
                    reason: RejectReason::UnsupportedType {
                        content_type: "application/vnd.ms-powerpoint".to_string(),
                    },
                })
                .await
        );
        assert_ok!(
            writer
                .write(&Notice::Completed {
                    file_name: "notes.txt".to_string(),
                    question_count: 7,
                })
                .await
        );

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Invalid file type"));
        assert!(lines[1].contains("Generated 7 questions from notes.txt."));

        std::fs::remove_file(&path).unwrap();
    }
}
