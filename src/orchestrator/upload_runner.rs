//! 上传目录的批量模拟

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::loaders::load_raw_files;
use crate::models::upload::{RawFile, UploadStatus};
use crate::services::{NoticeWriter, Notifier};
use crate::upload::UploadSimulator;
use crate::utils::format::format_file_size;
use crate::utils::logging::log_batch_submitted;

/// 上传批次统计
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct UploadStats {
    pub submitted: usize,
    pub admitted: usize,
    pub completed: usize,
    pub rejected: usize,
    pub notices: usize,
    pub generated_questions: u32,
}

/// 扫描上传目录并完成一次批量模拟
pub async fn run_uploads(config: &Config) -> Result<UploadStats> {
    info!("\n📁 正在扫描待上传的文件...");
    let files = load_raw_files(&config.upload_folder)
        .await
        .with_context(|| format!("无法读取上传目录: {}", config.upload_folder))?;

    if files.is_empty() {
        warn!("⚠️ 上传目录中没有文件");
        return Ok(UploadStats::default());
    }

    simulate_batch(files, config).await
}

/// 提交一批文件并等待全部处理结束，通知同时写入记录文件
pub async fn simulate_batch(files: Vec<RawFile>, config: &Config) -> Result<UploadStats> {
    for file in &files {
        info!(
            "  • {} ({}, {})",
            file.name,
            format_file_size(file.size),
            file.content_type
        );
    }

    let (notifier, mut notices) = Notifier::channel();
    let writer = NoticeWriter::with_path(&config.notice_file);

    // 通知记录任务，发送端全部释放后自然结束
    let recorder = tokio::spawn(async move {
        let mut written = 0usize;
        while let Some(notice) = notices.recv().await {
            match writer.write(&notice).await {
                Ok(()) => written += 1,
                Err(e) => error!("❌ 写入通知失败: {}", e),
            }
        }
        written
    });

    let simulator =
        UploadSimulator::from_config(config, notifier).context("无法创建上传模拟器")?;
    let submitted = files.len();
    let admitted = simulator.submit_batch(files);
    log_batch_submitted(submitted, admitted.len());

    simulator.wait_idle().await;

    let candidates = simulator.candidates();
    drop(simulator);

    let notices = recorder.await.context("通知记录任务异常结束")?;

    let completed: Vec<_> = candidates
        .iter()
        .filter(|c| c.status == UploadStatus::Completed)
        .collect();

    Ok(UploadStats {
        submitted,
        admitted: admitted.len(),
        completed: completed.len(),
        rejected: submitted - admitted.len(),
        notices,
        generated_questions: completed.iter().filter_map(|c| c.question_count).sum(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_simulate_batch_counts() {
        let notice_file = std::env::temp_dir().join(format!("notices_{}.txt", uuid::Uuid::new_v4().simple()));
        let config = Config {
            notice_file: notice_file.to_string_lossy().to_string(),
            ..Config::default()
        };

        let stats = simulate_batch(
            vec![
                RawFile::new("notes.txt", 1024, "text/plain"),
                RawFile::new("paper.pdf", 2 * 1024 * 1024, "application/pdf"),
                RawFile::new("photo.png", 20 * 1024 * 1024, "image/png"),
            ],
            &config,
        )
        .await
        .unwrap();

        assert_eq!(stats.submitted, 3);
        assert_eq!(stats.admitted, 2);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.rejected, 1);
        // photo.png 两条拒绝通知 + 两条完成通知
        assert_eq!(stats.notices, 4);
        assert!((10..=24).contains(&stats.generated_questions));

        let lines = std::fs::read_to_string(&notice_file).unwrap().lines().count();
        assert_eq!(lines, 4);
        std::fs::remove_file(&notice_file).unwrap();
    }

    #[tokio::test]
    async fn test_empty_question_range_fails_before_submitting() {
        let config = Config {
            min_generated_questions: 9,
            max_generated_questions: 3,
            ..Config::default()
        };

        let err = simulate_batch(vec![RawFile::new("notes.txt", 10, "text/plain")], &config)
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("question_range"));
    }
}
