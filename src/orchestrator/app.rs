//! 应用外壳 - 编排层
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写日志文件表头、加载测验定义
//! 2. **答题视图**：逐个运行测验并记录学习统计
//! 3. **上传视图**：对上传目录做一次批量模拟
//! 4. **全局统计**：汇总输出

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, FileError};
use crate::models::loaders::load_all_quiz_files;
use crate::models::question::QuizDefinition;
use crate::models::sample::sample_quiz;
use crate::orchestrator::quiz_runner::run_quiz;
use crate::orchestrator::upload_runner::{run_uploads, UploadStats};
use crate::services::LearningStats;
use crate::utils::format::format_elapsed;
use crate::utils::logging::{init_log_file, log_startup, print_final_stats};

/// 统计中展示的最近完成记录数
const RECENT_ATTEMPTS: usize = 5;

/// 应用主结构
pub struct App {
    config: Config,
    quizzes: Vec<QuizDefinition>,
    stats: LearningStats,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file)?;

        let quizzes = load_quizzes(&config).await?;
        log_startup(quizzes.len(), &config.upload_folder);

        Ok(Self {
            config,
            quizzes,
            stats: LearningStats::new(),
        })
    }

    pub fn quizzes(&self) -> &[QuizDefinition] {
        &self.quizzes
    }

    pub fn stats(&self) -> &LearningStats {
        &self.stats
    }

    /// 运行应用主逻辑
    pub async fn run(&mut self) -> Result<UploadStats> {
        for quiz in self.quizzes.clone() {
            let quiz_id = quiz.id.clone();
            let outcome = match run_quiz(quiz, &self.config).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("[测验 {}] ⚠️ 跳过: {:#}", quiz_id, e);
                    continue;
                }
            };
            if self.config.verbose_logging {
                info!("{}", serde_json::to_string_pretty(&outcome.results)?);
            }
            self.stats.record(outcome.attempt);
        }
        self.log_learning_stats()?;

        let upload_stats = match run_uploads(&self.config).await {
            Ok(stats) => stats,
            Err(e) => {
                warn!("⚠️ 跳过上传模拟: {:#}", e);
                UploadStats::default()
            }
        };

        print_final_stats(
            upload_stats.completed,
            upload_stats.rejected,
            &self.config.output_log_file,
        );

        Ok(upload_stats)
    }

    fn log_learning_stats(&self) -> Result<()> {
        let summary = self.stats.summary();
        info!("\n{}", "=".repeat(60));
        info!("📈 学习统计");
        info!("完成测验: {}", summary.total_attempts);
        if let Some(average) = summary.average_score {
            info!("平均得分: {}%", average);
        }
        info!("高分次数: {}", summary.high_score_attempts);
        info!("学习时长: {}", format_elapsed(summary.total_study_seconds));
        for attempt in self.stats.recent(RECENT_ATTEMPTS) {
            info!(
                "  {} {} | {}% | {}",
                attempt.finished_at.format("%H:%M:%S"),
                attempt.quiz_title,
                attempt.score,
                format_elapsed(attempt.elapsed_seconds)
            );
        }
        info!("{}", serde_json::to_string(&summary)?);
        Ok(())
    }
}

/// 加载测验；目录不存在或为空时使用内置示例
async fn load_quizzes(config: &Config) -> Result<Vec<QuizDefinition>> {
    info!("\n📁 正在扫描测验目录...");
    let quizzes = match load_all_quiz_files(&config.quiz_folder).await {
        Ok(quizzes) => quizzes,
        Err(AppError::File(FileError::DirectoryNotFound { path })) => {
            warn!("⚠️ 测验目录不存在: {}", path);
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    if quizzes.is_empty() {
        info!("使用内置示例测验");
        return Ok(vec![sample_quiz()]);
    }
    Ok(quizzes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{Question, QuestionKind};

    #[tokio::test]
    async fn test_run_skips_quiz_that_cannot_finish() {
        let mut stuck = sample_quiz();
        stuck.id = "stuck".to_string();
        stuck.questions[1] = Question {
            id: "2".to_string(),
            kind: QuestionKind::SingleSelect,
            prompt: "Pick one".to_string(),
            options: Some(vec![" ".to_string(), "Rome".to_string()]),
            correct_answer: "Rome".to_string(),
            explanation: None,
        };

        let mut app = App {
            config: Config {
                upload_folder: "/definitely/not/here".to_string(),
                ..Config::default()
            },
            quizzes: vec![sample_quiz(), stuck],
            stats: LearningStats::new(),
        };

        let upload_stats = app.run().await.unwrap();
        assert_eq!(upload_stats, UploadStats::default());

        assert_eq!(app.stats().total_attempts(), 1);
        let recent: Vec<_> = app.stats().recent(RECENT_ATTEMPTS).collect();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].quiz_id, "1");
        assert_eq!(recent[0].score, 67);
    }
}
