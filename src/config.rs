use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::error::{AppError, AppResult, ConfigError};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 答题计时器的步进间隔（毫秒）
    pub tick_interval_ms: u64,
    /// 上传阶段每步增加的进度
    pub upload_step: u8,
    /// 上传阶段每步间隔（毫秒）
    pub upload_step_interval_ms: u64,
    /// 处理阶段每步增加的进度
    pub processing_step: u8,
    /// 处理阶段每步间隔（毫秒）
    pub processing_step_interval_ms: u64,
    /// 生成题目数量下限
    pub min_generated_questions: u32,
    /// 生成题目数量上限（包含）
    pub max_generated_questions: u32,
    /// 单个文件大小上限（字节，包含）
    pub max_file_size: u64,
    /// 测验 TOML 文件目录
    pub quiz_folder: String,
    /// 待上传文件目录
    pub upload_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 通知记录文件
    pub notice_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            upload_step: 10,
            upload_step_interval_ms: 100,
            processing_step: 5,
            processing_step_interval_ms: 150,
            min_generated_questions: 5,
            max_generated_questions: 12,
            max_file_size: 10 * 1024 * 1024,
            quiz_folder: "quizzes".to_string(),
            upload_folder: "uploads".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            notice_file: "notices.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            tick_interval_ms: parse_env("TICK_INTERVAL_MS", default.tick_interval_ms),
            upload_step: parse_env("UPLOAD_STEP", default.upload_step),
            upload_step_interval_ms: parse_env("UPLOAD_STEP_INTERVAL_MS", default.upload_step_interval_ms),
            processing_step: parse_env("PROCESSING_STEP", default.processing_step),
            processing_step_interval_ms: parse_env("PROCESSING_STEP_INTERVAL_MS", default.processing_step_interval_ms),
            min_generated_questions: parse_env("MIN_GENERATED_QUESTIONS", default.min_generated_questions),
            max_generated_questions: parse_env("MAX_GENERATED_QUESTIONS", default.max_generated_questions),
            max_file_size: parse_env("MAX_FILE_SIZE", default.max_file_size),
            quiz_folder: std::env::var("QUIZ_FOLDER").unwrap_or(default.quiz_folder),
            upload_folder: std::env::var("UPLOAD_FOLDER").unwrap_or(default.upload_folder),
            verbose_logging: parse_env("VERBOSE_LOGGING", default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            notice_file: std::env::var("NOTICE_FILE").unwrap_or(default.notice_file),
        }
    }

    /// 检查配置是否能驱动模拟流程
    pub fn validate(&self) -> AppResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(AppError::invalid_config("tick_interval_ms", "不能为 0"));
        }
        if self.upload_step_interval_ms == 0 || self.processing_step_interval_ms == 0 {
            return Err(AppError::invalid_config("step_interval_ms", "不能为 0"));
        }
        if self.upload_step == 0 || self.upload_step > 100 {
            return Err(AppError::invalid_config("upload_step", "必须在 1..=100 之间"));
        }
        if self.processing_step == 0 || self.processing_step > 100 {
            return Err(AppError::invalid_config("processing_step", "必须在 1..=100 之间"));
        }
        if self.min_generated_questions == 0 {
            return Err(AppError::invalid_config("min_generated_questions", "必须为正数"));
        }
        if self.min_generated_questions > self.max_generated_questions {
            return Err(AppError::invalid_config(
                "max_generated_questions",
                format!(
                    "上限 {} 小于下限 {}",
                    self.max_generated_questions, self.min_generated_questions
                ),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn question_count_range(&self) -> RangeInclusive<u32> {
        self.min_generated_questions..=self.max_generated_questions
    }
}

/// 读取并解析环境变量，缺失或解析失败时回退到默认值
fn parse_env<T: FromStr>(var_name: &str, default: T) -> T {
    match std::env::var(var_name) {
        Ok(value) => match value.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                let err = ConfigError::EnvVarParseFailed {
                    var_name: var_name.to_string(),
                    value,
                    expected_type: std::any::type_name::<T>().to_string(),
                };
                warn!("⚠️ {}，使用默认值", err);
                default
            }
        },
        Err(_) => default,
    }
}
