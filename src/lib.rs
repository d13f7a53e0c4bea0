//! # Quiz Studio
//!
//! 学习平台的客户端核心：答题会话与上传处理模拟
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 测验、题目、上传候选、通知等数据结构
//! - `models/loaders` - 从 TOML 加载测验、从目录收集待上传文件
//!
//! ### ② 业务能力层（Services）
//! - `Notifier` - 把通知投递给界面层
//! - `NoticeWriter` - 把通知写入记录文件
//! - `LearningStats` - 内存中的学习统计
//!
//! ### ③ 状态机层
//! - `session/` - 答题会话：导航、作答、评分、计时
//! - `upload/` - 上传模拟：校验、逐步推进进度、移除
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 把两个视图放在同一个外壳里运行并输出统计
//!
//! 答题与上传两部分互不依赖，也不共享状态

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod session;
pub mod upload;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Notice, QuizDefinition, RawFile, UploadCandidate, UploadStatus};
pub use orchestrator::App;
pub use session::{QuizResults, QuizSession, SessionPhase};
pub use upload::UploadSimulator;
