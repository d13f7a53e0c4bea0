//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 把两个互不相关的视图（答题、上传）放在同一个外壳里运行，并输出统计。
//!
//! ## 模块划分
//!
//! ### `app` - 应用外壳
//! - 管理应用生命周期（初始化、运行）
//! - 加载测验定义，找不到时使用内置示例
//! - 汇总学习统计
//!
//! ### `quiz_runner` - 单个测验的脚本化答题
//! - 打开会话、逐题作答、进入结果页
//!
//! ### `upload_runner` - 上传目录的批量模拟
//! - 收集文件、提交批次、等待全部完成、记录通知
//!
//! ## 层次关系
//!
//! ```text
//! app
//!  ├─ quiz_runner   → session::QuizSession
//!  └─ upload_runner → upload::UploadSimulator → services::Notifier
//! ```
//!
//! 两条分支之间不共享任何状态

pub mod app;
pub mod quiz_runner;
pub mod upload_runner;

pub use app::App;
pub use quiz_runner::{run_quiz, scripted_answer, QuizOutcome};
pub use upload_runner::{run_uploads, UploadStats};
