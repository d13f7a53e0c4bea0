pub mod analytics;
pub mod notice_writer;
pub mod notifier;

pub use analytics::{LearningStats, StatsSummary};
pub use notice_writer::NoticeWriter;
pub use notifier::Notifier;
