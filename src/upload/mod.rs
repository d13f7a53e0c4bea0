pub mod plan;
pub mod simulator;
pub mod validator;

pub use plan::{apply_step, ProgressPlan, ProgressStep};
pub use simulator::UploadSimulator;
pub use validator::{UploadRules, ACCEPTED_CONTENT_TYPES, DEFAULT_MAX_FILE_SIZE};
