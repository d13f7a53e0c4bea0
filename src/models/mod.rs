pub mod attempt;
pub mod loaders;
pub mod notice;
pub mod question;
pub mod sample;
pub mod upload;

pub use attempt::AttemptRecord;
pub use loaders::{load_all_quiz_files, load_quiz_file, load_raw_files};
pub use notice::{Notice, RejectReason};
pub use question::{normalize_answer, Question, QuestionKind, QuizDefinition};
pub use sample::sample_quiz;
pub use upload::{CandidateId, RawFile, UploadCandidate, UploadStatus};
