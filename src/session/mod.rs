pub mod controller;
pub mod results;
pub mod state;
pub mod ticker;

pub use controller::QuizSession;
pub use results::{QuestionReview, QuizResults, HIGH_SCORE_THRESHOLD};
pub use state::{AnswerRecord, NavigatorEntry, NavigatorStatus, QuizSessionState, SessionPhase};
pub use ticker::ElapsedTicker;
