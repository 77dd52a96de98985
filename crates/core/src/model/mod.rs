mod answer;
mod flashcard;
mod ids;
mod quiz;
mod result;
mod session;
mod stats;

pub use ids::{FlashcardId, ParseIdError, QuizId, SessionId, UserId};

pub use answer::{AnswerError, AnswerEvaluation, MAX_ANSWER_LEN, UserAnswer};
pub use flashcard::{
    Answer, AnswerType, Difficulty, Flashcard, FlashcardDraft, FlashcardError,
    MAX_QUESTION_TITLE_LEN, Question,
};
pub use quiz::{MAX_QUIZ_TITLE_LEN, Quiz, QuizDraft, QuizError, QuizSort};
pub use result::{BreakdownItem, ResultError, TestResult, Verdict};
pub use session::{ParseModeError, Session, SessionCompletion, SessionMode};
pub use stats::{ACTIVITY_WINDOW_DAYS, DailyActivity, DashboardStats, QuizActivity};
