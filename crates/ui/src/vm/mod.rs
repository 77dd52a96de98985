mod dashboard_vm;
mod editor_vm;
mod quiz_vm;
mod result_vm;
mod session_vm;
mod time_fmt;

pub use dashboard_vm::{
    ActivityBarVm, DashboardVm, RecentSessionVm, StatCardVm, map_dashboard, map_recent_session,
};
pub use editor_vm::{
    FlashcardFormVm, QuizFormVm, answer_type_from_value, answer_type_value,
    difficulty_from_value, difficulty_value, save_error_message,
};
pub use quiz_vm::{
    FlashcardRowVm, QuizCardVm, answer_type_label, cards_label, map_flashcard_rows,
    map_quiz_cards, sort_from_value, sort_value,
};
pub use result_vm::{ResultRowVm, ResultVm, map_result};
pub use session_vm::{
    AnswerInputKind, FeedbackVm, PromptVm, SessionIntent, SessionVm, TimelineItemVm,
    start_session,
};
pub use time_fmt::{format_datetime, format_duration};
