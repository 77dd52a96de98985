mod answer_input;
mod flashcard;
mod results_panel;
mod stat_card;
mod timeline;

pub use answer_input::AnswerInput;
pub use flashcard::{FeedbackPanel, FlashcardView};
pub use results_panel::ResultsPanel;
pub use stat_card::StatCard;
pub use timeline::Timeline;
