mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::{SessionProgress, TimelineEntry, TimelineStatus};
pub use service::{AnswerRecord, PendingAnswer, SessionPhase, StudySession};
pub use workflow::{SessionAnswerResult, SessionLoopService, SessionOutcome};
