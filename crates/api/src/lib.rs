#![forbid(unsafe_code)]

pub mod http;
pub mod memory;
pub mod repository;

pub use http::{ApiConfig, HttpBackend};
pub use memory::InMemoryBackend;
pub use repository::{ApiError, Backend, FlashcardRepository, QuizRepository, SessionRepository};
