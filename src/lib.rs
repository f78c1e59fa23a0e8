pub mod config;
pub mod difficulty;
pub mod error;
pub mod generator;
pub mod model;
pub mod queue;
pub mod service;
pub mod store;

// Convenient re-exports
pub use config::QuizConfig;
pub use error::QuizError;
pub use model::{Difficulty, Question, Session};
pub use service::{AnswerOutcome, CreatedSession, QuestionBatchResponse, QuizService};
