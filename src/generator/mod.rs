//! Question generator boundary.
//!
//! The core only depends on the [`QuestionGenerator`] trait; the OpenAI
//! implementation and the scripted test generator live in submodules.

pub mod mock;
pub mod openai;
pub mod prompt;

pub use mock::{GeneratorHandle, ScriptedGenerator};
pub use openai::{OpenAiConfig, OpenAiGenerator};

use crate::error::GeneratorError;
use crate::model::{Difficulty, Question};
use async_trait::async_trait;
use std::fmt::Debug;

/// One generation call. `theme` is present only at session creation; absent
/// means "continue with the established theme context".
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub theme: Option<String>,
    pub difficulty: Difficulty,
    pub batch_size: usize,
}

impl GenerationRequest {
    /// Initial request at session creation: explicit theme, easy level.
    pub fn initial(theme: impl Into<String>, batch_size: usize) -> Self {
        Self {
            theme: Some(theme.into()),
            difficulty: Difficulty::Easy,
            batch_size,
        }
    }

    /// Top-up request: no theme, centered on the session's current level.
    pub fn top_up(difficulty: Difficulty, batch_size: usize) -> Self {
        Self {
            theme: None,
            difficulty,
            batch_size,
        }
    }
}

/// Produces themed multiple-choice questions.
///
/// Implementors may return fewer questions than requested, including zero;
/// callers must tolerate that. Shape validation is the core's job: batches
/// are filtered before anything reaches a session queue, so implementors do
/// not need to pre-validate.
#[async_trait]
pub trait QuestionGenerator: Send + Sync + Debug {
    async fn generate(&self, request: GenerationRequest) -> Result<Vec<Question>, GeneratorError>;

    /// Clone this generator into a boxed trait object
    fn clone_box(&self) -> Box<dyn QuestionGenerator>;
}

impl Clone for Box<dyn QuestionGenerator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[async_trait]
impl QuestionGenerator for Box<dyn QuestionGenerator> {
    async fn generate(&self, request: GenerationRequest) -> Result<Vec<Question>, GeneratorError> {
        self.as_ref().generate(request).await
    }

    fn clone_box(&self) -> Box<dyn QuestionGenerator> {
        self.as_ref().clone_box()
    }
}
