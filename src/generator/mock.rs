//! Scripted generator for tests: hand it batches (or errors) up front and
//! inspect the requests it received afterwards.

use crate::error::GeneratorError;
use crate::generator::{GenerationRequest, QuestionGenerator};
use crate::model::Question;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Shared handle for scripting responses and observing calls.
#[derive(Debug, Default)]
pub struct GeneratorHandle {
    script: Mutex<VecDeque<Result<Vec<Question>, GeneratorError>>>,
    calls: Mutex<Vec<GenerationRequest>>,
}

impl GeneratorHandle {
    /// Queue a successful batch for the next unanswered call.
    pub fn push_batch(&self, questions: Vec<Question>) {
        self.script.lock().unwrap().push_back(Ok(questions));
    }

    /// Queue an error for the next unanswered call.
    pub fn push_error(&self, error: GeneratorError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    /// All requests received so far, in call order.
    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

/// Generator that replays a script of batches. Once the script runs out it
/// returns empty batches, which is also how an exhausted real generator
/// degrades.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGenerator {
    handle: Arc<GeneratorHandle>,
}

impl ScriptedGenerator {
    pub fn new() -> (Self, Arc<GeneratorHandle>) {
        let handle = Arc::new(GeneratorHandle::default());
        (
            Self {
                handle: handle.clone(),
            },
            handle,
        )
    }
}

#[async_trait]
impl QuestionGenerator for ScriptedGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<Vec<Question>, GeneratorError> {
        self.handle.calls.lock().unwrap().push(request);
        match self.handle.script.lock().unwrap().pop_front() {
            Some(result) => result,
            None => Ok(Vec::new()),
        }
    }

    fn clone_box(&self) -> Box<dyn QuestionGenerator> {
        Box::new(self.clone())
    }
}
