//! Session orchestrator: composes the generator, the queue manager, the
//! difficulty controller, and the session store into the session lifecycle.
//!
//! Every operation is a load / transform / persist transition over one
//! session record. There is no per-session lock here; the store is
//! last-writer-wins and callers are expected to serialize their own requests
//! per session id. Hardening this would mean a per-id mutex or a conditional
//! store update before persisting.

use crate::config::QuizConfig;
use crate::difficulty;
use crate::error::QuizError;
use crate::generator::{GenerationRequest, QuestionGenerator};
use crate::model::{Difficulty, Question, Session};
use crate::queue;
use crate::store::SessionStore;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Result of creating a session: the minted id plus the question already
/// served to the player.
#[derive(Debug, Clone)]
pub struct CreatedSession {
    pub session_id: String,
    pub question: Question,
}

/// Result of grading one answer.
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub explanation: Option<String>,
    pub new_difficulty: Difficulty,
}

/// Result of a batch pull; `total_returned` may be less than requested when
/// the session runs out of content.
#[derive(Debug, Clone)]
pub struct QuestionBatchResponse {
    pub questions: Vec<Question>,
    pub total_returned: usize,
}

/// The only component exposed to the boundary layer. The generator and the
/// store are injected at construction so tests can substitute fakes.
#[derive(Debug, Clone)]
pub struct QuizService<G: QuestionGenerator, S: SessionStore> {
    generator: G,
    store: S,
    config: QuizConfig,
}

impl<G: QuestionGenerator, S: SessionStore> QuizService<G, S> {
    pub fn new(generator: G, store: S, config: QuizConfig) -> Self {
        info!(
            ttl_secs = config.session_ttl.as_secs(),
            initial_batch = config.initial_batch,
            "Creating new QuizService"
        );
        Self {
            generator,
            store,
            config,
        }
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Start a session: seed the queue at easy with an explicit theme, serve
    /// the first question immediately, persist under a fresh id.
    ///
    /// No session is persisted when generation yields nothing.
    #[instrument(skip(self, theme), fields(theme_len = theme.len()))]
    pub async fn create_session(&self, theme: &str) -> Result<CreatedSession, QuizError> {
        let theme = theme.trim();
        if theme.is_empty() {
            return Err(QuizError::InvalidInput("theme is required".to_string()));
        }

        let request = GenerationRequest::initial(theme, self.config.initial_batch);
        let questions = match self.generator.generate(request).await {
            Ok(questions) => crate::model::retain_well_formed(questions),
            Err(e) => {
                warn!(error = %e, "initial generation failed");
                return Err(QuizError::GenerationUnavailable);
            }
        };
        if questions.is_empty() {
            warn!("initial generation yielded no usable questions");
            return Err(QuizError::GenerationUnavailable);
        }

        let mut session = Session::new(theme);
        session.queue = questions;

        // The first generated question is served right away; the last history
        // entry is always the one awaiting grading.
        let first = session.queue.remove(0);
        session.history.push(first.clone());

        let session_id = Uuid::new_v4().to_string();
        self.store
            .save(&session_id, &session, self.config.session_ttl)
            .await?;

        info!(session_id = %session_id, queue_len = session.queue.len(), "session created");
        Ok(CreatedSession {
            session_id,
            question: first,
        })
    }

    /// Serve the next question, topping up transparently when the queue runs
    /// low. `SessionExhausted` means no content could be produced even after
    /// a top-up; the record stays persisted until store expiry.
    #[instrument(skip(self))]
    pub async fn next_question(&self, session_id: &str) -> Result<Question, QuizError> {
        let mut session = self.load_session(session_id).await?;

        let question = queue::next_question(&mut session, &self.generator, &self.config).await;
        self.store
            .save(session_id, &session, self.config.session_ttl)
            .await?;

        question.ok_or(QuizError::SessionExhausted)
    }

    /// Grade an answer against the question awaiting grading, adapt the
    /// difficulty, persist.
    #[instrument(skip(self))]
    pub async fn submit_answer(
        &self,
        session_id: &str,
        answer_index: usize,
    ) -> Result<AnswerOutcome, QuizError> {
        if answer_index >= crate::model::OPTION_COUNT {
            return Err(QuizError::InvalidInput(format!(
                "answer_index must be 0-3, got {}",
                answer_index
            )));
        }

        let mut session = self.load_session(session_id).await?;
        let current = session
            .current_question()
            .cloned()
            .ok_or(QuizError::NoActiveQuestion)?;

        let correct = answer_index == current.correct_index;
        difficulty::advance(&mut session, correct);

        self.store
            .save(session_id, &session, self.config.session_ttl)
            .await?;

        info!(correct, new_difficulty = %session.difficulty, "answer graded");
        Ok(AnswerOutcome {
            correct,
            explanation: current.explanation,
            new_difficulty: session.difficulty,
        })
    }

    /// Pull up to `count` questions in one round-trip, stopping early on
    /// exhaustion. The session is persisted once, after the whole pull.
    #[instrument(skip(self))]
    pub async fn next_batch(
        &self,
        session_id: &str,
        count: usize,
    ) -> Result<QuestionBatchResponse, QuizError> {
        let mut session = self.load_session(session_id).await?;

        let mut questions = Vec::new();
        for _ in 0..count {
            match queue::next_question(&mut session, &self.generator, &self.config).await {
                Some(question) => questions.push(question),
                None => break,
            }
        }

        self.store
            .save(session_id, &session, self.config.session_ttl)
            .await?;

        let total_returned = questions.len();
        Ok(QuestionBatchResponse {
            questions,
            total_returned,
        })
    }

    async fn load_session(&self, session_id: &str) -> Result<Session, QuizError> {
        if session_id.is_empty() {
            return Err(QuizError::InvalidInput("sessionId missing".to_string()));
        }
        self.store
            .load(session_id)
            .await?
            .ok_or(QuizError::SessionNotFound)
    }
}
