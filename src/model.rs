//! Core data model: questions, the difficulty ladder, and per-session state.
//!
//! Everything here is plain data that serde round-trips through the session
//! store and that schemars turns into the generation tool schema.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of answer options every question must carry.
pub const OPTION_COUNT: usize = 4;

/// The three-level difficulty ladder.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// One step up the ladder; `Hard` stays `Hard`.
    pub fn promote(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium | Difficulty::Hard => Difficulty::Hard,
        }
    }

    /// One step down the ladder; `Easy` stays `Easy`.
    pub fn demote(self) -> Self {
        match self {
            Difficulty::Hard => Difficulty::Medium,
            Difficulty::Medium | Difficulty::Easy => Difficulty::Easy,
        }
    }

    /// Wire/label form, e.g. for prompts and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single multiple-choice question. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Question {
    /// The question text shown to the player.
    #[serde(rename = "question")]
    pub text: String,
    /// Exactly four unique answer options.
    pub options: Vec<String>,
    /// Index of the correct option, 0-3.
    pub correct_index: usize,
    pub difficulty: Difficulty,
    /// Shown after grading; optional because the model may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    /// Shape validation for generator output. A question failing this is
    /// treated as absent, never surfaced to the player.
    pub fn is_well_formed(&self) -> bool {
        if self.text.is_empty() || self.options.len() != OPTION_COUNT {
            return false;
        }
        if self.correct_index >= self.options.len() {
            return false;
        }
        // All four options must be distinct.
        for (i, opt) in self.options.iter().enumerate() {
            if opt.is_empty() || self.options[..i].contains(opt) {
                return false;
            }
        }
        true
    }
}

/// Wire shape of one generation result; also the schemars root for the
/// `generate_quiz_questions` tool parameters.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QuestionBatch {
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Drop every question failing shape validation, warning per rejection.
/// A malformed question is treated as absent, never queued or served.
pub fn retain_well_formed(questions: Vec<Question>) -> Vec<Question> {
    questions
        .into_iter()
        .filter(|q| {
            let ok = q.is_well_formed();
            if !ok {
                tracing::warn!(question = %q.text, "dropping malformed question from batch");
            }
            ok
        })
        .collect()
}

/// One player's in-progress quiz run. Persisted whole-record in the session
/// store; the last `history` entry is always the question awaiting grading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub theme: String,
    /// Buffered, not-yet-served questions.
    pub queue: Vec<Question>,
    /// Questions already served, ask-order, most recent last. Append-only.
    pub history: Vec<Question>,
    pub difficulty: Difficulty,
    pub consecutive_wrong: u32,
}

impl Session {
    /// Fresh session: easy difficulty, clean miss counter, empty history.
    pub fn new(theme: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
            queue: Vec::new(),
            history: Vec::new(),
            difficulty: Difficulty::Easy,
            consecutive_wrong: 0,
        }
    }

    /// The question currently awaiting grading, if any.
    pub fn current_question(&self) -> Option<&Question> {
        self.history.last()
    }
}
