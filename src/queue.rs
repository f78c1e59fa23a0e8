//! Queue manager: selects the next question for a session and transparently
//! tops up the buffered pool when it runs low.

use crate::config::QuizConfig;
use crate::generator::{GenerationRequest, QuestionGenerator};
use crate::model::{Difficulty, Question, Session};
use tracing::{debug, instrument, warn};

/// Remaining queue length at or below which a top-up is triggered.
pub const LOW_WATER_MARK: usize = 3;
/// Fixed refill batch size, independent of how many are actually needed.
pub const TOP_UP_BATCH: usize = 6;
/// Batch size of the initial generation at session creation.
pub const INITIAL_BATCH: usize = 5;

/// First queue index whose question matches the wanted difficulty.
fn find_at(queue: &[Question], difficulty: Difficulty) -> Option<usize> {
    queue.iter().position(|q| q.difficulty == difficulty)
}

/// Difficulty-matched search with downward fallback: hard may fall back to
/// medium, and hard or medium may fall back to easy.
fn find_matching(session: &Session) -> Option<usize> {
    let mut index = find_at(&session.queue, session.difficulty);
    if index.is_none() && session.difficulty == Difficulty::Hard {
        index = find_at(&session.queue, Difficulty::Medium);
    }
    if index.is_none() && session.difficulty >= Difficulty::Medium {
        index = find_at(&session.queue, Difficulty::Easy);
    }
    index
}

/// Pull the next question for the session, topping up through the generator
/// when nothing matches or the queue is running low.
///
/// Returns `None` only when the queue is empty and a top-up produced nothing;
/// the session stays valid for later calls. Generator failures degrade to "no
/// questions produced" rather than surfacing as errors.
#[instrument(skip(session, generator, config), fields(difficulty = %session.difficulty, queue_len = session.queue.len()))]
pub async fn next_question<G: QuestionGenerator + ?Sized>(
    session: &mut Session,
    generator: &G,
    config: &QuizConfig,
) -> Option<Question> {
    let mut index = find_matching(session);

    if index.is_none() || session.queue.len() <= config.low_water_mark {
        top_up(session, generator, config).await;
        // Exact match only after a refill; if the fresh batch still has
        // nothing at the current level, serve whatever is first.
        // TODO: revisit this fallback; it can hand out a question far off
        // the session's level when the generator ignores the difficulty hint.
        index = find_at(&session.queue, session.difficulty);
        if index.is_none() && !session.queue.is_empty() {
            index = Some(0);
        }
    }

    let index = index?;
    // Removal is by matched index, so queue order is not strictly FIFO
    // across difficulty tiers.
    let question = session.queue.remove(index);
    session.history.push(question.clone());
    debug!(
        queue_len = session.queue.len(),
        history_len = session.history.len(),
        "question selected"
    );
    Some(question)
}

/// Append a fresh batch at the session's current difficulty. The theme is
/// deliberately omitted; the generator continues from its established theme
/// context. Malformed questions are dropped before appending; a failed or
/// empty generation leaves the queue untouched.
pub async fn top_up<G: QuestionGenerator + ?Sized>(
    session: &mut Session,
    generator: &G,
    config: &QuizConfig,
) {
    let request = GenerationRequest::top_up(session.difficulty, config.top_up_batch);
    match generator.generate(request).await {
        Ok(fresh) => {
            let fresh = crate::model::retain_well_formed(fresh);
            debug!(added = fresh.len(), "top-up completed");
            session.queue.extend(fresh);
        }
        Err(e) => {
            warn!(error = %e, "top-up generation failed, continuing with current queue");
        }
    }
}
