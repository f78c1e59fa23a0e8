//! Difficulty controller: the hysteresis rule that adapts a session's
//! difficulty to answer outcomes.
//!
//! The rule is asymmetric on purpose: one correct answer promotes
//! immediately, but it takes three consecutive misses to demote one level.
//! A single unlucky guess never lowers difficulty.

use crate::model::Session;
use tracing::debug;

/// Misses in a row before difficulty drops one level.
pub const DEMOTION_THRESHOLD: u32 = 3;

/// Update `session.difficulty` and `session.consecutive_wrong` from one
/// graded answer. Pure state transition, no I/O, cannot fail.
pub fn advance(session: &mut Session, answered_correctly: bool) {
    if answered_correctly {
        session.consecutive_wrong = 0;
        session.difficulty = session.difficulty.promote();
    } else {
        session.consecutive_wrong += 1;
        if session.consecutive_wrong >= DEMOTION_THRESHOLD {
            session.difficulty = session.difficulty.demote();
            session.consecutive_wrong = 0;
        }
    }
    debug!(
        difficulty = %session.difficulty,
        consecutive_wrong = session.consecutive_wrong,
        "difficulty advanced"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;

    #[test]
    fn correct_answer_promotes_and_resets_counter() {
        let mut session = Session::new("space");
        session.consecutive_wrong = 2;

        advance(&mut session, true);
        assert_eq!(session.difficulty, Difficulty::Medium);
        assert_eq!(session.consecutive_wrong, 0);
    }

    #[test]
    fn two_correct_answers_reach_hard_from_easy() {
        let mut session = Session::new("space");
        advance(&mut session, true);
        advance(&mut session, true);
        assert_eq!(session.difficulty, Difficulty::Hard);
    }

    #[test]
    fn correct_answers_never_decrease_difficulty() {
        let mut session = Session::new("space");
        let mut previous = session.difficulty;
        for _ in 0..10 {
            advance(&mut session, true);
            assert!(session.difficulty >= previous);
            previous = session.difficulty;
        }
        assert_eq!(session.difficulty, Difficulty::Hard);
    }

    #[test]
    fn single_miss_never_changes_difficulty() {
        let mut session = Session::new("space");
        session.difficulty = Difficulty::Medium;

        advance(&mut session, false);
        assert_eq!(session.difficulty, Difficulty::Medium);
        assert_eq!(session.consecutive_wrong, 1);
    }

    #[test]
    fn three_misses_demote_once_and_reset() {
        let mut session = Session::new("space");
        session.difficulty = Difficulty::Hard;

        advance(&mut session, false);
        advance(&mut session, false);
        assert_eq!(session.difficulty, Difficulty::Hard);

        advance(&mut session, false);
        assert_eq!(session.difficulty, Difficulty::Medium);
        assert_eq!(session.consecutive_wrong, 0);
    }

    #[test]
    fn six_misses_demote_twice() {
        let mut session = Session::new("space");
        session.difficulty = Difficulty::Hard;

        for _ in 0..6 {
            advance(&mut session, false);
        }
        assert_eq!(session.difficulty, Difficulty::Easy);
        assert_eq!(session.consecutive_wrong, 0);
    }

    #[test]
    fn easy_stays_easy_under_misses() {
        let mut session = Session::new("space");
        for _ in 0..9 {
            advance(&mut session, false);
        }
        assert_eq!(session.difficulty, Difficulty::Easy);
    }
}
