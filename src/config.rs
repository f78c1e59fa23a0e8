use crate::queue::{INITIAL_BATCH, LOW_WATER_MARK, TOP_UP_BATCH};
use std::env;
use std::time::Duration;

/// Trait for types that can retrieve their configuration key from environment variables
pub trait KeyFromEnv {
    /// The environment variable name for this client's API key
    const KEY_NAME: &'static str;

    /// Find the API key by checking environment variables first, then .env file
    fn find_key() -> Option<String> {
        // First try to load .env file (silently fail if not found)
        let _ = dotenvy::dotenv();

        env::var(Self::KEY_NAME).ok()
    }
}

/// Tunables for the quiz service. Defaults match the documented batch and
/// refill constants; override per instance when a test needs otherwise.
#[derive(Debug, Clone)]
pub struct QuizConfig {
    /// Time-to-live of a persisted session record.
    pub session_ttl: Duration,
    /// Batch size requested at session creation.
    pub initial_batch: usize,
    /// Batch size requested on every refill.
    pub top_up_batch: usize,
    /// Queue length at or below which a refill is triggered.
    pub low_water_mark: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(3600),
            initial_batch: INITIAL_BATCH,
            top_up_batch: TOP_UP_BATCH,
            low_water_mark: LOW_WATER_MARK,
        }
    }
}
