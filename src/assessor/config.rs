use std::time::Duration;

use crate::assessor::constants::{ASSESS_DEADLINE, MIN_AUDIO_BYTES};

#[derive(Debug, Clone)]
pub struct AssessorConfig {
    /// Wall-clock budget for one assessment-service call. A single attempt
    /// is made; elapsing the deadline falls back to synthetic scoring.
    pub assess_deadline: Duration,
    /// Uploads below this size are treated as empty or corrupted.
    pub min_audio_bytes: u64,
    pub language: String,
    pub enable_miscue: bool,
}

impl Default for AssessorConfig {
    fn default() -> Self {
        Self {
            assess_deadline: ASSESS_DEADLINE,
            min_audio_bytes: MIN_AUDIO_BYTES,
            language: "en-US".to_string(),
            enable_miscue: true,
        }
    }
}
