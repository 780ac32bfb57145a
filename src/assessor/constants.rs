use std::time::Duration;

pub(crate) const ASSESS_DEADLINE: Duration = Duration::from_secs(15);
pub(crate) const MIN_AUDIO_BYTES: u64 = 100;
pub(crate) const FALLBACK_OVERALL_SCORE: f32 = 25.0;
pub(crate) const DEFAULT_VOICE: &str = "en-US-JennyNeural";
pub(crate) const DEFAULT_SPEECH_SPEED: f32 = 0.7;
