use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::assessor::constants::{DEFAULT_SPEECH_SPEED, DEFAULT_VOICE};
use crate::scoring::{LetterScore, PhonemeObservation};

/// Grading scale requested from the assessment service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradingSystem {
    HundredMark,
}

/// Granularity of the per-segment annotations requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    Phoneme,
    Word,
    FullText,
}

/// Configuration sent alongside every assessment-service call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    pub language: String,
    pub grading: GradingSystem,
    pub granularity: Granularity,
    pub enable_miscue: bool,
}

/// Headline scores reported by the service; anything missing reads as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineScores {
    pub pronunciation: f32,
    pub accuracy: f32,
    pub fluency: f32,
    pub completeness: f32,
}

/// Outcome of one assessment-service invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionOutcome {
    Recognized {
        transcript: String,
        scores: HeadlineScores,
        observations: Vec<PhonemeObservation>,
    },
    NoSpeech,
    Canceled {
        reason: String,
    },
}

/// Synthesized reference-pronunciation clip attached to a result on
/// request. The audio travels as a base64 data URL, ready for playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceClip {
    pub data: String,
    pub voice_name: String,
    pub speed: f32,
    pub text: String,
}

impl ReferenceClip {
    pub fn from_audio(audio: &Bytes, voice_name: &str, speed: f32, text: &str) -> Self {
        Self {
            data: format!("data:audio/mpeg;base64,{}", BASE64_STANDARD.encode(audio)),
            voice_name: voice_name.to_string(),
            speed,
            text: text.to_string(),
        }
    }
}

/// Voice parameters for the optional reference clip.
#[derive(Debug, Clone)]
pub struct ReferenceRequest {
    pub voice_name: String,
    pub speed: f32,
}

impl Default for ReferenceRequest {
    fn default() -> Self {
        Self {
            voice_name: DEFAULT_VOICE.to_string(),
            speed: DEFAULT_SPEECH_SPEED,
        }
    }
}

/// Caller-facing assessment result. Always fully populated: every numeric
/// field has a value and `phonemes` covers each letter of `word`, whichever
/// internal path produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub word: String,
    pub recognized_text: String,
    pub phonemes: Vec<LetterScore>,
    pub pronunciation_score: f32,
    pub accuracy_score: f32,
    pub fluency_score: f32,
    pub completeness_score: f32,
    pub audio_url: String,
    pub feedback_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_clip: Option<ReferenceClip>,
}
