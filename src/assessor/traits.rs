use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;

use crate::assessor::types::{AssessmentRequest, RecognitionOutcome};

#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    /// Normalizes an arbitrary compressed recording into a mono 16 kHz
    /// 16-bit PCM waveform at `output`.
    async fn transcode(&self, input: &Path, output: &Path) -> Result<()>;
}

#[async_trait]
pub trait SpeechAssessor: Send + Sync {
    async fn assess(
        &self,
        reference: &str,
        audio: &Path,
        request: &AssessmentRequest,
    ) -> Result<RecognitionOutcome>;
}

#[async_trait]
pub trait ReferenceSynthesizer: Send + Sync {
    /// Renders `text` to encoded audio in the given voice and speech rate.
    /// `Ok(None)` means the synthesizer declined without a hard error.
    async fn synthesize(&self, text: &str, voice: &str, speed: f32) -> Result<Option<Bytes>>;
}
