use crate::assessor::config::AssessorConfig;
use crate::assessor::engine::AssessmentOrchestrator;
use crate::assessor::error::AssessError;
use crate::assessor::traits::{AudioTranscoder, ReferenceSynthesizer, SpeechAssessor};
use crate::assessor::types::{
    AssessmentRequest, HeadlineScores, RecognitionOutcome, ReferenceRequest,
};
use crate::scoring::{LetterStatus, PhonemeObservation};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::sleep;

struct StubTranscoder;

#[async_trait]
impl AudioTranscoder for StubTranscoder {
    async fn transcode(&self, _input: &Path, output: &Path) -> Result<()> {
        tokio::fs::write(output, b"RIFF-stub-wav").await?;
        Ok(())
    }
}

struct FailingTranscoder;

#[async_trait]
impl AudioTranscoder for FailingTranscoder {
    async fn transcode(&self, _input: &Path, _output: &Path) -> Result<()> {
        Err(anyhow!("codec exploded"))
    }
}

struct SilentTranscoder;

#[async_trait]
impl AudioTranscoder for SilentTranscoder {
    async fn transcode(&self, _input: &Path, _output: &Path) -> Result<()> {
        Ok(())
    }
}

struct ScriptedAssessor {
    outcome: RecognitionOutcome,
}

impl ScriptedAssessor {
    fn new(outcome: RecognitionOutcome) -> Self {
        Self { outcome }
    }
}

#[async_trait]
impl SpeechAssessor for ScriptedAssessor {
    async fn assess(
        &self,
        _reference: &str,
        _audio: &Path,
        _request: &AssessmentRequest,
    ) -> Result<RecognitionOutcome> {
        Ok(self.outcome.clone())
    }
}

struct SlowAssessor {
    delay: Duration,
}

#[async_trait]
impl SpeechAssessor for SlowAssessor {
    async fn assess(
        &self,
        _reference: &str,
        _audio: &Path,
        _request: &AssessmentRequest,
    ) -> Result<RecognitionOutcome> {
        sleep(self.delay).await;
        Ok(RecognitionOutcome::NoSpeech)
    }
}

struct UnavailableAssessor;

#[async_trait]
impl SpeechAssessor for UnavailableAssessor {
    async fn assess(
        &self,
        _reference: &str,
        _audio: &Path,
        _request: &AssessmentRequest,
    ) -> Result<RecognitionOutcome> {
        Err(anyhow!("service unavailable"))
    }
}

struct StaticSynthesizer;

#[async_trait]
impl ReferenceSynthesizer for StaticSynthesizer {
    async fn synthesize(&self, _text: &str, _voice: &str, _speed: f32) -> Result<Option<Bytes>> {
        Ok(Some(Bytes::from_static(b"encoded-reference-audio")))
    }
}

fn write_upload(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("abc-recording.webm");
    std::fs::write(&path, vec![0u8; 2048]).expect("write upload");
    path
}

fn orchestrator(assessor: Arc<dyn SpeechAssessor>) -> AssessmentOrchestrator {
    AssessmentOrchestrator::with_components(
        AssessorConfig::default(),
        Arc::new(StubTranscoder),
        assessor,
        None,
    )
}

fn recognized_cat() -> RecognitionOutcome {
    RecognitionOutcome::Recognized {
        transcript: "cat".to_string(),
        scores: HeadlineScores {
            pronunciation: 92.0,
            accuracy: 90.0,
            fluency: 88.0,
            completeness: 100.0,
        },
        observations: vec![
            PhonemeObservation::new("k", Some(95.0)),
            PhonemeObservation::new("ae", Some(88.0)),
            PhonemeObservation::new("t", Some(91.0)),
        ],
    }
}

#[tokio::test]
async fn recognized_cat_scores_every_letter_excellent() {
    let dir = TempDir::new().expect("tempdir");
    let upload = write_upload(&dir);
    let orchestrator = orchestrator(Arc::new(ScriptedAssessor::new(recognized_cat())));

    let result = orchestrator
        .assess_recording(&upload, "cat", None)
        .await
        .expect("assessment succeeds");

    assert_eq!(result.word, "cat");
    assert_eq!(result.recognized_text, "cat");
    assert_eq!(result.pronunciation_score, 92.0);
    assert_eq!(result.phonemes.len(), 3);
    let accuracies: Vec<u8> = result.phonemes.iter().map(|p| p.accuracy_score).collect();
    assert_eq!(accuracies, vec![95, 88, 91]);
    assert!(result
        .phonemes
        .iter()
        .all(|p| p.status == LetterStatus::Excellent));
    assert_eq!(result.feedback_message, "Excellent pronunciation! Well done!");
    assert_eq!(result.audio_url, "/uploads/abc-recording.webm");
}

#[tokio::test]
async fn no_speech_falls_back_deterministically() {
    let dir = TempDir::new().expect("tempdir");
    let upload = write_upload(&dir);
    let orchestrator = orchestrator(Arc::new(ScriptedAssessor::new(RecognitionOutcome::NoSpeech)));

    let result = orchestrator
        .assess_recording(&upload, "practice", None)
        .await
        .expect("assessment succeeds");

    assert_eq!(result.pronunciation_score, 25.0);
    assert_eq!(result.recognized_text, "");
    assert_eq!(result.accuracy_score, 0.0);
    assert_eq!(result.fluency_score, 0.0);
    assert_eq!(result.completeness_score, 0.0);
    assert_eq!(result.phonemes.len(), "practice".len());
    for (index, score) in result.phonemes.iter().enumerate() {
        assert_eq!(score.letter_position, index);
        assert!(score.accuracy_score <= 100);
    }
    assert_eq!(
        result.feedback_message,
        "Try Again – Did you say the entire phrase?"
    );
}

#[tokio::test]
async fn deadline_elapse_produces_the_fallback_result() {
    let dir = TempDir::new().expect("tempdir");
    let upload = write_upload(&dir);
    let config = AssessorConfig {
        assess_deadline: Duration::from_millis(100),
        ..AssessorConfig::default()
    };
    let orchestrator = AssessmentOrchestrator::with_components(
        config,
        Arc::new(StubTranscoder),
        Arc::new(SlowAssessor {
            delay: Duration::from_secs(5),
        }),
        None,
    );

    let result = orchestrator
        .assess_recording(&upload, "cat", None)
        .await
        .expect("assessment succeeds");

    assert_eq!(result.pronunciation_score, 25.0);
    assert_eq!(result.recognized_text, "");
    assert_eq!(result.phonemes.len(), 3);
    assert_eq!(
        result.feedback_message,
        "Try Again – Did you say the entire phrase?"
    );
}

#[tokio::test]
async fn canceled_recognition_is_treated_like_no_speech() {
    let dir = TempDir::new().expect("tempdir");
    let upload = write_upload(&dir);
    let orchestrator = orchestrator(Arc::new(ScriptedAssessor::new(
        RecognitionOutcome::Canceled {
            reason: "quota exceeded".to_string(),
        },
    )));

    let result = orchestrator
        .assess_recording(&upload, "cat", None)
        .await
        .expect("assessment succeeds");

    assert_eq!(result.pronunciation_score, 25.0);
    assert_eq!(result.recognized_text, "");
}

#[tokio::test]
async fn service_error_degrades_to_fallback_instead_of_failing() {
    let dir = TempDir::new().expect("tempdir");
    let upload = write_upload(&dir);
    let orchestrator = orchestrator(Arc::new(UnavailableAssessor));

    let result = orchestrator
        .assess_recording(&upload, "cat", None)
        .await
        .expect("assessment still succeeds");

    assert_eq!(result.pronunciation_score, 25.0);
    assert_eq!(result.phonemes.len(), 3);
}

#[tokio::test]
async fn empty_transcript_recognition_falls_back() {
    let dir = TempDir::new().expect("tempdir");
    let upload = write_upload(&dir);
    let orchestrator = orchestrator(Arc::new(ScriptedAssessor::new(
        RecognitionOutcome::Recognized {
            transcript: String::new(),
            scores: HeadlineScores::default(),
            observations: Vec::new(),
        },
    )));

    let result = orchestrator
        .assess_recording(&upload, "cat", None)
        .await
        .expect("assessment succeeds");

    assert_eq!(result.pronunciation_score, 25.0);
    assert_eq!(result.recognized_text, "");
}

#[tokio::test]
async fn recognition_without_observations_fabricates_from_the_transcript() {
    let dir = TempDir::new().expect("tempdir");
    let upload = write_upload(&dir);
    let orchestrator = orchestrator(Arc::new(ScriptedAssessor::new(
        RecognitionOutcome::Recognized {
            transcript: "cat".to_string(),
            scores: HeadlineScores {
                pronunciation: 85.0,
                accuracy: 80.0,
                fluency: 82.0,
                completeness: 100.0,
            },
            observations: Vec::new(),
        },
    )));

    let result = orchestrator
        .assess_recording(&upload, "cat", None)
        .await
        .expect("assessment succeeds");

    assert_eq!(result.recognized_text, "cat");
    assert_eq!(result.pronunciation_score, 85.0);
    assert_eq!(result.phonemes.len(), 3);
    assert_eq!(result.feedback_message, "Excellent pronunciation! Well done!");
}

#[tokio::test]
async fn transcoder_failure_falls_back_without_calling_the_service() {
    let dir = TempDir::new().expect("tempdir");
    let upload = write_upload(&dir);
    let orchestrator = AssessmentOrchestrator::with_components(
        AssessorConfig::default(),
        Arc::new(FailingTranscoder),
        Arc::new(ScriptedAssessor::new(recognized_cat())),
        None,
    );

    let result = orchestrator
        .assess_recording(&upload, "cat", None)
        .await
        .expect("assessment succeeds");

    assert_eq!(result.pronunciation_score, 25.0);
    assert_eq!(result.recognized_text, "");
}

#[tokio::test]
async fn missing_transcoder_output_falls_back() {
    let dir = TempDir::new().expect("tempdir");
    let upload = write_upload(&dir);
    let orchestrator = AssessmentOrchestrator::with_components(
        AssessorConfig::default(),
        Arc::new(SilentTranscoder),
        Arc::new(ScriptedAssessor::new(recognized_cat())),
        None,
    );

    let result = orchestrator
        .assess_recording(&upload, "cat", None)
        .await
        .expect("assessment succeeds");

    assert_eq!(result.pronunciation_score, 25.0);
}

#[tokio::test]
async fn missing_audio_is_rejected_before_any_service_call() {
    let orchestrator = orchestrator(Arc::new(ScriptedAssessor::new(recognized_cat())));

    let err = orchestrator
        .assess_recording(Path::new("/nonexistent/recording.webm"), "cat", None)
        .await
        .expect_err("missing audio must be rejected");

    assert_eq!(err, AssessError::MissingAudio);
}

#[tokio::test]
async fn undersized_audio_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("tiny-recording.webm");
    std::fs::write(&path, b"tiny").expect("write tiny upload");
    let orchestrator = orchestrator(Arc::new(ScriptedAssessor::new(recognized_cat())));

    let err = orchestrator
        .assess_recording(&path, "cat", None)
        .await
        .expect_err("undersized audio must be rejected");

    assert_eq!(err, AssessError::AudioTooSmall { size: 4 });
}

#[tokio::test]
async fn blank_reference_word_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let upload = write_upload(&dir);
    let orchestrator = orchestrator(Arc::new(ScriptedAssessor::new(recognized_cat())));

    let err = orchestrator
        .assess_recording(&upload, "   ", None)
        .await
        .expect_err("blank word must be rejected");

    assert_eq!(err, AssessError::MissingWord);
}

#[tokio::test]
async fn normalized_waveform_is_deleted_on_success_and_fallback() {
    let dir = TempDir::new().expect("tempdir");
    let upload = write_upload(&dir);
    let wav = upload.with_extension("wav");

    let success = orchestrator(Arc::new(ScriptedAssessor::new(recognized_cat())));
    success
        .assess_recording(&upload, "cat", None)
        .await
        .expect("assessment succeeds");
    assert!(!wav.exists());

    let degraded = orchestrator(Arc::new(UnavailableAssessor));
    degraded
        .assess_recording(&upload, "cat", None)
        .await
        .expect("assessment succeeds");
    assert!(!wav.exists());
}

#[tokio::test]
async fn reference_clip_is_attached_when_requested() {
    let dir = TempDir::new().expect("tempdir");
    let upload = write_upload(&dir);
    let orchestrator = AssessmentOrchestrator::with_components(
        AssessorConfig::default(),
        Arc::new(StubTranscoder),
        Arc::new(ScriptedAssessor::new(recognized_cat())),
        Some(Arc::new(StaticSynthesizer)),
    );

    let result = orchestrator
        .assess_recording(&upload, "cat", Some(&ReferenceRequest::default()))
        .await
        .expect("assessment succeeds");

    let clip = result.reference_clip.expect("clip attached");
    assert!(clip.data.starts_with("data:audio/mpeg;base64,"));
    assert_eq!(clip.voice_name, "en-US-JennyNeural");
    assert_eq!(clip.text, "cat");
}

#[tokio::test]
async fn reference_clip_is_skipped_without_a_synthesizer() {
    let dir = TempDir::new().expect("tempdir");
    let upload = write_upload(&dir);
    let orchestrator = orchestrator(Arc::new(ScriptedAssessor::new(recognized_cat())));

    let result = orchestrator
        .assess_recording(&upload, "cat", Some(&ReferenceRequest::default()))
        .await
        .expect("assessment succeeds");

    assert!(result.reference_clip.is_none());
}
