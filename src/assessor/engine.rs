use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::fs;
use tokio::time::timeout;
use tracing::{debug, error, warn};

use crate::assessor::config::AssessorConfig;
use crate::assessor::constants::FALLBACK_OVERALL_SCORE;
use crate::assessor::error::AssessError;
use crate::assessor::traits::{AudioTranscoder, ReferenceSynthesizer, SpeechAssessor};
use crate::assessor::transcode::FfmpegTranscoder;
use crate::assessor::types::{
    AssessmentRequest, AssessmentResult, GradingSystem, Granularity, HeadlineScores,
    RecognitionOutcome, ReferenceClip, ReferenceRequest,
};
use crate::scoring::{align, compose_feedback, fabricate, LetterScore};
use crate::telemetry::events::record_assessment_outcome;

/// Feedback attached when the pipeline dies before any scoring path ran.
pub const PROCESSING_ERROR_FEEDBACK: &str =
    "Processing error occurred. Please try recording again.";

/// Orchestrates one end-to-end assessment attempt: validate the upload,
/// normalize it through the transcoder, call the assessment service under a
/// deadline, and score the outcome. Every terminal path yields a fully
/// populated result; only input validation can surface an error.
pub struct AssessmentOrchestrator {
    config: AssessorConfig,
    transcoder: Arc<dyn AudioTranscoder>,
    assessor: Arc<dyn SpeechAssessor>,
    synthesizer: Option<Arc<dyn ReferenceSynthesizer>>,
}

struct Scored {
    recognized_text: String,
    scores: HeadlineScores,
    pronunciation: f32,
    letters: Vec<LetterScore>,
    used_fallback: bool,
}

impl AssessmentOrchestrator {
    pub fn new(config: AssessorConfig, assessor: Arc<dyn SpeechAssessor>) -> Self {
        Self::with_components(config, Arc::new(FfmpegTranscoder::default()), assessor, None)
    }

    pub fn with_components(
        config: AssessorConfig,
        transcoder: Arc<dyn AudioTranscoder>,
        assessor: Arc<dyn SpeechAssessor>,
        synthesizer: Option<Arc<dyn ReferenceSynthesizer>>,
    ) -> Self {
        Self {
            config,
            transcoder,
            assessor,
            synthesizer,
        }
    }

    /// Runs one assessment over the uploaded recording. `reference` opts in
    /// to a synthesized reference-pronunciation clip on the result.
    pub async fn assess_recording(
        &self,
        audio_path: &Path,
        word: &str,
        reference: Option<&ReferenceRequest>,
    ) -> Result<AssessmentResult, AssessError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(AssessError::MissingWord);
        }

        let metadata = fs::metadata(audio_path)
            .await
            .map_err(|_| AssessError::MissingAudio)?;
        if metadata.len() < self.config.min_audio_bytes {
            warn!(
                target: "assessment_orchestrator",
                size = metadata.len(),
                "audio file too small, rejecting before any service call"
            );
            return Err(AssessError::AudioTooSmall {
                size: metadata.len(),
            });
        }

        let started = Instant::now();
        let audio_url = audio_url_for(audio_path);
        let wav_path = audio_path.with_extension("wav");

        let scored = self.run_pipeline(audio_path, &wav_path, word).await;
        remove_artifact(&wav_path).await;

        let used_fallback = scored.used_fallback;
        let mut result = self.assemble(word, &audio_url, scored);
        record_assessment_outcome(
            word,
            result.pronunciation_score,
            used_fallback,
            started.elapsed(),
        );

        if let Some(request) = reference {
            result.reference_clip = self.reference_clip(word, request).await;
        }

        Ok(result)
    }

    /// Fallback shape for the embedding application's own error paths, with
    /// the processing-error feedback already attached.
    pub fn processing_error_result(&self, word: &str, audio_path: &Path) -> AssessmentResult {
        let mut result = self.assemble(word, &audio_url_for(audio_path), self.fallback_scored(word));
        result.feedback_message = PROCESSING_ERROR_FEEDBACK.to_string();
        result
    }

    async fn run_pipeline(&self, audio_path: &Path, wav_path: &Path, word: &str) -> Scored {
        if let Err(err) = self.transcoder.transcode(audio_path, wav_path).await {
            warn!(
                target: "assessment_orchestrator",
                %err,
                "transcoding failed, falling back to synthetic scoring"
            );
            return self.fallback_scored(word);
        }
        if !fs::try_exists(wav_path).await.unwrap_or(false) {
            warn!(
                target: "assessment_orchestrator",
                "transcoder produced no output artifact, falling back"
            );
            return self.fallback_scored(word);
        }

        let request = AssessmentRequest {
            language: self.config.language.clone(),
            grading: GradingSystem::HundredMark,
            granularity: Granularity::Phoneme,
            enable_miscue: self.config.enable_miscue,
        };

        let outcome = match timeout(
            self.config.assess_deadline,
            self.assessor.assess(word, wav_path, &request),
        )
        .await
        {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                error!(
                    target: "assessment_orchestrator",
                    %err,
                    "assessment service failed"
                );
                return self.fallback_scored(word);
            }
            Err(_) => {
                warn!(
                    target: "assessment_orchestrator",
                    deadline = ?self.config.assess_deadline,
                    "assessment deadline elapsed, falling back"
                );
                return self.fallback_scored(word);
            }
        };

        match outcome {
            RecognitionOutcome::Recognized {
                transcript,
                scores,
                observations,
            } if !transcript.is_empty() => {
                let mut rng = StdRng::from_entropy();
                let mut letters = if observations.is_empty() {
                    fabricate(word, &transcript, Some(scores.pronunciation), &mut rng)
                } else {
                    align(word, &observations, Some(scores.pronunciation), &mut rng)
                };
                if letters.is_empty() {
                    letters = fabricate(word, &transcript, Some(scores.pronunciation), &mut rng);
                }

                Scored {
                    recognized_text: transcript,
                    pronunciation: scores.pronunciation,
                    scores,
                    letters,
                    used_fallback: false,
                }
            }
            RecognitionOutcome::Recognized { .. } => {
                warn!(
                    target: "assessment_orchestrator",
                    "recognition returned an empty transcript, falling back"
                );
                self.fallback_scored(word)
            }
            RecognitionOutcome::NoSpeech => {
                warn!(target: "assessment_orchestrator", "no speech detected");
                self.fallback_scored(word)
            }
            RecognitionOutcome::Canceled { reason } => {
                warn!(
                    target: "assessment_orchestrator",
                    %reason,
                    "assessment canceled by the service"
                );
                self.fallback_scored(word)
            }
        }
    }

    fn fallback_scored(&self, word: &str) -> Scored {
        let mut rng = StdRng::from_entropy();
        let letters = fabricate(word, "", Some(FALLBACK_OVERALL_SCORE), &mut rng);
        Scored {
            recognized_text: String::new(),
            scores: HeadlineScores::default(),
            pronunciation: FALLBACK_OVERALL_SCORE,
            letters,
            used_fallback: true,
        }
    }

    fn assemble(&self, word: &str, audio_url: &str, scored: Scored) -> AssessmentResult {
        let feedback_message =
            compose_feedback(scored.pronunciation, &scored.recognized_text).to_string();
        if scored.used_fallback {
            debug!(
                target: "assessment_orchestrator",
                word,
                "assembled fallback result"
            );
        }

        AssessmentResult {
            word: word.to_string(),
            recognized_text: scored.recognized_text,
            phonemes: scored.letters,
            pronunciation_score: scored.pronunciation,
            accuracy_score: scored.scores.accuracy,
            fluency_score: scored.scores.fluency,
            completeness_score: scored.scores.completeness,
            audio_url: audio_url.to_string(),
            feedback_message,
            reference_clip: None,
        }
    }

    /// Renders the reference-pronunciation clip. Synthesis failures are
    /// logged and never fail the assessment.
    pub async fn reference_clip(
        &self,
        text: &str,
        request: &ReferenceRequest,
    ) -> Option<ReferenceClip> {
        let synthesizer = self.synthesizer.as_ref()?;
        match synthesizer
            .synthesize(text, &request.voice_name, request.speed)
            .await
        {
            Ok(Some(audio)) => Some(ReferenceClip::from_audio(
                &audio,
                &request.voice_name,
                request.speed,
                text,
            )),
            Ok(None) => {
                warn!(
                    target: "reference_synth",
                    text,
                    "synthesizer produced no audio"
                );
                None
            }
            Err(err) => {
                error!(target: "reference_synth", %err, "reference synthesis failed");
                None
            }
        }
    }
}

fn audio_url_for(audio_path: &Path) -> String {
    let name = audio_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("/uploads/{name}")
}

async fn remove_artifact(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => debug!(
            target: "assessment_orchestrator",
            path = %path.display(),
            "removed normalized waveform"
        ),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => warn!(
            target: "assessment_orchestrator",
            %err,
            path = %path.display(),
            "could not delete normalized waveform"
        ),
    }
}
