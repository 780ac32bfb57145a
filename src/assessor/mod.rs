//! Assessment invocation: validation, transcoding, the deadline-guarded
//! service call, and fallback scoring.

mod constants;
mod engine;

pub mod config;
pub mod error;
pub mod traits;
pub mod transcode;
pub mod types;

pub use config::AssessorConfig;
pub use engine::{AssessmentOrchestrator, PROCESSING_ERROR_FEEDBACK};
pub use error::AssessError;
pub use traits::{AudioTranscoder, ReferenceSynthesizer, SpeechAssessor};
pub use transcode::FfmpegTranscoder;
pub use types::{
    AssessmentRequest, AssessmentResult, GradingSystem, Granularity, HeadlineScores,
    RecognitionOutcome, ReferenceClip, ReferenceRequest,
};

#[cfg(test)]
mod tests;
