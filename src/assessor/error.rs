use thiserror::Error;

/// Input-validation failures are the only errors a caller ever sees; every
/// later failure degrades into a fallback result instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssessError {
    #[error("no audio file provided")]
    MissingAudio,
    #[error("audio file too small: {size} bytes")]
    AudioTooSmall { size: u64 },
    #[error("no reference word provided")]
    MissingWord,
}
