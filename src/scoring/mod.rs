//! Letter-level pronunciation scoring: similarity, fabrication, alignment
//! and feedback text.

pub mod alignment;
pub mod difficulty;
pub mod fabricator;
pub mod feedback;
pub mod similarity;
pub mod types;

pub use alignment::{align, possible_phonemes, PHONEME_LOOKAHEAD};
pub use fabricator::{canonical_phoneme, fabricate, DEFAULT_BASE_SCORE, DEFAULT_SIMILARITY};
pub use feedback::{compose_feedback, phoneme_feedback};
pub use similarity::{match_quality, similarity};
pub use types::{LetterScore, LetterStatus, PhonemeObservation};
