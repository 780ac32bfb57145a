//! Letter-level scoring domain models shared by the alignment, fabrication
//! and assessment layers.

use serde::{Deserialize, Serialize};

/// Discrete quality band attached to every letter score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterStatus {
    Excellent,
    Good,
    Incorrect,
}

impl LetterStatus {
    /// Bands a 0-100 accuracy value: >= 75 Excellent, >= 51 Good, else
    /// Incorrect.
    pub fn from_score(score: f32) -> Self {
        if score >= 75.0 {
            LetterStatus::Excellent
        } else if score >= 51.0 {
            LetterStatus::Good
        } else {
            LetterStatus::Incorrect
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LetterStatus::Excellent => "Excellent",
            LetterStatus::Good => "Good",
            LetterStatus::Incorrect => "Incorrect",
        }
    }
}

/// One phoneme segment reported by the assessment service, in temporal
/// order. Order is the only structural signal available for alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhonemeObservation {
    pub symbol: String,
    #[serde(default)]
    pub accuracy: Option<f32>,
}

impl PhonemeObservation {
    pub fn new<S: Into<String>>(symbol: S, accuracy: Option<f32>) -> Self {
        Self {
            symbol: symbol.into(),
            accuracy,
        }
    }
}

/// Per-letter output record. Exactly one exists per letter of the reference
/// word, with `letter_position` covering the word's index set gap-free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterScore {
    pub phoneme: String,
    pub letter_position: usize,
    pub accuracy_score: u8,
    pub status: LetterStatus,
    pub feedback: String,
}
