//! Synthetic letter-score fabrication for words without usable phoneme
//! evidence.

use rand::Rng;

use crate::scoring::difficulty;
use crate::scoring::feedback::phoneme_feedback;
use crate::scoring::similarity::similarity;
use crate::scoring::types::{LetterScore, LetterStatus};

/// Base score assumed when the caller has no overall score to anchor on.
pub const DEFAULT_BASE_SCORE: f32 = 50.0;
/// Similarity ratio assumed when no recognized text is available.
pub const DEFAULT_SIMILARITY: f32 = 0.7;
/// Half-width of the uniform perturbation applied to each fabricated score.
const FABRICATION_JITTER: f32 = 7.5;

/// Produces one plausible letter score per letter of `word`, anchored on the
/// overall score, biased by letter difficulty, perturbed, and scaled by the
/// similarity between `word` and whatever the service recognized.
///
/// The random source is injected so callers can fabricate deterministically.
pub fn fabricate<R: Rng>(
    word: &str,
    recognized: &str,
    overall: Option<f32>,
    rng: &mut R,
) -> Vec<LetterScore> {
    let base = overall.unwrap_or(DEFAULT_BASE_SCORE);
    let recognized_lower = recognized.to_lowercase();
    let recognized_letters: Vec<char> = recognized_lower.chars().collect();

    let text_similarity = if recognized.is_empty() {
        DEFAULT_SIMILARITY
    } else {
        similarity(&word.to_lowercase(), &recognized_lower)
    };

    word.chars()
        .enumerate()
        .map(|(position, raw)| {
            let letter = raw.to_ascii_lowercase();
            let phoneme = canonical_phoneme(letter);

            let mut score = base
                + difficulty::adjustment(letter)
                + rng.gen_range(-FABRICATION_JITTER..=FABRICATION_JITTER);
            score *= text_similarity;

            if let Some(&recognized_letter) = recognized_letters.get(position) {
                if recognized_letter == letter {
                    score += 10.0;
                } else {
                    score -= 15.0;
                }
            }

            let score = score.clamp(0.0, 100.0);
            let status = LetterStatus::from_score(score);

            LetterScore {
                phoneme: phoneme.to_string(),
                letter_position: position,
                accuracy_score: score.round() as u8,
                status,
                feedback: phoneme_feedback(phoneme, status).to_string(),
            }
        })
        .collect()
}

/// Single representative phoneme per letter; anything unmapped reads as the
/// neutral schwa.
pub fn canonical_phoneme(letter: char) -> &'static str {
    match letter.to_ascii_lowercase() {
        'a' => "/æ/",
        'e' => "/ɛ/",
        'i' => "/ɪ/",
        'o' => "/ɒ/",
        'u' => "/ʌ/",
        'b' => "/b/",
        'c' => "/k/",
        'd' => "/d/",
        'f' => "/f/",
        'g' => "/g/",
        'h' => "/h/",
        'j' => "/dʒ/",
        'k' => "/k/",
        'l' => "/l/",
        'm' => "/m/",
        'n' => "/n/",
        'p' => "/p/",
        'q' => "/kw/",
        'r' => "/r/",
        's' => "/s/",
        't' => "/t/",
        'v' => "/v/",
        'w' => "/w/",
        'x' => "/ks/",
        'y' => "/j/",
        'z' => "/z/",
        _ => "/ə/",
    }
}
