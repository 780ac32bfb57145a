//! Monotone phoneme-to-letter alignment with bounded lookahead.

use rand::Rng;
use tracing::debug;

use crate::scoring::fabricator::{fabricate, DEFAULT_BASE_SCORE};
use crate::scoring::feedback::phoneme_feedback;
use crate::scoring::types::{LetterScore, LetterStatus, PhonemeObservation};

/// How many unconsumed observations a letter may scan before giving up.
///
/// Policy knob, not a law: it encodes the assumption that a letter's phoneme
/// sits close by in the stream, and may need tuning per reference-service
/// quirks.
pub const PHONEME_LOOKAHEAD: usize = 3;

/// Half-width of the perturbation used when a letter finds no match.
const ALIGNMENT_JITTER: f32 = 10.0;

/// Walks the reference word letter by letter, assigning each letter the
/// first matching observation within the lookahead window. The cursor only
/// moves forward and a consumed observation is never revisited. Letters
/// without a match receive a synthetic score and do not advance the cursor.
///
/// An empty or score-free observation list delegates the whole word to the
/// fabricator.
pub fn align<R: Rng>(
    word: &str,
    observations: &[PhonemeObservation],
    overall: Option<f32>,
    rng: &mut R,
) -> Vec<LetterScore> {
    let usable = observations.iter().any(|obs| obs.accuracy.is_some());
    if observations.is_empty() || !usable {
        return fabricate(word, "", overall, rng);
    }

    let base = overall.unwrap_or(DEFAULT_BASE_SCORE);
    let mut scores = Vec::with_capacity(word.len());
    let mut cursor = 0usize;

    for (position, raw) in word.chars().enumerate() {
        let letter = raw.to_ascii_lowercase();
        let candidates = possible_phonemes(letter);
        let primary = candidates[0];

        let window_end = (cursor + PHONEME_LOOKAHEAD).min(observations.len());
        let matched = observations[cursor..window_end]
            .iter()
            .enumerate()
            .find(|(_, obs)| !obs.symbol.is_empty() && symbol_matches(&obs.symbol, candidates));

        let (score, display) = match matched {
            Some((offset, obs)) => {
                cursor += offset + 1;
                let accuracy = obs.accuracy.unwrap_or(0.0);
                debug!(
                    target: "phoneme_alignment",
                    letter = %letter,
                    symbol = %obs.symbol,
                    accuracy,
                    "matched letter to observation"
                );
                (accuracy, obs.symbol.as_str())
            }
            None => {
                let synthetic = (base + rng.gen_range(-ALIGNMENT_JITTER..=ALIGNMENT_JITTER))
                    .clamp(0.0, 100.0);
                debug!(
                    target: "phoneme_alignment",
                    letter = %letter,
                    synthetic,
                    "no observation in window, using synthetic score"
                );
                (synthetic, primary)
            }
        };

        let score = score.clamp(0.0, 100.0);
        let status = LetterStatus::from_score(score);

        scores.push(LetterScore {
            phoneme: display.to_string(),
            letter_position: position,
            accuracy_score: score.round() as u8,
            status,
            // Keyed by the letter's primary candidate so matched letters keep
            // their articulation tip even when the raw symbol is unknown.
            feedback: phoneme_feedback(primary, status).to_string(),
        });
    }

    scores
}

/// An observation matches a letter when, after stripping non-alphabetic
/// characters, its symbol equals or contains (either direction) one of the
/// letter's candidate spellings.
fn symbol_matches(symbol: &str, candidates: &[&str]) -> bool {
    let clean_symbol = strip_non_alpha(symbol);
    candidates.iter().any(|candidate| {
        let clean_candidate = strip_non_alpha(candidate);
        clean_candidate == clean_symbol
            || clean_candidate.contains(&clean_symbol)
            || clean_symbol.contains(&clean_candidate)
    })
}

fn strip_non_alpha(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

/// Plausible phoneme spellings per letter, IPA and service shorthand mixed,
/// primary candidate first.
pub fn possible_phonemes(letter: char) -> &'static [&'static str] {
    match letter.to_ascii_lowercase() {
        'a' => &["/æ/", "/eɪ/", "/ɑ/", "/ə/", "ae", "aa", "ah", "ax", "ay", "ey"],
        'e' => &["/ɛ/", "/i/", "/ə/", "/eɪ/", "eh", "iy", "ax", "ay", "ey"],
        'i' => &["/ɪ/", "/aɪ/", "/i/", "/ə/", "ih", "iy", "ay", "ax", "ey"],
        'o' => &["/ɒ/", "/oʊ/", "/ɔ/", "/ə/", "aa", "ao", "ow", "ax", "oh"],
        'u' => &["/ʌ/", "/u/", "/ʊ/", "/ju/", "ah", "uw", "uh", "yu", "ow"],
        'b' => &["/b/", "b"],
        'c' => &["/k/", "/s/", "k", "s"],
        'd' => &["/d/", "d"],
        'f' => &["/f/", "f"],
        'g' => &["/g/", "/dʒ/", "g", "jh"],
        'h' => &["/h/", "hh"],
        'j' => &["/dʒ/", "jh"],
        'k' => &["/k/", "k"],
        'l' => &["/l/", "l"],
        'm' => &["/m/", "m"],
        'n' => &["/n/", "/ŋ/", "n", "ng"],
        'p' => &["/p/", "p"],
        'q' => &["/kw/", "k"],
        'r' => &["/r/", "/ɹ/", "r", "er"],
        's' => &["/s/", "/z/", "s", "z"],
        't' => &["/t/", "/θ/", "/ð/", "t", "th", "dh"],
        'v' => &["/v/", "v"],
        'w' => &["/w/", "w"],
        'x' => &["/ks/", "/gz/", "k", "s"],
        'y' => &["/j/", "/aɪ/", "/i/", "y", "ay", "iy"],
        'z' => &["/z/", "/s/", "z", "s"],
        _ => &["/ə/"],
    }
}
