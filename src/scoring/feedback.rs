//! Coaching feedback text: per-phoneme articulation tips and the
//! result-level message attached to every assessment.

use crate::scoring::types::LetterStatus;

/// Coaching message for a phoneme at a given status band. Only two text
/// variants exist per phoneme; `Good` and `Incorrect` share the corrective
/// one.
pub fn phoneme_feedback(phoneme: &str, status: LetterStatus) -> &'static str {
    let (correct, incorrect) = feedback_pair(phoneme);
    match status {
        LetterStatus::Excellent => correct,
        LetterStatus::Good | LetterStatus::Incorrect => incorrect,
    }
}

/// Result-level message banded by the overall pronunciation score. An empty
/// transcript always wins over the score bands.
pub fn compose_feedback(pronunciation_score: f32, recognized_text: &str) -> &'static str {
    if recognized_text.trim().is_empty() {
        return "Try Again – Did you say the entire phrase?";
    }

    if pronunciation_score >= 80.0 {
        "Excellent pronunciation! Well done!"
    } else if pronunciation_score >= 60.0 {
        "Good job! Try focusing on the highlighted letters."
    } else if pronunciation_score >= 40.0 {
        "Getting better! Pay attention to the red letters."
    } else {
        "Keep practicing! Focus on clear articulation."
    }
}

fn feedback_pair(phoneme: &str) -> (&'static str, &'static str) {
    match phoneme {
        "/k/" => (
            "Excellent /k/ sound! Perfect air stoppage.",
            "Be sure to stop the air completely for the /k/ sound. Place your tongue against the back of your mouth.",
        ),
        "/ɒ/" => (
            "Great /ɒ/ vowel sound!",
            "For /ɒ/, open your mouth wide and round your lips slightly.",
        ),
        "/n/" => (
            "Perfect /n/ sound!",
            "For /n/, place your tongue tip against your upper teeth and let air flow through your nose.",
        ),
        "/t/" => (
            "Excellent /t/ sound!",
            "For /t/, place your tongue tip against your upper teeth and release with a small puff of air.",
        ),
        "/ɛ/" => (
            "Great /ɛ/ vowel sound!",
            "For /ɛ/, position your tongue in the middle of your mouth with lips slightly spread.",
        ),
        "/ə/" => (
            "Excellent schwa sound!",
            "The schwa /ə/ should be very relaxed and neutral.",
        ),
        "/æ/" => (
            "Perfect /æ/ sound!",
            "For /æ/, open your mouth wider and lower your tongue.",
        ),
        "/b/" => (
            "Great /b/ sound!",
            "For /b/, press your lips together and release with voice.",
        ),
        "/s/" => (
            "Excellent /s/ sound!",
            "For /s/, place your tongue close to the roof of your mouth and let air hiss through.",
        ),
        "/l/" => (
            "Perfect /l/ sound!",
            "For /l/, touch your tongue tip to the roof of your mouth behind your teeth.",
        ),
        "/r/" => (
            "Excellent /r/ sound!",
            "For /r/, curl your tongue slightly back without touching the roof of your mouth.",
        ),
        "/m/" => (
            "Perfect /m/ sound!",
            "For /m/, close your lips and let air flow through your nose.",
        ),
        "/d/" => (
            "Great /d/ sound!",
            "For /d/, touch your tongue tip to the roof of your mouth and release with voice.",
        ),
        "/f/" => (
            "Perfect /f/ sound!",
            "For /f/, gently bite your lower lip and blow air through.",
        ),
        "/g/" => (
            "Excellent /g/ sound!",
            "For /g/, place your tongue against the back of your mouth and release with voice.",
        ),
        "/h/" => (
            "Great /h/ sound!",
            "For /h/, breathe out gently through an open mouth.",
        ),
        "/p/" => (
            "Great /p/ sound!",
            "For /p/, press your lips together and release with a puff of air.",
        ),
        "/v/" => (
            "Great /v/ sound!",
            "For /v/, gently bite your lower lip and add voice while blowing air.",
        ),
        "/w/" => (
            "Perfect /w/ sound!",
            "For /w/, round your lips and glide quickly to the next sound.",
        ),
        "/z/" => (
            "Excellent /z/ sound!",
            "For /z/, place your tongue like /s/ but add voice.",
        ),
        "/ɪ/" => (
            "Great /ɪ/ sound!",
            "For /ɪ/, keep your tongue high and slightly forward.",
        ),
        "/ʌ/" => (
            "Excellent /ʌ/ sound!",
            "For /ʌ/, relax your tongue in the middle of your mouth.",
        ),
        _ => (
            "Well done!",
            "Try to articulate this sound more clearly.",
        ),
    }
}
