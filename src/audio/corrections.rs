/// Known mis-hearings of the assistant's name by the transcription model
const CORRECTIONS: &[(&str, &str)] = &[("Cognia", "Cognea"), ("cognia", "cognea")];

/// Apply fixed spelling fixes to transcribed text
pub fn correct_transcription(text: &str) -> String {
    CORRECTIONS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}
