/// Shown instead of any "I don't know"-style answer.
pub const APOLOGY: &str = "I wish I could help with that, but I don’t have the answer to that right now based on context provided.";

const UNKNOWN_PHRASES: &[&str] = &[
    "i don't know",
    "i do not know",
    "no relevant information",
    "couldn't find",
    "not found",
    "don't have the answer",
];

/// Post-processes an answer from the backend. A missing answer becomes the
/// empty string, a non-answer becomes the apology, anything else passes
/// through trimmed.
pub fn clean(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };
    let lowered = text.to_lowercase();
    if UNKNOWN_PHRASES.iter().any(|phrase| lowered.contains(phrase)) {
        APOLOGY.to_owned()
    } else {
        text.trim().to_owned()
    }
}
