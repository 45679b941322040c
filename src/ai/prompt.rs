//! Prompt builders for the four AI operations.
//!
//! Each prompt follows the same shape: an expert-role instruction, the input
//! (plus the target parameter where one exists), and a trailing completion
//! cue.  All prompts demand output-only replies so responses can be used
//! verbatim as result fields.

// ---------------------------------------------------------------------------
// Instructions
// ---------------------------------------------------------------------------

/// Transcription instruction — the media payload is attached as a separate
/// request part, so this prompt carries no input text.
pub const TRANSCRIBE_INSTRUCTION: &str = "\
You are an expert transcriptionist.

You will generate a transcript from the provided audio or video file.
Reply with ONLY the transcript text.

Transcript:";

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Translation prompt for `text` into `target_language`.
pub fn translate(text: &str, target_language: &str) -> String {
    format!(
        "You are an expert translator.\n\n\
         Translate the following text into {target_language}. \
         Reply with ONLY the translated text.\n\n\
         Text: {text}\n\n\
         Translated Text:"
    )
}

/// Transliteration prompt for `text` into `target_script`.
pub fn transliterate(text: &str, target_script: &str) -> String {
    format!(
        "You are an expert in transliterating text from one script to another.\n\n\
         Transliterate the following text into the target script. \
         Reply with ONLY the transliterated text.\n\n\
         Text: {text}\n\
         Target Script: {target_script}\n\n\
         Transliterated Text:"
    )
}

/// Summarization prompt for `text`.
pub fn summarize(text: &str) -> String {
    format!(
        "You are an expert at summarizing spoken content.\n\n\
         Write a concise summary of the following transcript. \
         Reply with ONLY the summary.\n\n\
         Text: {text}\n\n\
         Summary:"
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcribe_instruction_has_role_and_cue() {
        assert!(TRANSCRIBE_INSTRUCTION.contains("expert transcriptionist"));
        assert!(TRANSCRIBE_INSTRUCTION.ends_with("Transcript:"));
    }

    #[test]
    fn translate_prompt_carries_text_and_language() {
        let p = translate("Hello world", "Hindi");
        assert!(p.contains("Hello world"));
        assert!(p.contains("Hindi"));
        assert!(p.ends_with("Translated Text:"));
    }

    #[test]
    fn transliterate_prompt_carries_text_and_script() {
        let p = transliterate("Hello world", "Devanagari");
        assert!(p.contains("Hello world"));
        assert!(p.contains("Target Script: Devanagari"));
        assert!(p.ends_with("Transliterated Text:"));
    }

    #[test]
    fn summarize_prompt_carries_text() {
        let p = summarize("a long meeting transcript");
        assert!(p.contains("a long meeting transcript"));
        assert!(p.ends_with("Summary:"));
    }

    #[test]
    fn prompts_demand_output_only_replies() {
        assert!(TRANSCRIBE_INSTRUCTION.contains("ONLY"));
        assert!(translate("t", "Tamil").contains("ONLY"));
        assert!(transliterate("t", "Tamil").contains("ONLY"));
        assert!(summarize("t").contains("ONLY"));
    }
}
