//! Target-language catalog and script resolution.
//!
//! [`LANGUAGES`] is the fixed set of output languages offered for translation,
//! each paired with the canonical writing script used for transliteration.
//! [`script_for`] resolves a language name to its script, falling back to
//! Latin for names that have no catalog entry.

// ---------------------------------------------------------------------------
// LanguageInfo
// ---------------------------------------------------------------------------

/// Static metadata for a single target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageInfo {
    /// Human-readable language name (also the value sent to the translator).
    pub name: &'static str,
    /// Canonical writing script, sent to the transliterator.
    pub script: &'static str,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Script used when a language name is not present in the catalog.
pub const FALLBACK_SCRIPT: &str = "Latin";

/// All selectable target languages, in display order.
///
/// The first entry is the default selection.
pub const LANGUAGES: &[LanguageInfo] = &[
    LanguageInfo {
        name: "English",
        script: "Latin",
    },
    LanguageInfo {
        name: "Hindi",
        script: "Devanagari",
    },
    LanguageInfo {
        name: "Marathi",
        script: "Devanagari",
    },
    LanguageInfo {
        name: "Tamil",
        script: "Tamil",
    },
    LanguageInfo {
        name: "Telugu",
        script: "Telugu",
    },
    LanguageInfo {
        name: "Kannada",
        script: "Kannada",
    },
];

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Find a catalog entry by name (ASCII case-insensitive).
pub fn find_language(name: &str) -> Option<&'static LanguageInfo> {
    LANGUAGES.iter().find(|l| l.name.eq_ignore_ascii_case(name))
}

/// Resolve the writing script for `name`.
///
/// Returns [`FALLBACK_SCRIPT`] (Latin) when the name has no catalog entry, so
/// callers always get a usable script.
pub fn script_for(name: &str) -> &'static str {
    find_language(name).map_or(FALLBACK_SCRIPT, |l| l.script)
}

/// Default language name (first catalog entry).
pub fn default_language() -> &'static str {
    LANGUAGES[0].name
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_entries_are_non_empty() {
        for l in LANGUAGES {
            assert!(!l.name.is_empty());
            assert!(!l.script.is_empty());
        }
    }

    #[test]
    fn hindi_resolves_to_devanagari() {
        assert_eq!(script_for("Hindi"), "Devanagari");
    }

    #[test]
    fn tamil_resolves_to_tamil_script() {
        assert_eq!(script_for("Tamil"), "Tamil");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(find_language("hindi").is_some());
        assert!(find_language("KANNADA").is_some());
    }

    #[test]
    fn unknown_language_falls_back_to_latin() {
        assert_eq!(script_for("Klingon"), FALLBACK_SCRIPT);
    }

    #[test]
    fn default_language_is_english() {
        assert_eq!(default_language(), "English");
        assert_eq!(script_for(default_language()), "Latin");
    }

    #[test]
    fn marathi_shares_devanagari_with_hindi() {
        assert_eq!(script_for("Marathi"), script_for("Hindi"));
    }
}
