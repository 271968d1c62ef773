use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// This module provides functions for validating ISO 639-1 (2-letter) and
/// ISO 639-3 (3-letter) language codes, plus the crude script-range guess
/// used when a provider refuses "auto" as a source language.
/// The wildcard source language accepted by the gateway
pub const AUTO_LANGUAGE: &str = "auto";

/// Check whether a code is the "auto" wildcard
pub fn is_auto(code: &str) -> bool {
    code.trim().eq_ignore_ascii_case(AUTO_LANGUAGE)
}

/// Validate that a language code is a valid ISO 639-1 or ISO 639-3 code
pub fn validate_language_code(code: &str) -> Result<()> {
    let normalized = code.trim().to_lowercase();

    if normalized.len() == 2 && Language::from_639_1(&normalized).is_some() {
        return Ok(());
    }
    if normalized.len() == 3 && Language::from_639_3(&normalized).is_some() {
        return Ok(());
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Get the English name of a language from its ISO code, for display
pub fn language_name(code: &str) -> Option<&'static str> {
    let normalized = code.trim().to_lowercase();
    let language = if normalized.len() == 2 {
        Language::from_639_1(&normalized)
    } else {
        Language::from_639_3(&normalized)
    };
    language.map(|l| l.to_name())
}

/// Guess a source language from the scripts present in the text.
///
/// This is a deliberately crude heuristic kept for compatibility with the
/// secondary provider's "auto" handling: it recognizes exactly two script
/// ranges (Cyrillic and CJK ideographs) and falls back to English for
/// everything else. It is NOT a substitute for real language identification.
pub fn guess_language_by_script(text: &str) -> &'static str {
    if text.chars().any(|c| ('\u{0400}'..='\u{04FF}').contains(&c)) {
        return "ru";
    }
    if text.chars().any(|c| ('\u{4E00}'..='\u{9FFF}').contains(&c)) {
        return "zh";
    }
    "en"
}
