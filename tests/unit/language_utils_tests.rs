/*!
 * Tests for language code utilities and the script-guess heuristic
 */

use lingway::language_utils::{
    guess_language_by_script, is_auto, language_name, validate_language_code,
};

#[test]
fn test_isAuto_withAutoVariants_shouldMatch() {
    assert!(is_auto("auto"));
    assert!(is_auto("AUTO"));
    assert!(is_auto(" auto "));
    assert!(!is_auto("en"));
}

#[test]
fn test_validateLanguageCode_withIso6391Codes_shouldPass() {
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code("ru").is_ok());
    assert!(validate_language_code("ZH").is_ok());
}

#[test]
fn test_validateLanguageCode_withIso6393Codes_shouldPass() {
    assert!(validate_language_code("eng").is_ok());
    assert!(validate_language_code("rus").is_ok());
}

#[test]
fn test_validateLanguageCode_withInvalidCodes_shouldFail() {
    assert!(validate_language_code("").is_err());
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("english").is_err());
    assert!(validate_language_code("auto").is_err());
}

#[test]
fn test_languageName_withKnownCodes_shouldReturnEnglishName() {
    assert_eq!(language_name("en"), Some("English"));
    assert_eq!(language_name("rus"), Some("Russian"));
    assert_eq!(language_name("xx"), None);
}

#[test]
fn test_guessLanguage_withCyrillicText_shouldReturnRussian() {
    assert_eq!(guess_language_by_script("привет мир"), "ru");
}

#[test]
fn test_guessLanguage_withHanText_shouldReturnChinese() {
    assert_eq!(guess_language_by_script("你好世界"), "zh");
}

#[test]
fn test_guessLanguage_withLatinText_shouldDefaultToEnglish() {
    assert_eq!(guess_language_by_script("hello world"), "en");
    assert_eq!(guess_language_by_script("bonjour"), "en");
}

#[test]
fn test_guessLanguage_withMixedScripts_shouldPreferCyrillic() {
    // The Cyrillic scan runs first over the whole text, so a later
    // Cyrillic character still wins over an earlier Han character
    assert_eq!(guess_language_by_script("你好 привет"), "ru");
}

#[test]
fn test_guessLanguage_withEmptyText_shouldDefaultToEnglish() {
    assert_eq!(guess_language_by_script(""), "en");
}
