//! # Content Disarm & Reconstruct (CDR)
//!
//! Instead of trying to detect what's dangerous in free text, CDR strips
//! everything that could be dangerous and keeps only known-safe elements.
//! This is the shared routine the preprocessor uses to build
//! `normalized_text`, and that decision fusion reuses to build
//! `sanitized_input` — one implementation, not two.
//!
//! ## What gets removed
//!
//! - Control characters (except newline, carriage return, tab)
//! - Zero-width characters (invisible text manipulation)
//! - Directional overrides (text spoofing attacks)
//! - Byte order mark
//!
//! ## What gets preserved
//!
//! - Printable ASCII, standard whitespace, and non-control Unicode
//!   (letters, symbols, emoji, CJK).

use crate::error::SanitizeError;

/// Maximum content size the sanitizer will process (10MB), to bound
/// worst-case CPU/memory on pathological inputs.
const MAX_CONTENT_SIZE: usize = 10 * 1024 * 1024;

/// Strip control characters, zero-width characters, and directional
/// overrides from `input`.
///
/// ```
/// use promptguard_firewall::cdr::sanitize_text;
///
/// let clean = sanitize_text("Hello, world!").unwrap();
/// assert_eq!(clean, "Hello, world!");
///
/// let dangerous = "Hello\x00World\x1F!";
/// assert_eq!(sanitize_text(dangerous).unwrap(), "HelloWorld!");
/// ```
pub fn sanitize_text(input: &str) -> Result<String, SanitizeError> {
    if input.len() > MAX_CONTENT_SIZE {
        return Err(SanitizeError::TooLarge { size: input.len(), max: MAX_CONTENT_SIZE });
    }

    let mut output = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            ' '..='~' => output.push(c),
            '\n' | '\r' | '\t' => output.push(c),
            '\u{200B}'..='\u{200F}' => {}
            '\u{202A}'..='\u{202E}' => {}
            '\u{2060}'..='\u{2064}' => {}
            '\u{FEFF}' => {}
            '\u{0000}'..='\u{001F}' => {}
            '\u{007F}'..='\u{009F}' => {}
            c if !c.is_control() => output.push(c),
            _ => {}
        }
    }

    Ok(output)
}

/// Strip ANSI CSI escape sequences (`ESC [ params command`) from text.
///
/// ```
/// use promptguard_firewall::cdr::strip_ansi;
///
/// let colored = "\x1b[31mRed Text\x1b[0m Normal";
/// assert_eq!(strip_ansi(colored), "Red Text Normal");
/// ```
pub fn strip_ansi(input: &str) -> String {
    let ansi_regex = regex::Regex::new(r"\x1b\[[0-9;]*[a-zA-Z]").unwrap();
    ansi_regex.replace_all(input, "").to_string()
}

/// Sanitize JSON by text-sanitizing it, then parsing and re-serializing.
/// Anything that doesn't survive the round-trip is eliminated.
pub fn sanitize_json(input: &str) -> Result<String, SanitizeError> {
    let clean_text = sanitize_text(input)?;
    let value: serde_json::Value =
        serde_json::from_str(&clean_text).map_err(|e| SanitizeError::Failed(e.to_string()))?;
    serde_json::to_string(&value).map_err(|e| SanitizeError::Failed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_text_is_unchanged() {
        let input = "Hello, world! This is a test.";
        assert_eq!(sanitize_text(input).unwrap(), input);
    }

    #[test]
    fn strips_control_and_null() {
        assert_eq!(sanitize_text("before\x00after").unwrap(), "beforeafter");
        assert_eq!(sanitize_text("Hello\x00World\x1F!").unwrap(), "HelloWorld!");
    }

    #[test]
    fn strips_zero_width_and_bom() {
        let input = "Hello\u{200B}World\u{FEFF}!";
        assert_eq!(sanitize_text(input).unwrap(), "HelloWorld!");
    }

    #[test]
    fn strips_directional_override() {
        let input = "Hello\u{202E}World!";
        assert_eq!(sanitize_text(input).unwrap(), "HelloWorld!");
    }

    #[test]
    fn preserves_newlines_tabs_and_unicode() {
        assert_eq!(sanitize_text("Line 1\nLine 2\r\nLine 3").unwrap(), "Line 1\nLine 2\r\nLine 3");
        assert_eq!(sanitize_text("Hello 世界! Привет! 🎉").unwrap(), "Hello 世界! Привет! 🎉");
    }

    #[test]
    fn strip_ansi_removes_colors() {
        assert_eq!(strip_ansi("\x1b[31mRed\x1b[0m Normal"), "Red Normal");
    }

    #[test]
    fn sanitize_json_round_trips() {
        let input = r#"{"key": "value", "number": 42}"#;
        let output = sanitize_json(input).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["key"], "value");
    }

    #[test]
    fn size_limit_rejects_oversized_input() {
        let large = "x".repeat(MAX_CONTENT_SIZE + 1);
        let result = sanitize_text(&large);
        assert!(matches!(result, Err(SanitizeError::TooLarge { .. })));
    }
}
