//! # Canary Token System for Data-Egress Detection
//!
//! Embeds a unique, unforgeable marker alongside a system prompt so that any
//! later disclosure of that prompt in model output is reliably detectable.
//! Inspired by the Rebuff framework's canary token approach.

use uuid::Uuid;

/// Prefix that makes canary tokens greppable in logs and outputs.
const CANARY_PREFIX: &str = "CANARY";

/// Injection wrapper, placed ahead of the content it protects.
const INJECTION_FORMAT: &str = "[SYSTEM_CANARY:{}]";

/// Generate a new unique canary token (`CANARY-<uuid-v4>`).
pub fn generate_canary() -> String {
    let id = Uuid::new_v4();
    format!("{}-{}", CANARY_PREFIX, id.as_hyphenated())
}

/// Prepend a canary token to `prompt` in the injection format.
pub fn inject_canary(prompt: &str, canary: &str) -> String {
    format!("{}\n{}", INJECTION_FORMAT.replace("{}", canary), prompt)
}

/// Exact substring match for a specific canary token in `output`.
pub fn detect_leak(output: &str, canary: &str) -> bool {
    output.contains(canary)
}

/// Looser check for canary-like prefixes, for catching obfuscated leaks.
pub fn detect_canary_pattern(output: &str) -> bool {
    output.contains(CANARY_PREFIX) || output.contains("SYSTEM_CANARY")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_canary_is_unique_and_prefixed() {
        let c1 = generate_canary();
        let c2 = generate_canary();
        assert_ne!(c1, c2);
        assert!(c1.starts_with(CANARY_PREFIX));
    }

    #[test]
    fn inject_canary_preserves_prompt() {
        let prompt = "You are a helpful assistant.";
        let canary = generate_canary();
        let injected = inject_canary(prompt, &canary);
        assert!(injected.starts_with("[SYSTEM_CANARY:"));
        assert!(injected.ends_with(prompt));
    }

    #[test]
    fn detect_leak_positive_and_negative() {
        let canary = generate_canary();
        let leaked = format!("The system prompt contains {} which is secret", canary);
        assert!(detect_leak(&leaked, &canary));
        assert!(!detect_leak("This is a normal response.", &canary));
    }

    #[test]
    fn detect_canary_pattern_catches_partial_leaks() {
        assert!(detect_canary_pattern("The CANARY-123 was leaked"));
        assert!(detect_canary_pattern("Found SYSTEM_CANARY in output"));
        assert!(!detect_canary_pattern("This is clean output"));
    }
}
