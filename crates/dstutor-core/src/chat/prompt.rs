//! Fixed tutoring directive sent with every model call.

/// Steers the model toward data-science topics. Never stored in history
/// and never shown in the transcript.
pub const SYSTEM_DIRECTIVE: &str = "You are a Data Science Expert Tutor. Rules:
1. Only answer data science questions (ML, stats, programming, analytics)
2. For non-DS queries: \"I specialize in data science topics\"
3. Maintain conversation context
4. Explain concepts simply with examples";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_lists_four_rules() {
        assert!(SYSTEM_DIRECTIVE.starts_with("You are a Data Science Expert Tutor. Rules:"));
        assert_eq!(SYSTEM_DIRECTIVE.lines().count(), 5);
        assert!(SYSTEM_DIRECTIVE.contains("\"I specialize in data science topics\""));
    }
}
