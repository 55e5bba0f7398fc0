// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Light clean-up applied before tokenisation.
//
//   question → trimmed on both ends
//   context  → trimmed on the right only
//
// answer_start is a character offset into the raw context, so
// removing anything from the left of the context would shift
// every answer. Trailing whitespace is safe to drop.

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    pub fn clean_question<'a>(&self, question: &'a str) -> &'a str {
        question.trim()
    }

    pub fn clean_context<'a>(&self, context: &'a str) -> &'a str {
        context.trim_end()
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_is_trimmed() {
        let p = Preprocessor::new();
        assert_eq!(p.clean_question("  \tWho built it?\n"), "Who built it?");
    }

    #[test]
    fn test_context_keeps_leading_whitespace() {
        let p = Preprocessor::new();
        let raw = "  The dome is golden.  \n";
        let cleaned = p.clean_context(raw);
        assert_eq!(cleaned, "  The dome is golden.");
        // answer offsets computed against the raw text still line up
        assert_eq!(&cleaned[6..10], "dome");
        assert_eq!(&raw[6..10], "dome");
    }

    #[test]
    fn test_empty_string() {
        let p = Preprocessor::new();
        assert_eq!(p.clean_question(""), "");
        assert_eq!(p.clean_context(""), "");
    }
}
