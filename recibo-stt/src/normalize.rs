//! Final-hypothesis token normalization
//!
//! Rewrites raw recognizer text ("total uno dos punto cinco cero") into a
//! token sequence where adjacent digit/separator words are merged into one
//! numeric literal ("total", "12.50") and every other word passes through
//! unchanged.

use crate::vocab::DigitMap;

/// Ordered token sequence produced from one final hypothesis
pub type NormalizedSegment = Vec<String>;

/// Token normalizer for final hypotheses
#[derive(Debug, Clone)]
pub struct TokenNormalizer {
    digits: DigitMap,
}

impl TokenNormalizer {
    pub fn new(digits: DigitMap) -> Self {
        Self { digits }
    }

    /// Normalize one whitespace-delimited hypothesis.
    ///
    /// Single left-to-right pass with no lookahead: mapped words extend an
    /// open numeric run, any other word closes the run (emitting it as one
    /// token) and is emitted on its own. Empty input yields an empty
    /// segment.
    pub fn normalize(&self, raw_text: &str) -> NormalizedSegment {
        let mut tokens = Vec::new();
        let mut run = String::new();

        for word in raw_text.split_whitespace() {
            match self.digits.lookup(word) {
                Some(ch) => run.push(ch),
                None => {
                    if !run.is_empty() {
                        tokens.push(std::mem::take(&mut run));
                    }
                    tokens.push(word.to_string());
                }
            }
        }

        if !run.is_empty() {
            tokens.push(run);
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TokenNormalizer {
        TokenNormalizer::new(DigitMap::new())
    }

    #[test]
    fn test_digit_run_merging() {
        let tokens = normalizer().normalize("uno dos punto cinco cero");
        assert_eq!(tokens, vec!["12.50"]);
    }

    #[test]
    fn test_keyword_pass_through() {
        let tokens = normalizer().normalize("TOTAL uno dos");
        assert_eq!(tokens, vec!["TOTAL", "12"]);
    }

    #[test]
    fn test_keyword_closes_run() {
        let tokens = normalizer().normalize("total uno dos itbms tres");
        assert_eq!(tokens, vec!["total", "12", "itbms", "3"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalizer().normalize("").is_empty());
        assert!(normalizer().normalize("   ").is_empty());
    }

    #[test]
    fn test_unknown_token_passes_through() {
        let tokens = normalizer().normalize("[unk] uno [unk]");
        assert_eq!(tokens, vec!["[unk]", "1", "[unk]"]);
    }

    #[test]
    fn test_comma_separator_configurable() {
        let normalizer = TokenNormalizer::new(DigitMap::with_comma_output(','));
        let tokens = normalizer.normalize("uno coma cinco");
        assert_eq!(tokens, vec!["1,5"]);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let normalizer = normalizer();
        let once = normalizer.normalize("SUB uno cero punto cero cero total nueve");
        let twice = normalizer.normalize(&once.join(" "));
        assert_eq!(once, twice);
    }
}
