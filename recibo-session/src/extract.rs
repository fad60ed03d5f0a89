//! Key/value extraction boundary
//!
//! The session hands the drained transcript to this collaborator. Tokens
//! arrive in transcript order with keyword tokens verbatim and spoken digit
//! runs already merged into numeric literals ("12.50"), never raw digit
//! words.

use std::collections::BTreeMap;

/// Maps keyword tokens to the numeric strings extracted for them
pub trait KeyValueExtractor {
    /// Keywords with no extractable value are omitted from the result.
    fn extract(&self, tokens: &[String], keywords: &[String]) -> BTreeMap<String, String>;
}

/// Reference extractor: each keyword takes the first numeric literal that
/// follows its first (case-insensitive) occurrence.
#[derive(Debug, Clone, Default)]
pub struct NextNumberExtractor;

impl KeyValueExtractor for NextNumberExtractor {
    fn extract(&self, tokens: &[String], keywords: &[String]) -> BTreeMap<String, String> {
        let mut values = BTreeMap::new();

        for keyword in keywords {
            let Some(pos) = tokens.iter().position(|t| t.eq_ignore_ascii_case(keyword)) else {
                continue;
            };
            if let Some(value) = tokens[pos + 1..].iter().find(|t| is_numeric_literal(t)) {
                values.insert(keyword.clone(), value.clone());
            }
        }

        values
    }
}

fn is_numeric_literal(token: &str) -> bool {
    !token.is_empty()
        && token.chars().any(|c| c.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_keyword_takes_next_number() {
        let tokens = tokens(&["SUB", "10.00", "TOTAL", "11.00"]);
        let keywords = vec!["SUB".to_string(), "TOTAL".to_string()];

        let values = NextNumberExtractor.extract(&tokens, &keywords);
        assert_eq!(values["SUB"], "10.00");
        assert_eq!(values["TOTAL"], "11.00");
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let tokens = tokens(&["total", "9.99"]);
        let keywords = vec!["TOTAL".to_string()];

        let values = NextNumberExtractor.extract(&tokens, &keywords);
        assert_eq!(values["TOTAL"], "9.99");
    }

    #[test]
    fn test_missing_keyword_omitted() {
        let tokens = tokens(&["total", "9.99"]);
        let keywords = vec!["subtotal".to_string(), "total".to_string()];

        let values = NextNumberExtractor.extract(&tokens, &keywords);
        assert!(!values.contains_key("subtotal"));
        assert_eq!(values["total"], "9.99");
    }

    #[test]
    fn test_keyword_without_number_omitted() {
        let tokens = tokens(&["venta", "[unk]"]);
        let keywords = vec!["venta".to_string()];

        assert!(NextNumberExtractor.extract(&tokens, &keywords).is_empty());
    }

    #[test]
    fn test_intervening_words_skipped() {
        let tokens = tokens(&["total", "[unk]", "dolares", "12.50"]);
        let keywords = vec!["total".to_string()];

        let values = NextNumberExtractor.extract(&tokens, &keywords);
        assert_eq!(values["total"], "12.50");
    }

    #[test]
    fn test_numeric_literal_detection() {
        assert!(is_numeric_literal("12.50"));
        assert!(is_numeric_literal("7"));
        assert!(is_numeric_literal("1,5"));
        assert!(!is_numeric_literal("total"));
        assert!(!is_numeric_literal("."));
        assert!(!is_numeric_literal(""));
    }
}
