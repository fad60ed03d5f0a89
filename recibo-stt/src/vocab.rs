//! Grammar vocabulary and the spoken-digit mapping
//!
//! The vocabulary is compiled once at startup and constrains the recognizer
//! to a closed word set: domain keywords, the Spanish digit words, the two
//! decimal separator words, and a catch-all for everything else.

use std::collections::HashMap;

use crate::error::{Result, SttError};

/// Spanish digit words; the index is the digit value
pub const DIGIT_WORDS: [&str; 10] = [
    "cero", "uno", "dos", "tres", "cuatro", "cinco", "seis", "siete", "ocho", "nueve",
];

/// Spoken decimal separator words
pub const SEPARATOR_WORDS: [&str; 2] = ["punto", "coma"];

/// Catch-all token the recognizer emits for out-of-grammar speech
pub const UNKNOWN_TOKEN: &str = "[unk]";

/// Closed word set for grammar-constrained recognition.
///
/// Immutable after construction; one instance can be shared read-only by any
/// number of sessions.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// Build the vocabulary from the supplied domain keywords.
    ///
    /// The result is the union of the keywords, the digit words, the
    /// separator words, and [`UNKNOWN_TOKEN`]. Fails if the keyword list is
    /// empty or a keyword collides with a word reserved for number spelling.
    pub fn build<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        if keywords.is_empty() {
            return Err(SttError::config("keyword list is empty"));
        }

        let mut words =
            Vec::with_capacity(keywords.len() + DIGIT_WORDS.len() + SEPARATOR_WORDS.len() + 1);

        for keyword in keywords {
            let keyword = keyword.as_ref();
            if keyword.is_empty() {
                return Err(SttError::config("empty keyword in keyword list"));
            }
            if DIGIT_WORDS.contains(&keyword) || SEPARATOR_WORDS.contains(&keyword) {
                return Err(SttError::config(format!(
                    "keyword '{keyword}' is reserved for number spelling"
                )));
            }
            words.push(keyword.to_string());
        }

        words.push(UNKNOWN_TOKEN.to_string());
        words.extend(DIGIT_WORDS.iter().map(|w| (*w).to_string()));
        words.extend(SEPARATOR_WORDS.iter().map(|w| (*w).to_string()));

        Ok(Self { words })
    }

    /// All words in the vocabulary
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Serialize to the JSON string-array form the recognizer's grammar
    /// constraint consumes.
    pub fn to_grammar_json(&self) -> Result<String> {
        serde_json::to_string(&self.words)
            .map_err(|e| SttError::config(format!("failed to serialize grammar: {e}")))
    }
}

/// Total, fixed mapping from spoken digit/separator word to one output
/// character.
///
/// Every key is a member of every built [`Vocabulary`], which holds by
/// construction since `Vocabulary::build` always includes the digit and
/// separator word sets.
#[derive(Debug, Clone)]
pub struct DigitMap {
    map: HashMap<String, char>,
}

impl DigitMap {
    /// Mapping with "coma" emitting `'.'`, the form downstream numeric
    /// parsing expects.
    pub fn new() -> Self {
        Self::with_comma_output('.')
    }

    /// Mapping with a caller-chosen output character for "coma".
    pub fn with_comma_output(comma: char) -> Self {
        let mut map = HashMap::new();
        for (value, word) in DIGIT_WORDS.iter().enumerate() {
            map.insert((*word).to_string(), (b'0' + value as u8) as char);
        }
        map.insert("punto".to_string(), '.');
        map.insert("coma".to_string(), comma);
        Self { map }
    }

    /// Output character for a spoken word, if it is a digit/separator word
    pub fn lookup(&self, word: &str) -> Option<char> {
        self.map.get(word).copied()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }
}

impl Default for DigitMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_includes_fixed_sets() {
        let vocab = Vocabulary::build(&["subtotal", "total"]).unwrap();

        assert!(vocab.contains("subtotal"));
        assert!(vocab.contains("total"));
        assert!(vocab.contains(UNKNOWN_TOKEN));
        for word in DIGIT_WORDS.iter().chain(SEPARATOR_WORDS.iter()) {
            assert!(vocab.contains(word), "missing fixed word {word}");
        }
        assert_eq!(vocab.len(), 2 + 1 + 10 + 2);
    }

    #[test]
    fn test_empty_keywords_rejected() {
        let keywords: [&str; 0] = [];
        assert!(Vocabulary::build(&keywords).is_err());
    }

    #[test]
    fn test_reserved_keyword_rejected() {
        assert!(Vocabulary::build(&["total", "uno"]).is_err());
        assert!(Vocabulary::build(&["coma"]).is_err());
    }

    #[test]
    fn test_grammar_json_round_trip() {
        let vocab = Vocabulary::build(&["venta"]).unwrap();
        let json = vocab.to_grammar_json().unwrap();

        let parsed: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vocab.words());
    }

    #[test]
    fn test_digit_map_is_total_over_vocab_fixed_sets() {
        let map = DigitMap::new();
        let vocab = Vocabulary::build(&["total"]).unwrap();

        for word in map.words() {
            assert!(vocab.contains(word), "digit map key {word} not in vocabulary");
        }
        assert_eq!(map.lookup("cero"), Some('0'));
        assert_eq!(map.lookup("nueve"), Some('9'));
        assert_eq!(map.lookup("punto"), Some('.'));
        assert_eq!(map.lookup("coma"), Some('.'));
        assert_eq!(map.lookup("total"), None);
    }

    #[test]
    fn test_comma_output_is_configurable() {
        let map = DigitMap::with_comma_output(',');
        assert_eq!(map.lookup("coma"), Some(','));
        assert_eq!(map.lookup("punto"), Some('.'));
    }
}
