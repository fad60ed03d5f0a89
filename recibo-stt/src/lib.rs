//! Recibo speech-to-text core
//!
//! Grammar-constrained streaming transcription for spoken retail receipts:
//! a closed Spanish vocabulary (digit words, decimal separators, receipt
//! keywords), a streaming recognizer boundary, and the normalization stage
//! that collapses spoken digit runs into literal numeric tokens.
//!
//! ## Quick Start
//!
//! ```
//! use recibo_stt::{DigitMap, TokenNormalizer};
//!
//! let normalizer = TokenNormalizer::new(DigitMap::new());
//! let tokens = normalizer.normalize("total uno dos punto cinco cero");
//! assert_eq!(tokens, vec!["total", "12.50"]);
//! ```

pub mod error;
pub mod normalize;
pub mod recognizer;
pub mod transcript;
pub mod vocab;

#[cfg(feature = "vosk")]
pub mod vosk;

pub use error::{Result, SttError};
pub use normalize::{NormalizedSegment, TokenNormalizer};
pub use recognizer::{Hypothesis, StreamingRecognizer};
pub use transcript::TranscriptAccumulator;
pub use vocab::{DigitMap, Vocabulary, DIGIT_WORDS, SEPARATOR_WORDS, UNKNOWN_TOKEN};

#[cfg(feature = "vosk")]
pub use self::vosk::VoskRecognizer;

/// Sample rate the receipt models expect (16kHz mono)
pub const SAMPLE_RATE: u32 = 16000;
