//! Streaming recognizer boundary

use crate::error::Result;

/// One recognizer report, either per fed frame or from the shutdown flush.
///
/// Text is whitespace-delimited and drawn from the compiled grammar
/// vocabulary; the recognizer enforces that, so it is not re-validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hypothesis {
    /// Tentative in-progress text, may still change before finalization
    Partial(String),
    /// Stable segment text; the speaker paused, the session continues
    Final(String),
    /// Stable trailing text produced exactly once at end of stream
    FlushFinal(String),
}

impl Hypothesis {
    pub fn text(&self) -> &str {
        match self {
            Self::Partial(text) | Self::Final(text) | Self::FlushFinal(text) => text,
        }
    }

    /// True for results that belong in the transcript
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Partial(_))
    }
}

/// Grammar-constrained streaming recognition over fixed-size PCM frames.
///
/// The grammar constraint is applied when the implementation is constructed
/// from a [`Vocabulary`](crate::vocab::Vocabulary).
pub trait StreamingRecognizer {
    /// Feed one 16-bit mono PCM frame. Returns [`Hypothesis::Partial`]
    /// while speech is in progress and [`Hypothesis::Final`] when a pause
    /// completes a segment.
    fn feed(&mut self, frame: &[i16]) -> Result<Hypothesis>;

    /// End-of-stream flush covering any not-yet-finalized trailing speech.
    /// Returns [`Hypothesis::FlushFinal`], possibly with empty text.
    fn flush(&mut self) -> Result<Hypothesis>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finality() {
        assert!(!Hypothesis::Partial("uno".into()).is_final());
        assert!(Hypothesis::Final("uno".into()).is_final());
        assert!(Hypothesis::FlushFinal(String::new()).is_final());
    }

    #[test]
    fn test_text_access() {
        assert_eq!(Hypothesis::Final("total uno".into()).text(), "total uno");
        assert_eq!(Hypothesis::FlushFinal(String::new()).text(), "");
    }
}
