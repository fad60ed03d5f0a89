//! Session transcript accumulation

use crate::error::{Result, SttError};
use crate::normalize::NormalizedSegment;

/// Append-only, consumed-once transcript for a single session.
///
/// Segments are appended in finalization order and never reordered or
/// deduplicated. `drain` flattens and consumes the transcript; any further
/// operation is a state error.
#[derive(Debug)]
pub struct TranscriptAccumulator {
    tokens: Option<Vec<String>>,
    segments: usize,
}

impl TranscriptAccumulator {
    pub fn new() -> Self {
        Self {
            tokens: Some(Vec::new()),
            segments: 0,
        }
    }

    /// Append one normalized segment in arrival order. Empty segments are
    /// legal and contribute no tokens.
    pub fn append(&mut self, segment: NormalizedSegment) -> Result<()> {
        let tokens = self
            .tokens
            .as_mut()
            .ok_or_else(|| SttError::state("append on drained transcript"))?;
        tokens.extend(segment);
        self.segments += 1;
        Ok(())
    }

    /// Number of segments appended so far
    pub fn segment_count(&self) -> usize {
        self.segments
    }

    /// Number of tokens accumulated so far (0 once drained)
    pub fn token_count(&self) -> usize {
        self.tokens.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.token_count() == 0
    }

    /// Return the full token sequence and mark the accumulator consumed.
    /// At-most-once: a second drain is a state error.
    pub fn drain(&mut self) -> Result<Vec<String>> {
        self.tokens
            .take()
            .ok_or_else(|| SttError::state("transcript already drained"))
    }
}

impl Default for TranscriptAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_preserved() {
        let mut transcript = TranscriptAccumulator::new();
        transcript
            .append(vec!["SUB".to_string(), "10.00".to_string()])
            .unwrap();
        transcript.append(Vec::new()).unwrap();
        transcript
            .append(vec!["TOTAL".to_string(), "11.00".to_string()])
            .unwrap();

        assert_eq!(transcript.segment_count(), 3);
        assert_eq!(transcript.token_count(), 4);

        let tokens = transcript.drain().unwrap();
        assert_eq!(tokens, vec!["SUB", "10.00", "TOTAL", "11.00"]);
    }

    #[test]
    fn test_double_drain_fails() {
        let mut transcript = TranscriptAccumulator::new();
        transcript.append(vec!["total".to_string()]).unwrap();

        transcript.drain().unwrap();
        assert!(matches!(transcript.drain(), Err(SttError::State(_))));
    }

    #[test]
    fn test_append_after_drain_fails() {
        let mut transcript = TranscriptAccumulator::new();
        transcript.drain().unwrap();

        let result = transcript.append(vec!["total".to_string()]);
        assert!(matches!(result, Err(SttError::State(_))));
    }

    #[test]
    fn test_empty_transcript_drains_empty() {
        let mut transcript = TranscriptAccumulator::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.drain().unwrap(), Vec::<String>::new());
    }
}
