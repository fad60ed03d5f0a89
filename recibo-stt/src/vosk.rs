//! Vosk-backed streaming recognizer (Kaldi grammar decoding)
//!
//! Requires libvosk at runtime, so the whole module sits behind the `vosk`
//! cargo feature.

use std::path::Path;

use ::vosk::{CompleteResult, DecodingState, Model, Recognizer};
use tracing::debug;

use crate::error::{Result, SttError};
use crate::recognizer::{Hypothesis, StreamingRecognizer};
use crate::vocab::Vocabulary;

/// Streaming recognizer over a vosk acoustic model with the vocabulary
/// compiled in as a grammar constraint.
pub struct VoskRecognizer {
    inner: Recognizer,
}

impl VoskRecognizer {
    /// Load the model and compile the grammar constraint.
    ///
    /// A missing or unreadable model directory is a configuration error;
    /// no session state exists yet when this fails.
    pub fn new<P: AsRef<Path>>(
        model_dir: P,
        sample_rate: u32,
        vocabulary: &Vocabulary,
    ) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        if !model_dir.is_dir() {
            return Err(SttError::config(format!(
                "model directory not found: {}",
                model_dir.display()
            )));
        }

        let model = Model::new(model_dir.to_string_lossy()).ok_or_else(|| {
            SttError::config(format!("failed to load model from {}", model_dir.display()))
        })?;

        let grammar: Vec<&str> = vocabulary.words().iter().map(String::as_str).collect();
        let inner = Recognizer::new_with_grammar(&model, sample_rate as f32, &grammar)
            .ok_or_else(|| SttError::recognizer("failed to create grammar-constrained recognizer"))?;

        debug!("Grammar compiled with {} words", grammar.len());
        Ok(Self { inner })
    }
}

impl StreamingRecognizer for VoskRecognizer {
    fn feed(&mut self, frame: &[i16]) -> Result<Hypothesis> {
        match self.inner.accept_waveform(frame) {
            DecodingState::Finalized => Ok(Hypothesis::Final(single_text(self.inner.result()))),
            DecodingState::Running => Ok(Hypothesis::Partial(
                self.inner.partial_result().partial.to_string(),
            )),
            DecodingState::Failed => Err(SttError::recognizer("recognizer rejected waveform")),
        }
    }

    fn flush(&mut self) -> Result<Hypothesis> {
        Ok(Hypothesis::FlushFinal(single_text(
            self.inner.final_result(),
        )))
    }
}

fn single_text(result: CompleteResult) -> String {
    result
        .single()
        .map(|alternative| alternative.text.to_string())
        .unwrap_or_default()
}
