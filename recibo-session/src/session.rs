//! Session controller state machine
//!
//! Owns the acquisition loop for one transcription session:
//! `Idle -> Listening -> Draining -> Closed`. Normal end of stream,
//! interruption, and frame/recognizer errors all funnel through the same
//! Draining path, so resources are always released and whatever transcript
//! was accumulated is preserved.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

use recibo_audio::FrameSource;
use recibo_stt::{Hypothesis, StreamingRecognizer, TokenNormalizer, TranscriptAccumulator};

use crate::error::{Result, SessionError};
use crate::extract::KeyValueExtractor;

/// Session lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Listening,
    Draining,
    Closed,
}

/// What a completed session hands back: the extracted values, the full
/// token transcript, and the first error recorded on the way down (if any).
/// Interruption is not an error; a best-effort partial transcript always
/// survives.
#[derive(Debug)]
pub struct SessionOutcome {
    pub values: BTreeMap<String, String>,
    pub tokens: Vec<String>,
    pub error: Option<SessionError>,
}

/// Drives one session: frames from the source into the recognizer, final
/// hypotheses through the normalizer into the transcript, and the drained
/// transcript into the extractor.
pub struct SessionController<R, S> {
    // Field order is drop order: the recognizer is released before the
    // audio device.
    recognizer: R,
    source: S,
    normalizer: TokenNormalizer,
    transcript: TranscriptAccumulator,
    stop: Arc<AtomicBool>,
    state: SessionState,
}

impl<R: StreamingRecognizer, S: FrameSource> SessionController<R, S> {
    /// Create an idle session. `stop` is the external cancellation flag,
    /// checked at every frame boundary; share it with the frame source and
    /// the signal handler.
    pub fn new(source: S, recognizer: R, normalizer: TokenNormalizer, stop: Arc<AtomicBool>) -> Self {
        Self {
            recognizer,
            source,
            normalizer,
            transcript: TranscriptAccumulator::new(),
            stop,
            state: SessionState::Idle,
        }
    }

    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run one full session to completion and hand the transcript to the
    /// extractor.
    ///
    /// Any single frame-read or recognizer error ends Listening immediately
    /// (no retry); the error is surfaced in the outcome after cleanup, not
    /// in place of it.
    pub fn run(
        mut self,
        extractor: &dyn KeyValueExtractor,
        keywords: &[String],
    ) -> Result<SessionOutcome> {
        if self.state != SessionState::Idle {
            return Err(SessionError::state(format!(
                "session already started (state {:?})",
                self.state
            )));
        }

        self.state = SessionState::Listening;
        info!("Session listening");

        let mut first_error: Option<SessionError> = None;

        while first_error.is_none() {
            if self.stop.load(Ordering::Relaxed) {
                info!("Stop requested, draining");
                break;
            }

            let frame = match self.source.read_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    debug!("End of audio stream");
                    break;
                }
                Err(e) => {
                    warn!("Frame read failed: {e}");
                    first_error = Some(e.into());
                    break;
                }
            };

            match self.recognizer.feed(&frame) {
                Ok(Hypothesis::Partial(text)) => {
                    // Live feedback only; partials never reach the transcript
                    if !text.is_empty() {
                        trace!(%text, "partial");
                    }
                }
                Ok(hypothesis) => {
                    let segment = self.normalizer.normalize(hypothesis.text());
                    if !segment.is_empty() {
                        info!("Final segment: {}", segment.join(" "));
                    }
                    if let Err(e) = self.transcript.append(segment) {
                        first_error = Some(e.into());
                    }
                }
                Err(e) => {
                    warn!("Recognizer failed: {e}");
                    first_error = Some(e.into());
                }
            }
        }

        // Draining runs on every exit path. The first error wins; later
        // cleanup failures are logged but never stop the remaining steps.
        self.state = SessionState::Draining;

        match self.recognizer.flush() {
            Ok(hypothesis) => {
                let text = hypothesis.text();
                if !text.is_empty() {
                    let segment = self.normalizer.normalize(text);
                    debug!("Flush segment: {}", segment.join(" "));
                    if let Err(e) = self.transcript.append(segment) {
                        record(&mut first_error, e.into());
                    }
                }
            }
            Err(e) => record(&mut first_error, e.into()),
        }

        if let Err(e) = self.source.close() {
            record(&mut first_error, e.into());
        }

        let tokens = self.transcript.drain().map_err(SessionError::from)?;
        self.state = SessionState::Closed;

        let values = extractor.extract(&tokens, keywords);
        info!(
            "Session closed: {} tokens, {} values extracted",
            tokens.len(),
            values.len()
        );

        Ok(SessionOutcome {
            values,
            tokens,
            error: first_error,
        })
    }
}

fn record(first_error: &mut Option<SessionError>, err: SessionError) {
    warn!("Cleanup error: {err}");
    if first_error.is_none() {
        *first_error = Some(err);
    }
}
