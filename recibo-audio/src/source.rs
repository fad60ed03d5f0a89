//! Blocking frame-source boundary consumed by the session loop

use crate::error::Result;

/// Pull-based source of fixed-size 16-bit mono PCM frames.
///
/// `read_frame` blocks until a full frame is available and returns
/// `Ok(None)` once the stream has ended or capture was cancelled; a stream
/// failure is an error. `close` releases the device and must be safe to
/// call more than once.
pub trait FrameSource {
    fn read_frame(&mut self) -> Result<Option<Vec<i16>>>;

    fn close(&mut self) -> Result<()>;
}
