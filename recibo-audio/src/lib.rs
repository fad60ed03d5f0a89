//! Recibo audio capture
//!
//! Blocking, pull-based microphone frames for the streaming recognizer.
//!
//! ## Architecture
//!
//! ```text
//! Audio Device (cpal)
//!   │  f32 callback → i16 mono
//!   ├─> CircularBuffer (lock-free ringbuf)
//!   │     │
//!   │     └─> blocking read_frame() → fixed-size PCM frames
//!   │
//!   └─> AudioCapture (FrameSource for the session loop)
//! ```

pub mod buffer;
pub mod capture;
pub mod error;
pub mod source;

pub use buffer::CircularBuffer;
pub use capture::{AudioCapture, DeviceInfo};
pub use error::{AudioError, Result};
pub use source::FrameSource;

/// Sample rate expected by the recognizer models (16kHz)
pub const TARGET_SAMPLE_RATE: u32 = 16000;

/// Samples per frame handed to the recognizer
pub const DEFAULT_FRAME_SIZE: usize = 4096;

/// Audio configuration
#[derive(Debug, Clone)]
pub struct AudioConfig {
    /// Capture sample rate (default: 16000 Hz)
    pub sample_rate: u32,
    /// Number of output channels (always mono downstream)
    pub channels: u16,
    /// Samples per frame returned by `read_frame` (default: 4096)
    pub frame_size: usize,
    /// Ring buffer duration in seconds (default: 10.0)
    pub buffer_duration: f32,
    /// Device index (None = default input device)
    pub device_index: Option<usize>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: TARGET_SAMPLE_RATE,
            channels: 1,
            frame_size: DEFAULT_FRAME_SIZE,
            buffer_duration: 10.0,
            device_index: None,
        }
    }
}
