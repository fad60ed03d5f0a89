//! Microphone capture with cpal
//!
//! The real-time input callback converts samples to i16 mono and writes them
//! into a lock-free ring buffer; the session loop pulls fixed-size frames
//! with a blocking read. Buffer overflow drops samples with a warning
//! instead of failing the stream.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Host, Stream, StreamConfig};
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::buffer::CircularBuffer;
use crate::error::{AudioError, Result};
use crate::source::FrameSource;
use crate::AudioConfig;

/// How long a blocked read waits before re-checking cancellation
const READ_WAKE_INTERVAL: Duration = Duration::from_millis(100);

/// Audio input device information
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub index: usize,
    pub name: String,
    pub is_default: bool,
    pub max_input_channels: u16,
    pub default_sample_rate: u32,
}

/// Blocking microphone frame source backed by a cpal input stream
pub struct AudioCapture {
    config: AudioConfig,
    buffer: Arc<Mutex<CircularBuffer>>,
    frame_ready: Arc<Condvar>,
    stream: Option<Stream>,
    is_capturing: Arc<AtomicBool>,
    cancel: Arc<AtomicBool>,
    failed: Arc<AtomicBool>,
    host: Host,
}

impl AudioCapture {
    /// Create a new capture instance. The device is not opened until
    /// [`start`](Self::start).
    pub fn new(config: AudioConfig) -> Result<Self> {
        if config.frame_size == 0 {
            return Err(AudioError::invalid_config("frame_size must be positive"));
        }
        if config.sample_rate == 0 {
            return Err(AudioError::invalid_config("sample_rate must be positive"));
        }

        let capacity = (config.buffer_duration * config.sample_rate as f32) as usize;
        if capacity < config.frame_size {
            return Err(AudioError::invalid_config(
                "buffer_duration too small to hold one frame",
            ));
        }

        Ok(Self {
            config,
            buffer: Arc::new(Mutex::new(CircularBuffer::new(capacity))),
            frame_ready: Arc::new(Condvar::new()),
            stream: None,
            is_capturing: Arc::new(AtomicBool::new(false)),
            cancel: Arc::new(AtomicBool::new(false)),
            failed: Arc::new(AtomicBool::new(false)),
            host: cpal::default_host(),
        })
    }

    /// Shared cancellation flag. Setting it makes any blocked
    /// [`read_frame`](FrameSource::read_frame) return end-of-stream within
    /// one wake interval.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// List available audio input devices
    pub fn list_devices() -> Result<Vec<DeviceInfo>> {
        let host = cpal::default_host();
        let default_input = host.default_input_device();
        let mut devices = Vec::new();

        for (index, device) in host
            .input_devices()
            .map_err(|e| AudioError::device(format!("Failed to enumerate devices: {e}")))?
            .enumerate()
        {
            let name = device
                .name()
                .unwrap_or_else(|_| format!("Unknown Device {index}"));

            let is_default = default_input
                .as_ref()
                .and_then(|d| d.name().ok())
                .map(|n| n == name)
                .unwrap_or(false);

            let (max_input_channels, default_sample_rate) = device
                .default_input_config()
                .map(|c| (c.channels(), c.sample_rate().0))
                .unwrap_or((0, 0));

            devices.push(DeviceInfo {
                index,
                name,
                is_default,
                max_input_channels,
                default_sample_rate,
            });
        }

        Ok(devices)
    }

    /// Open the input device and start the stream
    pub fn start(&mut self) -> Result<()> {
        if self.is_capturing.load(Ordering::Relaxed) {
            warn!("Already capturing");
            return Ok(());
        }

        let device = self.select_device()?;
        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());

        let supported_config = device
            .default_input_config()
            .map_err(|e| AudioError::device(format!("Failed to get device config: {e}")))?;
        let source_channels = supported_config.channels();

        info!(
            "Starting audio capture: {} ({} ch, {} Hz, frame {})",
            device_name, source_channels, self.config.sample_rate, self.config.frame_size
        );

        self.buffer.lock().clear();
        self.cancel.store(false, Ordering::Relaxed);
        self.failed.store(false, Ordering::Relaxed);

        let stream_config = StreamConfig {
            channels: source_channels,
            sample_rate: cpal::SampleRate(self.config.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let buffer = Arc::clone(&self.buffer);
        let frame_ready = Arc::clone(&self.frame_ready);
        let is_capturing = Arc::clone(&self.is_capturing);

        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if !is_capturing.load(Ordering::Relaxed) {
                        return;
                    }

                    // Left channel only; averaging halves amplitude when the
                    // mic feeds a single channel.
                    let samples: Vec<i16> = data
                        .chunks(source_channels as usize)
                        .map(|frame| (frame[0].clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
                        .collect();

                    let written = buffer.lock().write(&samples);
                    if written < samples.len() {
                        warn!("Buffer overflow, dropped {} samples", samples.len() - written);
                    }
                    frame_ready.notify_one();
                },
                {
                    let failed = Arc::clone(&self.failed);
                    let frame_ready = Arc::clone(&self.frame_ready);
                    move |err| {
                        warn!("Audio stream error: {err}");
                        failed.store(true, Ordering::Relaxed);
                        frame_ready.notify_one();
                    }
                },
                None,
            )
            .map_err(|e| AudioError::stream(format!("Failed to build stream: {e}")))?;

        stream
            .play()
            .map_err(|e| AudioError::stream(format!("Failed to start stream: {e}")))?;

        self.stream = Some(stream);
        self.is_capturing.store(true, Ordering::Relaxed);
        debug!("Audio capture started");

        Ok(())
    }

    fn select_device(&self) -> Result<Device> {
        match self.config.device_index {
            Some(index) => self
                .host
                .input_devices()
                .map_err(|e| AudioError::device(format!("Failed to enumerate devices: {e}")))?
                .nth(index)
                .ok_or_else(|| AudioError::device(format!("Device index {index} not found"))),
            None => self
                .host
                .default_input_device()
                .ok_or_else(|| AudioError::device("No default input device found")),
        }
    }

    /// Whether the stream is currently open
    pub fn is_active(&self) -> bool {
        self.is_capturing.load(Ordering::Relaxed)
    }
}

impl FrameSource for AudioCapture {
    fn read_frame(&mut self) -> Result<Option<Vec<i16>>> {
        let frame_size = self.config.frame_size;
        let mut buffer = self.buffer.lock();

        loop {
            if self.cancel.load(Ordering::Relaxed) {
                return Ok(None);
            }
            if self.failed.load(Ordering::Relaxed) {
                return Err(AudioError::stream("audio stream reported an error"));
            }

            if buffer.available() >= frame_size {
                let mut frame = vec![0i16; frame_size];
                let read = buffer.read(&mut frame);
                frame.truncate(read);
                return Ok(Some(frame));
            }

            if !self.is_capturing.load(Ordering::Relaxed) {
                // Stream closed and the remainder is less than one frame
                return Ok(None);
            }

            // Periodic wake so cancellation is observed while blocked
            self.frame_ready.wait_for(&mut buffer, READ_WAKE_INTERVAL);
        }
    }

    fn close(&mut self) -> Result<()> {
        self.is_capturing.store(false, Ordering::Relaxed);
        if let Some(stream) = self.stream.take() {
            drop(stream);
            info!("Audio capture stopped");
        }
        self.frame_ready.notify_one();
        Ok(())
    }
}

impl Drop for AudioCapture {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_creation() {
        let capture = AudioCapture::new(AudioConfig::default()).unwrap();
        assert!(!capture.is_active());
    }

    #[test]
    fn test_invalid_frame_size_rejected() {
        let config = AudioConfig {
            frame_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            AudioCapture::new(config),
            Err(AudioError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_buffer_must_hold_one_frame() {
        let config = AudioConfig {
            buffer_duration: 0.0,
            ..Default::default()
        };
        assert!(AudioCapture::new(config).is_err());
    }

    #[test]
    fn test_cancel_unblocks_read() {
        let mut capture = AudioCapture::new(AudioConfig::default()).unwrap();
        capture.cancel_flag().store(true, Ordering::Relaxed);

        // Never started, nothing buffered: must return end-of-stream, not block
        assert_eq!(capture.read_frame().unwrap(), None);
    }
}
