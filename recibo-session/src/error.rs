//! Session error taxonomy

use recibo_audio::AudioError;
use recibo_stt::SttError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Error, Debug)]
pub enum SessionError {
    /// Missing or invalid vocabulary/model resource; fatal, surfaced before
    /// any session state exists
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Audio device failed to open or read
    #[error("Audio resource error: {0}")]
    Audio(#[from] AudioError),

    /// Recognizer resource failure
    #[error("Recognizer error: {0}")]
    Recognizer(String),

    /// Operation attempted in a state that forbids it
    #[error("State error: {0}")]
    State(String),
}

impl SessionError {
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn state<S: Into<String>>(msg: S) -> Self {
        Self::State(msg.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<SttError> for SessionError {
    fn from(err: SttError) -> Self {
        match err {
            SttError::Config(msg) => Self::Configuration(msg),
            SttError::State(msg) => Self::State(msg),
            other => Self::Recognizer(other.to_string()),
        }
    }
}
