//! Error types for transcription operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SttError>;

#[derive(Error, Debug)]
pub enum SttError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Recognizer error: {0}")]
    Recognizer(String),

    #[error("State error: {0}")]
    State(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SttError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn recognizer<S: Into<String>>(msg: S) -> Self {
        Self::Recognizer(msg.into())
    }

    pub fn state<S: Into<String>>(msg: S) -> Self {
        Self::State(msg.into())
    }
}
