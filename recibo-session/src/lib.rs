//! Recibo session orchestration
//!
//! Ties the audio frame source, the grammar-constrained recognizer, and the
//! token normalizer together into a single-threaded blocking session loop,
//! and hands the finished transcript to the key/value extractor.

pub mod config;
pub mod error;
pub mod extract;
pub mod session;

pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use extract::{KeyValueExtractor, NextNumberExtractor};
pub use session::{SessionController, SessionOutcome, SessionState};
