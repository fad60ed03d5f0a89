//! Recibo - spoken receipt transcription
//!
//! One full session: open the microphone, run grammar-constrained streaming
//! recognition, normalize spoken numbers, and extract the receipt fields.
//! Exits 2 on configuration failure, 1 on runtime session failure.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use clap::Parser;
use signal_hook::consts::{SIGINT, SIGTERM};
use tracing::{error, info};

use recibo_audio::{AudioCapture, AudioConfig};
use recibo_session::{
    NextNumberExtractor, SessionConfig, SessionController, SessionError,
};
use recibo_stt::{DigitMap, TokenNormalizer, Vocabulary, VoskRecognizer};

#[derive(Parser, Debug)]
#[command(name = "recibo", about = "Turn a spoken retail receipt into structured amounts")]
struct Cli {
    /// Path to the vosk model directory
    #[arg(long)]
    model: Option<String>,

    /// Keywords to extract, comma-separated (overrides config)
    #[arg(long, value_delimiter = ',')]
    keywords: Option<Vec<String>>,

    /// Audio input device index
    #[arg(long)]
    device: Option<usize>,

    /// List audio input devices and exit
    #[arg(long)]
    list_devices: bool,
}

const EXIT_SESSION: u8 = 1;
const EXIT_CONFIG: u8 = 2;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            if is_configuration_failure(&err) {
                ExitCode::from(EXIT_CONFIG)
            } else {
                ExitCode::from(EXIT_SESSION)
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.list_devices {
        for device in
            AudioCapture::list_devices().context("Failed to enumerate audio devices")?
        {
            let default_marker = if device.is_default { " [DEFAULT]" } else { "" };
            println!(
                "{:3}: {}{} ({} ch, {} Hz)",
                device.index,
                device.name,
                default_marker,
                device.max_input_channels,
                device.default_sample_rate
            );
        }
        return Ok(());
    }

    let mut config = SessionConfig::load().context("Failed to load configuration")?;
    if let Some(model) = cli.model {
        config.model_path = model;
    }
    if let Some(keywords) = cli.keywords {
        config.keywords = keywords;
    }
    if let Some(device) = cli.device {
        config.device_index = Some(device);
    }

    if !Path::new(&config.model_path).is_dir() {
        return Err(SessionError::configuration(format!(
            "model not found at {} (download a vosk Spanish model and set model_path)",
            config.model_path
        ))
        .into());
    }

    let vocabulary = Vocabulary::build(&config.grammar_words()).map_err(SessionError::from)?;
    let recognizer = VoskRecognizer::new(&config.model_path, config.sample_rate, &vocabulary)
        .map_err(SessionError::from)?;

    let audio_config = AudioConfig {
        sample_rate: config.sample_rate,
        frame_size: config.frame_size,
        device_index: config.device_index,
        ..Default::default()
    };
    let mut capture = AudioCapture::new(audio_config).map_err(SessionError::from)?;
    let cancel = capture.cancel_flag();
    capture.start().map_err(SessionError::from)?;

    let normalizer = TokenNormalizer::new(DigitMap::with_comma_output(config.comma_output));
    let stop = Arc::new(AtomicBool::new(false));
    let controller = SessionController::new(capture, recognizer, normalizer, Arc::clone(&stop));

    // Ctrl+C is a normal stop, not an error: both flags make the blocked
    // frame read and the session loop wind down into Draining.
    for flag in [stop, cancel] {
        signal_hook::flag::register(SIGINT, Arc::clone(&flag))
            .context("Failed to register SIGINT handler")?;
        signal_hook::flag::register(SIGTERM, flag)
            .context("Failed to register SIGTERM handler")?;
    }

    info!("Listening... speak the receipt, press Ctrl+C to finish");
    let keywords = config.keywords.clone();
    let outcome = controller.run(&NextNumberExtractor, &keywords)?;

    if outcome.values.is_empty() {
        info!("No amounts extracted; transcript: {}", outcome.tokens.join(" "));
    }
    for (keyword, value) in &outcome.values {
        println!("{keyword}: {value}");
    }

    if let Some(err) = outcome.error {
        return Err(anyhow::Error::from(err).context("Session ended with an error"));
    }
    Ok(())
}

fn is_configuration_failure(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<SessionError>()
            .is_some_and(SessionError::is_configuration)
    })
}
