//! Parley - spoken chat assistant
//!
//! Main entry point: wires the chat backend, the synthesizer, the session
//! worker, and the audio output together, then hands control to the UI.

use clap::Parser;
use eframe::egui;
use parley::llm::{HttpChatClient, LlmConfig, ModelCatalog};
use parley::llm::prompts::DEFAULT_SYSTEM_PROMPT;
use parley::session::{Session, SessionOptions};
use parley::tts::{TtsConfig, VitsSynthesizer, VoiceRegistry, DEFAULT_VOICE};
use parley::ui::{ParleyApp, UiState};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "parley", about = "Chat assistant that reads its replies aloud")]
struct Args {
    /// Chat model to use (partial names are accepted)
    #[arg(short, long, default_value = "dans")]
    model: String,

    /// Narration voice
    #[arg(short, long, default_value = DEFAULT_VOICE)]
    voice: String,

    /// OpenAI-compatible chat completions endpoint
    #[arg(long, default_value = "http://localhost:8080")]
    endpoint: String,

    /// Path to the VITS model file
    #[arg(long, default_value = "models/vits-parley.onnx")]
    tts_model: String,

    /// Path to the VITS tokens file
    #[arg(long, default_value = "models/tokens.txt")]
    tts_tokens: String,

    /// Optional lexicon file for the VITS model
    #[arg(long)]
    tts_lexicon: Option<String>,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "parley=trace,debug"
    } else {
        "parley=debug,info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Parley");

    let catalog = ModelCatalog::default();
    let voices = VoiceRegistry::default();

    // Resolve up front so a typo fails at startup, not on the first turn
    let model = match catalog.resolve(&args.model) {
        Ok(model) => model,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    let voice = match voices.resolve(&args.voice) {
        Ok(voice) => voice,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let llm_config = LlmConfig::default().with_endpoint(args.endpoint);
    let backend = match HttpChatClient::new(llm_config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create chat client: {}", e);
            std::process::exit(1);
        }
    };

    let mut tts_config = TtsConfig::new(args.tts_model, args.tts_tokens);
    if let Some(lexicon) = args.tts_lexicon {
        tts_config = tts_config.with_lexicon(lexicon);
    }
    let synthesizer = match VitsSynthesizer::new(tts_config) {
        Ok(synth) => synth,
        Err(e) => {
            error!("Failed to load TTS model: {}", e);
            std::process::exit(1);
        }
    };

    let options = SessionOptions {
        catalog: catalog.clone(),
        voices: voices.clone(),
        model: model.clone(),
        voice: voice.name.clone(),
        system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        context_size: 4096,
    };
    let (session, handle) =
        match Session::new(Box::new(backend), Box::new(synthesizer), options) {
            Ok(pair) => pair,
            Err(e) => {
                error!("Failed to create session: {}", e);
                std::process::exit(1);
            }
        };
    let _worker = session.start();

    let (playback_tx, output_sample_rate) = start_audio_output();

    let state = UiState::new(
        handle,
        catalog.names().to_vec(),
        voices.names(),
        model,
        voice.name,
        DEFAULT_SYSTEM_PROMPT.to_string(),
        playback_tx,
        output_sample_rate,
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 680.0])
            .with_min_inner_size([520.0, 360.0])
            .with_title("Parley"),
        ..Default::default()
    };

    eframe::run_native(
        "Parley",
        native_options,
        Box::new(|cc| Ok(Box::new(ParleyApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {e}"))
}

/// Open the playback device if one is available. Narration still runs
/// without a device; the audio is just discarded.
#[cfg(feature = "audio-io")]
fn start_audio_output() -> (Option<crossbeam_channel::Sender<Vec<f32>>>, u32) {
    use parley::audio::AudioOutput;
    use parley::tts::VITS_SAMPLE_RATE;
    use tracing::warn;

    match AudioOutput::new() {
        Ok(mut output) => {
            let (tx, rx) = crossbeam_channel::bounded::<Vec<f32>>(64);
            let rate = output.sample_rate();
            match output.start_playback(rx) {
                Ok(()) => {
                    info!(sample_rate = rate, "audio output started");
                    // The stream must outlive the UI loop
                    Box::leak(Box::new(output));
                    (Some(tx), rate)
                }
                Err(e) => {
                    warn!("Audio playback unavailable: {}", e);
                    (None, rate)
                }
            }
        }
        Err(e) => {
            warn!("No audio output device: {}", e);
            (None, VITS_SAMPLE_RATE)
        }
    }
}

#[cfg(not(feature = "audio-io"))]
fn start_audio_output() -> (Option<crossbeam_channel::Sender<Vec<f32>>>, u32) {
    use parley::tts::VITS_SAMPLE_RATE;

    info!("Built without audio output; narration audio will be discarded");
    (None, VITS_SAMPLE_RATE)
}
