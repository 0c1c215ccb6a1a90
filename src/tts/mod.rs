pub mod engine;
pub mod queue;
pub mod voice;

pub use engine::{AudioChunk, Synthesizer, TtsConfig, VitsSynthesizer, VITS_SAMPLE_RATE};
pub use queue::AudioQueue;
pub use voice::{Voice, VoiceRegistry, DEFAULT_VOICE};
