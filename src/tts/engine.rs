//! Text-to-speech synthesis with sherpa-rs (VITS models)

use crate::audio::resampler::resample_audio;
use crate::text::normalize_for_speech;
use crate::tts::voice::Voice;
use crate::{ParleyError, Result};
use sherpa_rs::tts::{VitsTts, VitsTtsConfig};
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

/// Typical native rate for VITS/Piper voices.
pub const VITS_SAMPLE_RATE: u32 = 22050;

/// Configuration for the TTS engine
#[derive(Clone, Debug)]
pub struct TtsConfig {
    /// Path to the ONNX model file
    pub model_path: String,

    /// Path to the tokens file
    pub tokens_path: String,

    /// Path to the lexicon file (optional for some models)
    pub lexicon_path: Option<String>,

    /// Path to the data directory (optional)
    pub data_dir: Option<String>,

    /// Noise scale for variation
    pub noise_scale: f32,

    /// Noise scale width
    pub noise_scale_w: f32,

    /// Output sample rate (resampled if the model's native rate differs)
    pub output_sample_rate: u32,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            model_path: String::new(),
            tokens_path: String::new(),
            lexicon_path: None,
            data_dir: None,
            noise_scale: 0.667,
            noise_scale_w: 0.8,
            output_sample_rate: VITS_SAMPLE_RATE,
        }
    }
}

impl TtsConfig {
    pub fn new(model_path: impl Into<String>, tokens_path: impl Into<String>) -> Self {
        Self {
            model_path: model_path.into(),
            tokens_path: tokens_path.into(),
            ..Default::default()
        }
    }

    pub fn with_lexicon(mut self, lexicon_path: impl Into<String>) -> Self {
        self.lexicon_path = Some(lexicon_path.into());
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<String>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.output_sample_rate = sample_rate;
        self
    }
}

/// One synthesized sentence of narration.
#[derive(Clone, Debug)]
pub struct AudioChunk {
    /// Audio samples (f32, mono)
    pub samples: Vec<f32>,

    /// Sample rate of the audio
    pub sample_rate: u32,

    /// Index of the sentence this chunk narrates
    pub sentence_index: usize,

    /// Turn this chunk belongs to
    pub turn_id: Uuid,
}

impl AudioChunk {
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    pub fn duration_ms(&self) -> u64 {
        (self.samples.len() as u64 * 1000) / self.sample_rate as u64
    }
}

/// Anything that can speak a sentence.
///
/// The session worker depends on this seam rather than on sherpa directly;
/// tests drive the orchestration with stub synthesizers.
pub trait Synthesizer: Send {
    /// Synthesize one sentence. Returns mono samples and their rate.
    fn synthesize(&mut self, text: &str, voice: &Voice, speed: f32) -> Result<(Vec<f32>, u32)>;
}

/// VITS synthesizer wrapping sherpa-rs
pub struct VitsSynthesizer {
    tts: VitsTts,
    config: TtsConfig,
}

impl VitsSynthesizer {
    pub fn new(config: TtsConfig) -> Result<Self> {
        if config.model_path.is_empty() {
            return Err(ParleyError::ConfigError("TTS model path is required".into()));
        }
        if config.tokens_path.is_empty() {
            return Err(ParleyError::ConfigError(
                "TTS tokens path is required".into(),
            ));
        }

        if !Path::new(&config.model_path).exists() {
            return Err(ParleyError::ModelLoadError(format!(
                "TTS model not found: {}",
                config.model_path
            )));
        }
        if !Path::new(&config.tokens_path).exists() {
            return Err(ParleyError::ModelLoadError(format!(
                "TTS tokens file not found: {}",
                config.tokens_path
            )));
        }

        info!("Loading VITS TTS model from: {}", config.model_path);

        let vits_config = VitsTtsConfig {
            model: config.model_path.clone(),
            tokens: config.tokens_path.clone(),
            lexicon: config.lexicon_path.clone().unwrap_or_default(),
            data_dir: config.data_dir.clone().unwrap_or_default(),
            noise_scale: config.noise_scale,
            noise_scale_w: config.noise_scale_w,
            length_scale: 1.0,
            ..Default::default()
        };

        let tts = VitsTts::new(vits_config);

        info!("TTS engine initialized");

        Ok(Self { tts, config })
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.output_sample_rate
    }
}

impl Synthesizer for VitsSynthesizer {
    fn synthesize(&mut self, text: &str, voice: &Voice, speed: f32) -> Result<(Vec<f32>, u32)> {
        let normalized = normalize_for_speech(text);
        if normalized.is_empty() {
            return Ok((Vec::new(), self.config.output_sample_rate));
        }

        debug!("Synthesizing with voice {}: {}", voice.name, normalized);

        let audio = self
            .tts
            .create(&normalized, voice.speaker_id, speed.max(0.1))
            .map_err(|e| ParleyError::TtsError(format!("Synthesis failed: {e}")))?;

        let mut samples = audio.samples;
        let model_rate = audio.sample_rate as u32;

        if self.config.output_sample_rate != model_rate {
            samples = resample_audio(&samples, model_rate, self.config.output_sample_rate, 1)?;
        }

        Ok((samples, self.config.output_sample_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = TtsConfig::new("model.onnx", "tokens.txt")
            .with_lexicon("lexicon.txt")
            .with_sample_rate(48000);

        assert_eq!(config.model_path, "model.onnx");
        assert_eq!(config.lexicon_path.as_deref(), Some("lexicon.txt"));
        assert_eq!(config.output_sample_rate, 48000);
    }

    #[test]
    fn test_missing_paths_rejected() {
        assert!(VitsSynthesizer::new(TtsConfig::default()).is_err());
        assert!(VitsSynthesizer::new(TtsConfig::new("/nonexistent.onnx", "/nonexistent.txt"))
            .is_err());
    }

    #[test]
    fn test_chunk_duration() {
        let chunk = AudioChunk {
            samples: vec![0.0; 22050],
            sample_rate: 22050,
            sentence_index: 0,
            turn_id: Uuid::new_v4(),
        };

        assert!((chunk.duration_secs() - 1.0).abs() < 0.01);
        assert_eq!(chunk.duration_ms(), 1000);
    }
}
