//! Parley is a conversational assistant that reads its replies aloud.
//!
//! A query goes to an OpenAI-compatible chat endpoint, the reply is split
//! into sentences, and each sentence is synthesized and played in order.
//! The session worker in [`session`] ties the pieces together; the egui
//! front end in [`ui`] observes it through events.

pub mod audio;
pub mod llm;
pub mod messages;
pub mod session;
pub mod text;
pub mod tts;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ParleyError {
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    #[error("Model load error: {0}")]
    ModelLoadError(String),

    #[error("LLM request error: {0}")]
    LlmError(String),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Unknown voice: {0}")]
    UnknownVoice(String),

    #[error("TTS error: {0}")]
    TtsError(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Audio processing error: {0}")]
    AudioProcessingError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl From<std::io::Error> for ParleyError {
    fn from(e: std::io::Error) -> Self {
        ParleyError::IoError(e.to_string())
    }
}

impl ParleyError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Hardware/device errors may require user intervention
            ParleyError::AudioDeviceError(_) => false,
            // Model errors require restarting
            ParleyError::ModelLoadError(_) => false,
            // A failed request or a bad selection leaves the session usable
            ParleyError::LlmError(_) => true,
            ParleyError::UnknownModel(_) => true,
            ParleyError::UnknownVoice(_) => true,
            ParleyError::TtsError(_) => true,
            ParleyError::IoError(_) => false,
            ParleyError::AudioProcessingError(_) => true,
            ParleyError::ConfigError(_) => false,
            ParleyError::ChannelError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            ParleyError::AudioDeviceError(_) => {
                "Audio device error. Please check your speakers.".to_string()
            }
            ParleyError::ModelLoadError(_) => {
                "Failed to load a model. Please verify model files are present.".to_string()
            }
            ParleyError::LlmError(_) => {
                "The language model did not answer. Please try again.".to_string()
            }
            ParleyError::UnknownModel(_) => {
                "That model is not available. Pick one from the list.".to_string()
            }
            ParleyError::UnknownVoice(_) => {
                "That voice is not available. Pick one from the list.".to_string()
            }
            ParleyError::TtsError(_) => {
                "Text-to-speech failed. The reply will be shown as text.".to_string()
            }
            ParleyError::IoError(_) => "File system error occurred.".to_string(),
            ParleyError::AudioProcessingError(_) => {
                "Audio processing failed. Please try again.".to_string()
            }
            ParleyError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            ParleyError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ParleyError>;
