//! Named voices for the multi-speaker VITS model

use crate::{ParleyError, Result};

/// Voice used when none is requested.
pub const DEFAULT_VOICE: &str = "maya";

/// A selectable narration voice, backed by a VITS speaker id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    pub speaker_id: i32,
}

impl Voice {
    pub fn new(name: impl Into<String>, speaker_id: i32) -> Self {
        Self {
            name: name.into(),
            speaker_id,
        }
    }
}

/// Registry mapping voice names to speaker ids.
#[derive(Clone, Debug)]
pub struct VoiceRegistry {
    voices: Vec<Voice>,
}

impl Default for VoiceRegistry {
    fn default() -> Self {
        Self {
            voices: vec![
                Voice::new("maya", 0),
                Voice::new("miles", 1),
                Voice::new("aria", 2),
                Voice::new("orion", 3),
                Voice::new("luna", 4),
            ],
        }
    }
}

impl VoiceRegistry {
    pub fn new(voices: Vec<Voice>) -> Self {
        Self { voices }
    }

    /// Voice names in selector order.
    pub fn names(&self) -> Vec<String> {
        self.voices.iter().map(|v| v.name.clone()).collect()
    }

    /// Look up a voice by name, case-insensitive.
    pub fn resolve(&self, name: &str) -> Result<Voice> {
        let lowered = name.trim().to_lowercase();
        self.voices
            .iter()
            .find(|v| v.name.to_lowercase() == lowered)
            .cloned()
            .ok_or_else(|| {
                ParleyError::UnknownVoice(format!(
                    "'{name}' (available: {})",
                    self.names().join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_case_insensitive() {
        let registry = VoiceRegistry::default();
        assert_eq!(registry.resolve("Maya").unwrap().speaker_id, 0);
        assert_eq!(registry.resolve("  MILES  ").unwrap().speaker_id, 1);
    }

    #[test]
    fn test_unknown_voice_lists_available() {
        let registry = VoiceRegistry::default();
        let err = registry.resolve("nobody").unwrap_err();
        assert!(matches!(err, ParleyError::UnknownVoice(_)));
        assert!(err.to_string().contains("maya"));
    }

    #[test]
    fn test_default_voice_resolves() {
        let registry = VoiceRegistry::default();
        assert!(registry.resolve(DEFAULT_VOICE).is_ok());
    }
}
