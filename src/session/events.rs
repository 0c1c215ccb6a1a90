//! Commands and events for the session worker

use crate::tts::AudioChunk;

/// Commands that can be sent to the session worker
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Submit a user query for a full turn (LLM reply plus narration)
    SubmitQuery {
        text: String,
        temperature: f32,
        speed: f32,
    },

    /// Clear the conversation and reset narration state
    ClearSession,

    /// Switch the active chat model (accepts partial names)
    ChangeModel(String),

    /// Switch the narration voice (accepts partial names)
    ChangeVoice(String),

    /// Replace the system prompt and restart the conversation
    UpdateSystemPrompt(String),

    /// Shut down the session worker
    Shutdown,
}

/// Events emitted by the session worker
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Status line update for the UI
    Status(String),

    /// Sentence cursor update: `start..end` of the pending range,
    /// plus whether narration is active
    Cursor {
        start: usize,
        end: usize,
        active: bool,
    },

    /// Synthesized audio for one sentence; `next_index` is the cursor
    /// start after this sentence has been spoken
    SentenceAudio {
        next_index: usize,
        chunk: AudioChunk,
    },

    /// The turn is over, whether it ran to completion or was cut short
    TurnFinished {
        next_index: usize,
        interrupted: bool,
    },

    /// Model switch took effect
    ModelChanged(String),

    /// Voice switch took effect
    VoiceChanged(String),

    /// Conversation history and narration state were reset
    SessionCleared,

    /// An error occurred; the message is user-presentable
    Error(String),

    /// The worker has shut down
    Shutdown,
}
