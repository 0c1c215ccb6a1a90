//! Application state for the Parley UI
//!
//! `UiState` mirrors what the session worker reports: the conversation log,
//! the status line, and the sentence cursor over the reply being narrated.
//! It is also where synthesized audio gets handed to the playback channel.

use crate::audio::resample_audio;
use crate::session::{SessionCommand, SessionEvent, SessionHandle};
use crate::tts::AudioQueue;
use crossbeam_channel::Sender;
use tracing::{debug, warn};

/// Central application state
pub struct UiState {
    /// Handle to the session worker
    pub session: SessionHandle,

    /// Current text input
    pub input_text: String,

    /// Status line shown in the control panel
    pub status: String,

    /// Sentence cursor over the reply being narrated: `start..end` is the
    /// range not yet spoken
    pub cursor: (usize, usize),

    /// Whether narration is in progress
    pub narrating: bool,

    /// Sentences of the reply being narrated
    pub sentences: Vec<String>,

    /// Sampling temperature for the next query
    pub temperature: f32,

    /// Narration speed factor
    pub speed: f32,

    /// Active model and the selectable alternatives
    pub model: String,
    pub models: Vec<String>,

    /// Active voice and the selectable alternatives
    pub voice: String,
    pub voices: Vec<String>,

    /// System prompt editor contents
    pub system_prompt: String,

    /// Last error message, shown until the next successful turn
    pub last_error: Option<String>,

    /// Narration audio waiting to be played, in sentence order
    pub audio_queue: AudioQueue,

    /// Playback channel, absent when no output device is available
    playback_tx: Option<Sender<Vec<f32>>>,

    /// Sample rate the playback device expects
    output_sample_rate: u32,
}

impl UiState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        session: SessionHandle,
        models: Vec<String>,
        voices: Vec<String>,
        model: String,
        voice: String,
        system_prompt: String,
        playback_tx: Option<Sender<Vec<f32>>>,
        output_sample_rate: u32,
    ) -> Self {
        Self {
            session,
            input_text: String::new(),
            status: "Ready".to_string(),
            cursor: (0, 0),
            narrating: false,
            sentences: Vec::new(),
            temperature: 0.9,
            speed: 1.0,
            model,
            models,
            voice,
            voices,
            system_prompt,
            last_error: None,
            audio_queue: AudioQueue::new(),
            playback_tx,
            output_sample_rate,
        }
    }

    /// Submit the current input as a query
    ///
    /// A new query interrupts any narration still in flight, matching what a
    /// user expects when they ask the next question mid-reply.
    pub fn submit_query(&mut self) {
        let text = self.input_text.trim().to_string();
        if text.is_empty() {
            return;
        }

        if self.narrating {
            self.interrupt();
        }
        self.last_error = None;

        let _ = self.session.send(SessionCommand::SubmitQuery {
            text,
            temperature: self.temperature,
            speed: self.speed,
        });
        self.input_text.clear();
    }

    /// Stop narration of the current reply
    pub fn interrupt(&mut self) {
        self.session.interrupt();
        self.audio_queue.clear();
        self.narrating = false;
        self.status = "Narration interrupted".to_string();
    }

    /// Clear the conversation
    pub fn clear_session(&mut self) {
        if self.narrating {
            self.interrupt();
        }
        let _ = self.session.send(SessionCommand::ClearSession);
    }

    pub fn change_model(&mut self, name: &str) {
        let _ = self
            .session
            .send(SessionCommand::ChangeModel(name.to_string()));
    }

    pub fn change_voice(&mut self, name: &str) {
        let _ = self
            .session
            .send(SessionCommand::ChangeVoice(name.to_string()));
    }

    /// Apply the edited system prompt, restarting the conversation
    pub fn apply_system_prompt(&mut self) {
        if self.narrating {
            self.interrupt();
        }
        let _ = self.session.send(SessionCommand::UpdateSystemPrompt(
            self.system_prompt.clone(),
        ));
    }

    /// Drain worker events and forward ready audio to playback
    pub fn poll_events(&mut self) {
        while let Some(event) = self.session.try_recv_event() {
            match event {
                SessionEvent::Status(status) => {
                    self.status = status;
                }
                SessionEvent::Cursor { start, end, active } => {
                    self.cursor = (start, end);
                    self.narrating = active;
                    if active {
                        self.sentences = self.session.sentences();
                    }
                }
                SessionEvent::SentenceAudio { next_index, chunk } => {
                    self.cursor.0 = next_index;
                    // A sentence that was mid-synthesis when an interrupt
                    // landed still arrives; it must not be played
                    if self.narrating {
                        self.audio_queue.enqueue(chunk);
                    }
                }
                SessionEvent::TurnFinished {
                    next_index,
                    interrupted,
                } => {
                    self.cursor.0 = next_index;
                    self.narrating = false;
                    if interrupted {
                        self.audio_queue.clear();
                        debug!(spoken = next_index, "turn ended early");
                    }
                }
                SessionEvent::ModelChanged(model) => {
                    self.model = model;
                }
                SessionEvent::VoiceChanged(voice) => {
                    self.voice = voice;
                }
                SessionEvent::SessionCleared => {
                    self.sentences.clear();
                    self.cursor = (0, 0);
                    self.last_error = None;
                }
                SessionEvent::Error(error) => {
                    self.last_error = Some(error);
                }
                SessionEvent::Shutdown => {
                    debug!("session worker shut down");
                }
            }
        }

        self.pump_audio();
    }

    /// Send queued chunks to the playback device, resampling to its rate.
    fn pump_audio(&mut self) {
        let Some(tx) = &self.playback_tx else {
            self.audio_queue.clear();
            return;
        };

        while let Some(chunk) = self.audio_queue.dequeue() {
            match resample_audio(&chunk.samples, chunk.sample_rate, self.output_sample_rate, 1) {
                Ok(samples) => {
                    let _ = tx.send(samples);
                }
                Err(e) => {
                    warn!(sentence = chunk.sentence_index, error = %e, "resample failed, dropping chunk");
                }
            }
        }
    }

    /// Progress of the current narration as spoken/total sentence counts.
    pub fn narration_progress(&self) -> (usize, usize) {
        (self.cursor.0, self.cursor.1)
    }
}
