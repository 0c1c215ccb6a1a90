//! Session worker: drives a full conversational turn from user query to
//! per-sentence narration audio
//!
//! The worker owns the chat backend and the synthesizer and runs on its own
//! thread. The UI talks to it through a [`SessionHandle`]: commands go in over
//! a bounded channel, events come back the same way, and interruption is a
//! shared flag the handle can clear while a turn is in flight.

use crate::llm::{ChatBackend, History, ModelCatalog};
use crate::messages::{ChatMessage, MessageLog, Role};
use crate::session::events::{SessionCommand, SessionEvent};
use crate::text::split_into_sentences;
use crate::tts::{AudioChunk, Synthesizer, Voice, VoiceRegistry};
use crate::{ParleyError, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Configuration for a new session
pub struct SessionOptions {
    /// Known chat models, used to resolve partial names
    pub catalog: ModelCatalog,

    /// Known narration voices
    pub voices: VoiceRegistry,

    /// Requested model, may be a partial name
    pub model: String,

    /// Requested voice, may be a partial name
    pub voice: String,

    /// System prompt seeding the conversation
    pub system_prompt: String,

    /// Token budget for conversation history
    pub context_size: usize,
}

/// Handle for controlling the session from the UI
pub struct SessionHandle {
    command_tx: Sender<SessionCommand>,
    event_rx: Receiver<SessionEvent>,

    /// True while a reply is being narrated
    active: Arc<AtomicBool>,

    /// Sentences of the reply currently being narrated
    sentences: Arc<Mutex<Vec<String>>>,

    /// Conversation visible to the UI
    message_log: MessageLog,
}

impl SessionHandle {
    /// Send a command to the session worker
    pub fn send(&self, cmd: SessionCommand) -> Result<()> {
        self.command_tx
            .send(cmd)
            .map_err(|e| ParleyError::ChannelError(format!("session command: {}", e)))
    }

    /// Try to receive an event from the session worker
    pub fn try_recv_event(&self) -> Option<SessionEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Stop narration of the current reply
    ///
    /// The worker checks the flag between sentences, so the sentence being
    /// synthesized when this is called may still be delivered.
    pub fn interrupt(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Whether a reply is currently being narrated
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Snapshot of the sentences in the reply being narrated
    pub fn sentences(&self) -> Vec<String> {
        self.sentences.lock().clone()
    }

    /// The conversation log shared with the worker
    pub fn message_log(&self) -> MessageLog {
        self.message_log.clone()
    }
}

/// Session worker state
pub struct Session {
    backend: Box<dyn ChatBackend>,
    synthesizer: Box<dyn Synthesizer>,

    command_rx: Receiver<SessionCommand>,
    event_tx: Sender<SessionEvent>,

    catalog: ModelCatalog,
    voices: VoiceRegistry,

    model: String,
    voice: Voice,
    history: History,

    active: Arc<AtomicBool>,
    sentences: Arc<Mutex<Vec<String>>>,
    message_log: MessageLog,
}

impl Session {
    /// Create a session and its handle
    ///
    /// Model and voice names are resolved against the catalog and registry
    /// here, so an unknown name fails construction rather than the first turn.
    pub fn new(
        backend: Box<dyn ChatBackend>,
        synthesizer: Box<dyn Synthesizer>,
        options: SessionOptions,
    ) -> Result<(Self, SessionHandle)> {
        let model = options.catalog.resolve(&options.model)?;
        let voice = options.voices.resolve(&options.voice)?;
        info!(model = %model, voice = %voice.name, "session configured");

        let (command_tx, command_rx) = bounded(100);
        let (event_tx, event_rx) = bounded(256);

        let active = Arc::new(AtomicBool::new(false));
        let sentences = Arc::new(Mutex::new(Vec::new()));
        let message_log = MessageLog::new();

        let handle = SessionHandle {
            command_tx,
            event_rx,
            active: Arc::clone(&active),
            sentences: Arc::clone(&sentences),
            message_log: message_log.clone(),
        };

        let session = Self {
            backend,
            synthesizer,
            command_rx,
            event_tx,
            catalog: options.catalog,
            voices: options.voices,
            model,
            voice,
            history: History::new(options.system_prompt, options.context_size),
            active,
            sentences,
            message_log,
        };

        Ok((session, handle))
    }

    /// Start the worker thread, consuming the session
    pub fn start(mut self) -> JoinHandle<()> {
        thread::spawn(move || {
            info!("session worker started");
            loop {
                match self.command_rx.recv() {
                    Ok(SessionCommand::SubmitQuery {
                        text,
                        temperature,
                        speed,
                    }) => self.run_turn(&text, temperature, speed),
                    Ok(SessionCommand::ClearSession) => self.clear_session(),
                    Ok(SessionCommand::ChangeModel(name)) => self.change_model(&name),
                    Ok(SessionCommand::ChangeVoice(name)) => self.change_voice(&name),
                    Ok(SessionCommand::UpdateSystemPrompt(prompt)) => {
                        self.update_system_prompt(prompt)
                    }
                    Ok(SessionCommand::Shutdown) => {
                        info!("session worker shutdown requested");
                        let _ = self.event_tx.send(SessionEvent::Shutdown);
                        break;
                    }
                    Err(_) => {
                        warn!("session command channel disconnected");
                        break;
                    }
                }
            }
            info!("session worker stopped");
        })
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.event_tx.send(event);
    }

    fn status(&self, msg: impl Into<String>) {
        self.emit(SessionEvent::Status(msg.into()));
    }

    /// One full turn: query the model, split the reply, narrate sentence by
    /// sentence while honoring the interrupt flag
    fn run_turn(&mut self, text: &str, temperature: f32, speed: f32) {
        let query = text.trim();
        if query.is_empty() {
            debug!("ignoring empty query");
            return;
        }

        self.sentences.lock().clear();

        self.message_log.push(ChatMessage::user(query));
        self.history.add_user(query);

        self.status(format!("Processing query with {}...", self.model));
        self.emit(SessionEvent::Cursor {
            start: 0,
            end: 0,
            active: false,
        });

        let reply = match self.backend.complete(
            &self.model,
            &self.history.request_messages(),
            temperature,
        ) {
            Ok(reply) => reply,
            Err(e) => {
                self.fail_turn(&e);
                return;
            }
        };

        self.message_log.push(ChatMessage::assistant(reply.clone()));
        self.history.add_assistant(&reply);

        self.status("Processing response for narration...");
        let sentences = split_into_sentences(&reply);
        if sentences.is_empty() {
            debug!("reply has no speakable sentences");
            self.status("No speakable sentences in response.");
            self.emit(SessionEvent::TurnFinished {
                next_index: 0,
                interrupted: false,
            });
            return;
        }

        let count = sentences.len();
        *self.sentences.lock() = sentences.clone();
        self.active.store(true, Ordering::SeqCst);
        self.emit(SessionEvent::Cursor {
            start: 0,
            end: count,
            active: true,
        });
        self.status(format!("Narrating {} sentences...", count));

        let turn_id = Uuid::new_v4();
        let mut next_index = 0;
        let mut interrupted = false;

        for (i, sentence) in sentences.iter().enumerate() {
            if !self.active.load(Ordering::SeqCst) {
                info!(spoken = i, total = count, "narration interrupted");
                interrupted = true;
                break;
            }
            self.emit(SessionEvent::Cursor {
                start: i,
                end: count,
                active: true,
            });

            match self.synthesizer.synthesize(sentence, &self.voice, speed) {
                Ok((samples, sample_rate)) => {
                    next_index = i + 1;
                    let chunk = AudioChunk {
                        samples,
                        sample_rate,
                        sentence_index: i,
                        turn_id,
                    };
                    debug!(sentence = i, duration_ms = chunk.duration_ms(), "synthesized");
                    self.emit(SessionEvent::SentenceAudio { next_index, chunk });
                }
                Err(e) => {
                    warn!(sentence = i, error = %e, "synthesis failed, skipping sentence");
                    self.emit(SessionEvent::Error(e.user_message()));
                    next_index = i + 1;
                }
            }
        }

        self.active.store(false, Ordering::SeqCst);
        self.emit(SessionEvent::TurnFinished {
            next_index,
            interrupted,
        });
        if !interrupted {
            self.status("Ready");
        }
    }

    /// Record a failed turn: error status, and a single synthetic assistant
    /// message so the conversation shows what happened
    fn fail_turn(&mut self, err: &ParleyError) {
        warn!(error = %err, recoverable = err.is_recoverable(), "turn failed");
        if self.message_log.last_role() != Some(Role::Assistant) {
            self.message_log
                .push(ChatMessage::assistant(format!("Error: {}", err.user_message())));
        }
        self.status(format!("Error: {}", err.user_message()));
        self.emit(SessionEvent::Error(err.user_message()));
        self.active.store(false, Ordering::SeqCst);
        self.emit(SessionEvent::TurnFinished {
            next_index: 0,
            interrupted: false,
        });
    }

    fn clear_session(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        self.sentences.lock().clear();
        self.message_log.clear();
        self.history.clear();
        info!("session cleared");
        self.emit(SessionEvent::Cursor {
            start: 0,
            end: 0,
            active: false,
        });
        self.emit(SessionEvent::SessionCleared);
        self.status(format!(
            "Session cleared. Ready. (model {}, voice {})",
            self.model, self.voice.name
        ));
    }

    fn change_model(&mut self, name: &str) {
        match self.catalog.resolve(name) {
            Ok(model) => {
                info!(model = %model, "model changed");
                self.model = model.clone();
                self.emit(SessionEvent::ModelChanged(model.clone()));
                self.status(format!("Model set to {}", model));
            }
            Err(e) => {
                warn!(requested = name, error = %e, "model change rejected");
                self.emit(SessionEvent::Error(e.user_message()));
            }
        }
    }

    fn change_voice(&mut self, name: &str) {
        match self.voices.resolve(name) {
            Ok(voice) => {
                info!(voice = %voice.name, "voice changed");
                self.emit(SessionEvent::VoiceChanged(voice.name.clone()));
                self.status(format!("Voice set to {}", voice.name));
                self.voice = voice;
            }
            Err(e) => {
                warn!(requested = name, error = %e, "voice change rejected");
                self.emit(SessionEvent::Error(e.user_message()));
            }
        }
    }

    /// Install a new system prompt and restart the conversation with it
    fn update_system_prompt(&mut self, prompt: String) {
        self.active.store(false, Ordering::SeqCst);
        self.sentences.lock().clear();
        self.message_log.clear();
        self.history.reset_with_prompt(prompt.trim().to_string());
        info!("system prompt updated, conversation restarted");
        self.emit(SessionEvent::Cursor {
            start: 0,
            end: 0,
            active: false,
        });
        self.emit(SessionEvent::SessionCleared);
        self.status("System prompt updated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tts::DEFAULT_VOICE;

    struct EchoBackend;

    impl ChatBackend for EchoBackend {
        fn complete(
            &self,
            _model: &str,
            messages: &[ChatMessage],
            _temperature: f32,
        ) -> Result<String> {
            Ok(messages.last().map(|m| m.content.clone()).unwrap_or_default())
        }
    }

    struct SilentSynth;

    impl Synthesizer for SilentSynth {
        fn synthesize(&mut self, _text: &str, _voice: &Voice, _speed: f32) -> Result<(Vec<f32>, u32)> {
            Ok((vec![0.0; 220], 22050))
        }
    }

    fn options() -> SessionOptions {
        SessionOptions {
            catalog: ModelCatalog::default(),
            voices: VoiceRegistry::default(),
            model: "dans".to_string(),
            voice: DEFAULT_VOICE.to_string(),
            system_prompt: "You are a helpful assistant.".to_string(),
            context_size: 4096,
        }
    }

    #[test]
    fn test_session_creation_resolves_partial_names() {
        let (session, handle) =
            Session::new(Box::new(EchoBackend), Box::new(SilentSynth), options()).unwrap();
        assert_eq!(session.model, "dans-personalityengine");
        assert_eq!(session.voice.name, "maya");
        assert!(!handle.is_active());
    }

    #[test]
    fn test_session_creation_rejects_unknown_model() {
        let mut opts = options();
        opts.model = "no-such-model".to_string();
        let result = Session::new(Box::new(EchoBackend), Box::new(SilentSynth), opts);
        assert!(matches!(result, Err(ParleyError::UnknownModel(_))));
    }

    #[test]
    fn test_session_creation_rejects_unknown_voice() {
        let mut opts = options();
        opts.voice = "nobody".to_string();
        let result = Session::new(Box::new(EchoBackend), Box::new(SilentSynth), opts);
        assert!(matches!(result, Err(ParleyError::UnknownVoice(_))));
    }

    #[test]
    fn test_interrupt_clears_active_flag() {
        let (_session, handle) =
            Session::new(Box::new(EchoBackend), Box::new(SilentSynth), options()).unwrap();
        handle.active.store(true, Ordering::SeqCst);
        handle.interrupt();
        assert!(!handle.is_active());
    }
}
