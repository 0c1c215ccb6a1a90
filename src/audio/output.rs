//! Narration playback through the default output device

use crate::{ParleyError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct AudioOutput {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    is_playing: Arc<Mutex<bool>>,
}

impl AudioOutput {
    /// Create a new audio output with the default output device
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();

        let device = host.default_output_device().ok_or_else(|| {
            ParleyError::AudioDeviceError("No output device available".into())
        })?;

        info!(
            "Using output device: {}",
            device.name().unwrap_or_else(|_| "Unknown".to_string())
        );

        let config = device
            .default_output_config()
            .map_err(|e| {
                ParleyError::AudioDeviceError(format!("Failed to get output config: {e}"))
            })?
            .into();

        Ok(Self {
            device,
            config,
            stream: None,
            is_playing: Arc::new(Mutex::new(false)),
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    pub fn channels(&self) -> u16 {
        self.config.channels
    }

    /// Start playing mono audio received from the channel, duplicated
    /// across the device's channels. Silence when the buffer runs dry.
    pub fn start_playback(&mut self, audio_rx: Receiver<Vec<f32>>) -> Result<()> {
        if *self.is_playing.lock() {
            warn!("Already playing");
            return Ok(());
        }

        let channels = self.config.channels as usize;
        let is_playing = Arc::clone(&self.is_playing);
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let buffer_clone = Arc::clone(&buffer);

        // Feeder thread drains the channel into the shared buffer
        std::thread::spawn(move || {
            while let Ok(samples) = audio_rx.recv() {
                buffer_clone.lock().extend_from_slice(&samples);
            }
        });

        let err_fn = |err| {
            error!("Audio output stream error: {}", err);
        };

        let stream = self
            .device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if !*is_playing.lock() {
                        data.fill(0.0);
                        return;
                    }

                    let mut buf = buffer.lock();
                    let frames_needed = data.len() / channels;
                    let frames_available = buf.len().min(frames_needed);

                    for i in 0..frames_available {
                        let sample = buf[i];
                        for c in 0..channels {
                            data[i * channels + c] = sample;
                        }
                    }
                    buf.drain(0..frames_available);

                    data[frames_available * channels..].fill(0.0);
                },
                err_fn,
                None,
            )
            .map_err(|e| {
                ParleyError::AudioDeviceError(format!("Failed to build output stream: {e}"))
            })?;

        stream.play().map_err(|e| {
            ParleyError::AudioDeviceError(format!("Failed to start output stream: {e}"))
        })?;

        *self.is_playing.lock() = true;
        self.stream = Some(stream);

        info!("Started narration playback");
        Ok(())
    }

    pub fn stop_playback(&mut self) -> Result<()> {
        *self.is_playing.lock() = false;

        if let Some(stream) = self.stream.take() {
            drop(stream);
            info!("Stopped narration playback");
        }

        Ok(())
    }

    pub fn is_playing(&self) -> bool {
        *self.is_playing.lock()
    }
}

impl Drop for AudioOutput {
    fn drop(&mut self) {
        let _ = self.stop_playback();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn test_output_creation() {
        // May fail in CI environments without audio devices
        if let Ok(output) = AudioOutput::new() {
            assert!(output.sample_rate() > 0);
            assert!(output.channels() > 0);
        }
    }

    #[test]
    fn test_playback_state() {
        if let Ok(mut output) = AudioOutput::new() {
            assert!(!output.is_playing());

            let (_tx, rx) = bounded(10);
            if output.start_playback(rx).is_ok() {
                assert!(output.is_playing());

                let _ = output.stop_playback();
                assert!(!output.is_playing());
            }
        }
    }
}
