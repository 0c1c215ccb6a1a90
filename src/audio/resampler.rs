//! Sample-rate conversion between the synthesizer and the output device

use crate::{ParleyError, Result};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use tracing::debug;

/// Streaming audio resampler.
pub struct AudioResampler {
    resampler: SincFixedIn<f32>,
    channels: usize,
    chunk_size: usize,
}

impl AudioResampler {
    pub fn new(input_rate: u32, output_rate: u32, channels: u16) -> Result<Self> {
        if input_rate == 0 || output_rate == 0 {
            return Err(ParleyError::ConfigError(
                "Sample rates must be greater than 0".into(),
            ));
        }
        if channels == 0 {
            return Err(ParleyError::ConfigError(
                "Number of channels must be greater than 0".into(),
            ));
        }

        let ratio = output_rate as f64 / input_rate as f64;

        let params = SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        };

        let chunk_size = 1024;

        let resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, chunk_size, channels as usize)
            .map_err(|e| {
                ParleyError::AudioProcessingError(format!("Failed to create resampler: {e}"))
            })?;

        debug!(
            "Created resampler: {} Hz -> {} Hz, {} channels",
            input_rate, output_rate, channels
        );

        Ok(Self {
            resampler,
            channels: channels as usize,
            chunk_size,
        })
    }

    /// Resample interleaved audio. The tail is zero-padded to a full chunk.
    pub fn resample(&mut self, input: &[f32]) -> Result<Vec<f32>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        // De-interleave into per-channel buffers
        let frames = input.len() / self.channels;
        let mut planar: Vec<Vec<f32>> = vec![Vec::with_capacity(frames); self.channels];
        for frame in input.chunks(self.channels) {
            for (ch, &sample) in frame.iter().enumerate() {
                planar[ch].push(sample);
            }
        }

        let mut output_planar: Vec<Vec<f32>> = vec![Vec::new(); self.channels];

        let mut offset = 0;
        while offset < frames {
            let remaining = frames - offset;
            let take = remaining.min(self.chunk_size);

            let mut chunk: Vec<Vec<f32>> = Vec::with_capacity(self.channels);
            for ch in &planar {
                let mut buf = ch[offset..offset + take].to_vec();
                buf.resize(self.chunk_size, 0.0);
                chunk.push(buf);
            }

            let processed = self.resampler.process(&chunk, None).map_err(|e| {
                ParleyError::AudioProcessingError(format!("Resampling failed: {e}"))
            })?;

            for (ch, data) in processed.into_iter().enumerate() {
                output_planar[ch].extend(data);
            }

            offset += take;
        }

        // Re-interleave
        let out_frames = output_planar[0].len();
        let mut output = Vec::with_capacity(out_frames * self.channels);
        for i in 0..out_frames {
            for ch in &output_planar {
                output.push(ch[i]);
            }
        }

        Ok(output)
    }
}

/// One-shot resample of a complete buffer.
pub fn resample_audio(
    input: &[f32],
    input_rate: u32,
    output_rate: u32,
    channels: u16,
) -> Result<Vec<f32>> {
    if input_rate == output_rate {
        return Ok(input.to_vec());
    }
    let mut resampler = AudioResampler::new(input_rate, output_rate, channels)?;
    resampler.resample(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rates_rejected() {
        assert!(AudioResampler::new(0, 48000, 1).is_err());
        assert!(AudioResampler::new(16000, 0, 1).is_err());
        assert!(AudioResampler::new(16000, 48000, 0).is_err());
    }

    #[test]
    fn test_upsample_produces_more_samples() {
        let input: Vec<f32> = (0..3200).map(|i| (i as f32 * 0.01).sin()).collect();
        let output = resample_audio(&input, 16000, 48000, 1).unwrap();
        assert!(output.len() > input.len());
    }

    #[test]
    fn test_same_rate_passthrough() {
        let input = vec![0.25f32; 512];
        let output = resample_audio(&input, 22050, 22050, 1).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_empty_input() {
        let mut resampler = AudioResampler::new(16000, 48000, 1).unwrap();
        assert!(resampler.resample(&[]).unwrap().is_empty());
    }
}
