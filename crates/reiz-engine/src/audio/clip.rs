use std::f32::consts::TAU;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use super::AudioError;

/// Decoded audio: interleaved samples in `[-1, 1]`.
///
/// Cloning is cheap; the sample buffer is shared.
#[derive(Debug, Clone)]
pub struct AudioClip {
    path: Option<PathBuf>,
    sample_rate: u32,
    channels: u16,
    samples: Arc<[f32]>,
}

impl AudioClip {
    /// Decodes a WAV file. Integer PCM is scaled to `[-1, 1)`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AudioError> {
        let path = path.as_ref();
        let decode_err = |source| AudioError::Decode {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = hound::WavReader::open(path).map_err(decode_err)?;
        let spec = reader.spec();

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>(),
            hound::SampleFormat::Int => {
                let scale = 1.0 / (1u64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 * scale))
                    .collect::<Result<_, _>>()
            }
        }
        .map_err(decode_err)?;

        log::debug!(
            "decoded {}: {} Hz, {} ch, {} frames",
            path.display(),
            spec.sample_rate,
            spec.channels,
            samples.len() / usize::from(spec.channels.max(1))
        );

        Ok(Self {
            path: Some(path.to_path_buf()),
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            samples: samples.into(),
        })
    }

    /// Wraps already decoded interleaved samples.
    pub fn from_samples(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Self {
        Self {
            path: None,
            sample_rate,
            channels: channels.max(1),
            samples: samples.into(),
        }
    }

    /// Mono sine tone.
    pub fn tone(frequency: f32, duration: Duration, sample_rate: u32) -> Self {
        let frames = (duration.as_secs_f64() * f64::from(sample_rate)).round() as usize;
        let samples = (0..frames)
            .map(|i| (TAU * frequency * i as f32 / sample_rate as f32).sin())
            .collect();
        Self::from_samples(samples, 1, sample_rate)
    }

    /// File the clip was decoded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub(crate) fn shared_samples(&self) -> Arc<[f32]> {
        Arc::clone(&self.samples)
    }

    /// Number of sample frames (one sample per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels.max(1))
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / f64::from(self.sample_rate))
    }
}
