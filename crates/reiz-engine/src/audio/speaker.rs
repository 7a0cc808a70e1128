use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};

use super::{AudioClip, AudioError};

/// Writes interleaved output frames from `src`, starting at frame `*pos`.
///
/// Channels are mapped as follows: equal counts copy through, mono source
/// feeds every output channel, mono output averages all source channels,
/// otherwise extra output channels repeat the last source channel. Rate
/// conversion is nearest-sample: `*pos` advances by `step` source frames per
/// output frame. Output past the end of `src` is silence.
///
/// Returns `true` once the whole source has been consumed, or right away
/// when `step` is not a positive rate.
pub fn fill_buffer(
    out: &mut [f32],
    out_channels: usize,
    src: &[f32],
    src_channels: usize,
    step: f64,
    pos: &mut f64,
) -> bool {
    let out_channels = out_channels.max(1);
    let src_channels = src_channels.max(1);
    let src_frames = src.len() / src_channels;

    // A clip without a sample rate would never advance.
    if !step.is_finite() || step <= 0.0 {
        out.fill(0.0);
        return true;
    }

    for frame in out.chunks_mut(out_channels) {
        let index = *pos as usize;
        if index >= src_frames {
            frame.fill(0.0);
            continue;
        }

        let source = &src[index * src_channels..(index + 1) * src_channels];
        if out_channels == 1 && src_channels > 1 {
            frame[0] = source.iter().sum::<f32>() / src_channels as f32;
        } else {
            for (c, sample) in frame.iter_mut().enumerate() {
                *sample = source[c.min(src_channels - 1)];
            }
        }
        *pos += step;
    }

    *pos as usize >= src_frames
}

/// Plays clips on the default output device, one at a time.
pub struct Speaker {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,
    stream: Option<cpal::Stream>,
    finished: Arc<AtomicBool>,
}

impl Speaker {
    pub fn new() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoOutputDevice)?;
        let config = device
            .default_output_config()
            .map_err(|e| AudioError::Output(e.to_string()))?;

        log::info!(
            "audio output: {} ({} Hz, {} ch, {:?})",
            device.name().unwrap_or_else(|_| "unknown".to_string()),
            config.sample_rate().0,
            config.channels(),
            config.sample_format()
        );

        Ok(Self {
            device,
            config,
            stream: None,
            finished: Arc::new(AtomicBool::new(true)),
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate().0
    }

    pub fn channels(&self) -> u16 {
        self.config.channels()
    }

    /// Starts `clip`, replacing whatever was playing.
    pub fn play(&mut self, clip: &AudioClip) -> Result<(), AudioError> {
        self.stop();

        self.finished = Arc::new(AtomicBool::new(false));
        let stream = match self.config.sample_format() {
            cpal::SampleFormat::F32 => self.build_stream::<f32>(clip),
            cpal::SampleFormat::I16 => self.build_stream::<i16>(clip),
            cpal::SampleFormat::U16 => self.build_stream::<u16>(clip),
            other => Err(AudioError::UnsupportedFormat(format!("{other:?}"))),
        }?;
        stream
            .play()
            .map_err(|e| AudioError::Output(e.to_string()))?;

        log::debug!("playing clip ({:.2} s)", clip.duration().as_secs_f64());
        self.stream = Some(stream);
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.stream.take().is_some() {
            self.finished.store(true, Ordering::Release);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.stream.is_some() && !self.finished.load(Ordering::Acquire)
    }

    fn build_stream<T>(&self, clip: &AudioClip) -> Result<cpal::Stream, AudioError>
    where
        T: SizedSample + FromSample<f32>,
    {
        let config: cpal::StreamConfig = self.config.config();
        let out_channels = usize::from(config.channels);
        let src_channels = usize::from(clip.channels());
        let step = f64::from(clip.sample_rate()) / f64::from(config.sample_rate.0);

        let samples = clip.shared_samples();
        let finished = Arc::clone(&self.finished);
        let mut scratch: Vec<f32> = Vec::new();
        let mut pos = 0.0f64;

        self.device
            .build_output_stream(
                &config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    scratch.resize(data.len(), 0.0);
                    if fill_buffer(&mut scratch, out_channels, &samples, src_channels, step, &mut pos) {
                        finished.store(true, Ordering::Release);
                    }
                    for (dst, src) in data.iter_mut().zip(&scratch) {
                        *dst = T::from_sample(*src);
                    }
                },
                |err| log::error!("audio stream error: {err}"),
                None,
            )
            .map_err(|e| AudioError::Output(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stereo_passes_through_and_finishes() {
        let src = [0.1, 0.2, 0.3, 0.4];
        let mut out = [9.0; 6];
        let mut pos = 0.0;

        let done = fill_buffer(&mut out, 2, &src, 2, 1.0, &mut pos);
        assert!(done);
        assert_eq!(out, [0.1, 0.2, 0.3, 0.4, 0.0, 0.0]);
    }

    #[test]
    fn mono_source_feeds_all_channels() {
        let src = [0.5, -0.5];
        let mut out = [0.0; 4];
        let mut pos = 0.0;

        fill_buffer(&mut out, 2, &src, 1, 1.0, &mut pos);
        assert_eq!(out, [0.5, 0.5, -0.5, -0.5]);
    }

    #[test]
    fn stereo_source_downmixes_to_mono() {
        let src = [1.0, 0.0, 0.5, 0.5];
        let mut out = [0.0; 2];
        let mut pos = 0.0;

        fill_buffer(&mut out, 1, &src, 2, 1.0, &mut pos);
        assert_eq!(out, [0.5, 0.5]);
    }

    #[test]
    fn resamples_by_nearest_frame_across_calls() {
        // Source at half the output rate: every frame is repeated.
        let src = [1.0, 2.0, 3.0];
        let mut pos = 0.0;

        let mut first = [0.0; 4];
        assert!(!fill_buffer(&mut first, 1, &src, 1, 0.5, &mut pos));
        assert_eq!(first, [1.0, 1.0, 2.0, 2.0]);

        let mut second = [0.0; 4];
        assert!(fill_buffer(&mut second, 1, &src, 1, 0.5, &mut pos));
        assert_eq!(second, [3.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn zero_rate_clip_finishes_immediately() {
        let clip = AudioClip::from_samples(vec![0.5; 8], 1, 0);
        let step = f64::from(clip.sample_rate()) / 48_000.0;
        let mut out = [1.0; 4];
        let mut pos = 0.0;
        assert!(fill_buffer(&mut out, 2, clip.samples(), 1, step, &mut pos));
        assert_eq!(out, [0.0; 4]);
        assert_eq!(pos, 0.0);
    }

    #[test]
    fn empty_source_is_silent_and_finished() {
        let mut out = [1.0; 4];
        let mut pos = 0.0;
        assert!(fill_buffer(&mut out, 2, &[], 2, 1.0, &mut pos));
        assert!(out.iter().all(|s| *s == 0.0));
    }
}
