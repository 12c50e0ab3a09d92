use std::{
    f32::consts::PI,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{AudioConfig, Result, SortVizError};

/// Slowest playback rate, used for an empty bar.
pub const MIN_RATE: f32 = 0.5;
/// Fastest playback rate, used for a bar reaching the top of the canvas.
pub const MAX_RATE: f32 = 2.5;

/// Maps a bar height onto a playback rate in `[MIN_RATE, MAX_RATE]`.
pub fn tone_rate(value: u32, max_height: u32) -> f32 {
    if max_height == 0 {
        return MIN_RATE;
    }
    let rate = value as f32 / max_height as f32 * 2.0 + MIN_RATE;
    rate.clamp(MIN_RATE, MAX_RATE)
}

/// The base tone every step is pitched from.
#[derive(Debug, Clone)]
pub struct ToneBuffer {
    sample_rate: u32,
    samples: Vec<f32>,
}

impl ToneBuffer {
    /// Synthesises a sine at `base_frequency_hz`, `tone_ms` long, scaled by
    /// `gain`.
    pub fn synthesize(config: &AudioConfig) -> Result<Self> {
        if config.sample_rate == 0 {
            return Err(SortVizError::Audio("sample rate must be positive".into()));
        }
        if !config.base_frequency_hz.is_finite() || config.base_frequency_hz <= 0.0 {
            return Err(SortVizError::Audio(format!(
                "invalid base frequency {}",
                config.base_frequency_hz
            )));
        }

        let len = (u64::from(config.sample_rate) * u64::from(config.tone_ms) / 1000) as usize;
        if len == 0 {
            return Err(SortVizError::Audio("tone duration rounds to zero samples".into()));
        }

        let step = 2.0 * PI * config.base_frequency_hz / config.sample_rate as f32;
        let samples = (0..len)
            .map(|n| (step * n as f32).sin() * config.gain)
            .collect();

        Ok(Self {
            sample_rate: config.sample_rate,
            samples,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Plays the buffer back at `rate` times its natural speed using linear
    /// interpolation. Faster rates yield shorter, higher voices.
    ///
    /// Positive rates are clamped to `[MIN_RATE, MAX_RATE]`; anything else
    /// yields silence.
    pub fn resampled(&self, rate: f32) -> Vec<f32> {
        if !rate.is_finite() || rate <= 0.0 {
            return Vec::new();
        }
        let rate = rate.clamp(MIN_RATE, MAX_RATE);

        let last = self.samples.len() - 1;
        let out_len = (self.samples.len() as f32 / rate).ceil() as usize;
        (0..out_len)
            .map(|i| {
                let position = i as f32 * rate;
                let index = (position.floor() as usize).min(last);
                let next = (index + 1).min(last);
                let frac = position - index as f32;
                self.samples[index] + (self.samples[next] - self.samples[index]) * frac.min(1.0)
            })
            .collect()
    }
}

/// A pitched copy of the base tone handed to a [`ToneSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    pub rate: f32,
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

/// Output backend for the playback session.
pub trait ToneSink {
    /// Prepares the backend. Failures here abort session start-up.
    fn open(&mut self, _sample_rate: u32) -> Result<()> {
        Ok(())
    }

    fn play(&mut self, voice: &Voice) -> Result<()>;

    fn stop(&mut self) -> Result<()>;
}

/// Sink that discards every voice.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl ToneSink for SilentSink {
    fn play(&mut self, _voice: &Voice) -> Result<()> {
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Something a [`RecordingSink`] observed.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Opened { sample_rate: u32 },
    Played { rate: f32, samples: usize },
    Stopped,
}

/// Sink that keeps a shared log of everything it is asked to do. Clones share
/// the same log, so a test can keep one handle while the session owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    log: Arc<Mutex<Vec<SinkEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Result<Vec<SinkEvent>> {
        Ok(self.lock()?.clone())
    }

    /// Rates of every voice played so far.
    pub fn rates(&self) -> Result<Vec<f32>> {
        Ok(self
            .lock()?
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Played { rate, .. } => Some(*rate),
                _ => None,
            })
            .collect())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<SinkEvent>>> {
        self.log
            .lock()
            .map_err(|_| SortVizError::msg("sink log has been poisoned"))
    }
}

impl ToneSink for RecordingSink {
    fn open(&mut self, sample_rate: u32) -> Result<()> {
        self.lock()?.push(SinkEvent::Opened { sample_rate });
        Ok(())
    }

    fn play(&mut self, voice: &Voice) -> Result<()> {
        self.lock()?.push(SinkEvent::Played {
            rate: voice.rate,
            samples: voice.samples.len(),
        });
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.lock()?.push(SinkEvent::Stopped);
        Ok(())
    }
}

/// Owns the base tone, the output sink and the voice currently sounding.
///
/// Starting a voice always stops the previous one first, so at most one tone
/// is audible at a time.
pub struct PlaybackSession {
    buffer: ToneBuffer,
    sink: Box<dyn ToneSink + Send>,
    current: Option<f32>,
    played: u64,
}

impl PlaybackSession {
    /// Builds the base tone and opens the sink. Either step failing returns
    /// the error and no session.
    pub fn start(config: &AudioConfig, mut sink: Box<dyn ToneSink + Send>) -> Result<Self> {
        let buffer = ToneBuffer::synthesize(config)?;
        sink.open(buffer.sample_rate())?;
        tracing::debug!(
            sample_rate = buffer.sample_rate(),
            samples = buffer.samples().len(),
            "playback session ready"
        );
        Ok(Self {
            buffer,
            sink,
            current: None,
            played: 0,
        })
    }

    /// Replaces the current voice with one pitched at `rate`. Failures are
    /// logged and otherwise ignored.
    pub fn play(&mut self, rate: f32) {
        self.stop();

        let voice = Voice {
            rate,
            sample_rate: self.buffer.sample_rate(),
            samples: self.buffer.resampled(rate),
        };
        match self.sink.play(&voice) {
            Ok(()) => {
                self.current = Some(rate);
                self.played += 1;
            }
            Err(err) => tracing::warn!(rate, %err, "tone playback failed"),
        }
    }

    /// Silences the current voice, if any.
    pub fn stop(&mut self) {
        if self.current.take().is_some() {
            if let Err(err) = self.sink.stop() {
                tracing::warn!(%err, "failed to stop tone");
            }
        }
    }

    /// Rate of the voice currently sounding.
    pub fn current_rate(&self) -> Option<f32> {
        self.current
    }

    pub fn voices_played(&self) -> u64 {
        self.played
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("sample_rate", &self.buffer.sample_rate())
            .field("current", &self.current)
            .field("played", &self.played)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenSink {
        fail_open: bool,
    }

    impl ToneSink for BrokenSink {
        fn open(&mut self, _sample_rate: u32) -> Result<()> {
            if self.fail_open {
                Err(SortVizError::Audio("no output device".into()))
            } else {
                Ok(())
            }
        }

        fn play(&mut self, _voice: &Voice) -> Result<()> {
            Err(SortVizError::Audio("device unplugged".into()))
        }

        fn stop(&mut self) -> Result<()> {
            Ok(())
        }
    }

    fn config() -> AudioConfig {
        AudioConfig {
            sample_rate: 1_000,
            tone_ms: 100,
            ..AudioConfig::default()
        }
    }

    #[test]
    fn rate_spans_half_to_two_and_a_half() {
        assert_eq!(tone_rate(0, 300), 0.5);
        assert_eq!(tone_rate(300, 300), 2.5);
        assert!((tone_rate(150, 300) - 1.5).abs() < f32::EPSILON);
        assert_eq!(tone_rate(900, 300), 2.5);
        assert_eq!(tone_rate(10, 0), 0.5);
    }

    #[test]
    fn synthesised_tone_respects_gain_and_length() {
        let buffer = ToneBuffer::synthesize(&config()).unwrap();
        assert_eq!(buffer.samples().len(), 100);
        assert!(buffer.samples().iter().all(|s| s.abs() <= 0.01 + f32::EPSILON));
    }

    #[test]
    fn faster_rates_shorten_the_voice() {
        let buffer = ToneBuffer::synthesize(&config()).unwrap();
        assert_eq!(buffer.resampled(1.0).len(), 100);
        assert_eq!(buffer.resampled(2.0).len(), 50);
        assert_eq!(buffer.resampled(0.5).len(), 200);
        assert!(buffer.resampled(0.0).is_empty());
        assert!(buffer.resampled(f32::NAN).is_empty());
    }

    #[test]
    fn out_of_range_rates_are_clamped() {
        let buffer = ToneBuffer::synthesize(&config()).unwrap();
        assert_eq!(buffer.resampled(1e-30).len(), 200);
        assert_eq!(buffer.resampled(1e6).len(), 40);
    }

    #[test]
    fn zero_length_tone_fails_to_start() {
        let config = AudioConfig {
            tone_ms: 0,
            ..config()
        };
        let err = PlaybackSession::start(&config, Box::new(SilentSink)).unwrap_err();
        assert!(matches!(err, SortVizError::Audio(_)));
    }

    #[test]
    fn sink_open_failure_is_reported_at_start() {
        let err = PlaybackSession::start(&config(), Box::new(BrokenSink { fail_open: true }))
            .unwrap_err();
        assert!(format!("{err}").contains("no output device"));
    }

    #[test]
    fn new_voice_replaces_the_previous_one() {
        let sink = RecordingSink::new();
        let mut session = PlaybackSession::start(&config(), Box::new(sink.clone())).unwrap();
        session.play(1.0);
        session.play(2.0);
        assert_eq!(session.current_rate(), Some(2.0));
        drop(session);

        let events = sink.events().unwrap();
        assert_eq!(events[0], SinkEvent::Opened { sample_rate: 1_000 });
        assert_eq!(events[1], SinkEvent::Played { rate: 1.0, samples: 100 });
        assert_eq!(events[2], SinkEvent::Stopped);
        assert_eq!(events[3], SinkEvent::Played { rate: 2.0, samples: 50 });
        assert_eq!(events[4], SinkEvent::Stopped);
    }

    #[test]
    fn playback_failures_are_swallowed() {
        let mut session =
            PlaybackSession::start(&config(), Box::new(BrokenSink { fail_open: false })).unwrap();
        session.play(1.5);
        assert_eq!(session.current_rate(), None);
        assert_eq!(session.voices_played(), 0);
    }
}
