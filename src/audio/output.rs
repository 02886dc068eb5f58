//! Audio sinks.
//!
//! The session only queues cue events and sound effects; a host forwards
//! them to one of these outputs once per frame.

use super::cues::Note;

/// Fixed sound effects of the game itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    ButtonPress,
    Hit,
    Score,
}

impl SoundEffect {
    /// Synthesized stand-in for the effect sample.
    pub fn notes(&self) -> Vec<Note> {
        let tone = |frequency, start_offset, duration| Note {
            frequency,
            start_offset,
            duration,
            volume: Some(0.08),
            pan: 0.0,
        };
        match self {
            Self::ButtonPress => vec![tone(587.33, 0.0, 0.06)],
            Self::Hit => vec![tone(146.83, 0.0, 0.12), tone(110.0, 0.08, 0.2)],
            Self::Score => vec![tone(987.77, 0.0, 0.08), tone(1318.51, 0.08, 0.16)],
        }
    }
}

pub trait AudioOutput {
    fn play_notes(&mut self, notes: &[Note]);
    fn play_effect(&mut self, effect: SoundEffect);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioOutput for NullAudio {
    fn play_notes(&mut self, _notes: &[Note]) {}
    fn play_effect(&mut self, _effect: SoundEffect) {}
}

/// Keeps every request, for tests and the simulator.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub notes: Vec<Note>,
    pub effects: Vec<SoundEffect>,
}

impl AudioOutput for RecordingAudio {
    fn play_notes(&mut self, notes: &[Note]) {
        self.notes.extend_from_slice(notes);
    }

    fn play_effect(&mut self, effect: SoundEffect) {
        self.effects.push(effect);
    }
}

#[cfg(feature = "audio")]
pub use self::rodio_output::RodioAudio;

#[cfg(feature = "audio")]
mod rodio_output {
    use super::{AudioOutput, Note, SoundEffect};
    use crate::audio::synth::{mix_notes, CHANNELS, SAMPLE_RATE};
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamHandle};

    /// Plays synthesized PCM on the default output device.
    pub struct RodioAudio {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl RodioAudio {
        pub fn try_default() -> Result<Self, rodio::StreamError> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(Self {
                _stream: stream,
                handle,
            })
        }

        fn play_samples(&self, samples: Vec<f32>) {
            if samples.is_empty() {
                return;
            }
            let buffer = SamplesBuffer::new(CHANNELS, SAMPLE_RATE, samples);
            if let Err(e) = self.handle.play_raw(buffer) {
                tracing::warn!(error = %e, "audio playback failed");
            }
        }
    }

    impl AudioOutput for RodioAudio {
        fn play_notes(&mut self, notes: &[Note]) {
            self.play_samples(mix_notes(notes));
        }

        fn play_effect(&mut self, effect: SoundEffect) {
            self.play_samples(mix_notes(&effect.notes()));
        }
    }
}
