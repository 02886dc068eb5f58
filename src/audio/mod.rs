//! Sound: generated cue notes, PCM synthesis and output backends.

pub mod cues;
pub mod output;
pub mod synth;

pub use cues::{AudioCueSynthesizer, Cue, CueEvent, Note};
#[cfg(feature = "audio")]
pub use output::RodioAudio;
pub use output::{AudioOutput, NullAudio, RecordingAudio, SoundEffect};
