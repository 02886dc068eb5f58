//! Generated audio cues for audio-cue mode.
//!
//! The synthesizer never produces sound itself. It queues notes that the
//! host drains once per frame and hands to an [`super::AudioOutput`].
//! Nothing here feeds back into physics, scoring or collision.

/// Footstep loop interval in ms.
pub const FOOTSTEP_INTERVAL: f64 = 280.0;
/// Volume used by notes without an explicit one.
pub const DEFAULT_NOTE_VOLUME: f64 = 0.01;

/// One synthesized tone. Times are in seconds relative to cue start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub frequency: f64,
    pub start_offset: f64,
    pub duration: f64,
    /// Level the note fades out from.
    pub volume: Option<f64>,
    /// Stereo position, -1 (left) to 1 (right).
    pub pan: f64,
}

impl Note {
    const fn new(frequency: f64, start_offset: f64, duration: f64) -> Self {
        Self {
            frequency,
            start_offset,
            duration,
            volume: None,
            pan: 0.0,
        }
    }

    const fn with_volume(self, volume: f64) -> Self {
        Self {
            volume: Some(volume),
            ..self
        }
    }

    const fn with_pan(self, pan: f64) -> Self {
        Self { pan, ..self }
    }

    pub fn fade_volume(&self) -> f64 {
        self.volume.unwrap_or(DEFAULT_NOTE_VOLUME)
    }

    pub fn end(&self) -> f64 {
        self.start_offset + self.duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Background,
    Footsteps,
    CancelFootsteps,
    Collect,
    Jump,
}

impl Cue {
    pub fn notes(&self) -> [Note; 2] {
        match self {
            Self::Background => [Note::new(493.883, 0.0, 0.116), Note::new(659.255, 0.116, 0.232)],
            Self::Footsteps => [
                Note::new(73.42, 0.0, 0.05).with_volume(0.16),
                Note::new(69.30, 0.116, 0.116).with_volume(0.16),
            ],
            Self::CancelFootsteps => [
                Note::new(103.83, 0.0, 0.232).with_volume(0.02),
                Note::new(116.54, 0.116, 0.232).with_volume(0.02),
            ],
            Self::Collect => [Note::new(830.61, 0.0, 0.116), Note::new(1318.51, 0.116, 0.232)],
            Self::Jump => [
                Note::new(659.25, 0.0, 0.116).with_volume(0.3).with_pan(-0.6),
                Note::new(880.0, 0.116, 0.232).with_volume(0.3).with_pan(-0.6),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CueEvent {
    pub cue: Cue,
    pub notes: [Note; 2],
}

#[derive(Debug, Clone, Default)]
pub struct AudioCueSynthesizer {
    enabled: bool,
    footsteps_active: bool,
    footstep_timer: f64,
    pending: Vec<CueEvent>,
}

impl AudioCueSynthesizer {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.stop_all();
        }
        self.enabled = enabled;
    }

    pub fn footsteps_active(&self) -> bool {
        self.footsteps_active
    }

    fn emit(&mut self, cue: Cue) {
        if self.enabled {
            self.pending.push(CueEvent {
                cue,
                notes: cue.notes(),
            });
        }
    }

    /// Run start jingle, then the footstep loop.
    pub fn background(&mut self) {
        if !self.enabled {
            return;
        }
        self.emit(Cue::Background);
        if !self.footsteps_active {
            self.footsteps_active = true;
            self.footstep_timer = 0.0;
        }
    }

    pub fn cancel_footsteps(&mut self) {
        if self.enabled && self.footsteps_active {
            self.footsteps_active = false;
            self.footstep_timer = 0.0;
            self.emit(Cue::CancelFootsteps);
        }
    }

    pub fn stop_all(&mut self) {
        self.cancel_footsteps();
    }

    pub fn collect(&mut self) {
        if self.enabled {
            self.cancel_footsteps();
            self.emit(Cue::Collect);
        }
    }

    pub fn jump(&mut self) {
        self.emit(Cue::Jump);
    }

    /// Advance the footstep loop by `dt` ms.
    pub fn tick(&mut self, dt: f64) {
        if !self.enabled || !self.footsteps_active {
            return;
        }
        self.footstep_timer += dt;
        while self.footstep_timer >= FOOTSTEP_INTERVAL {
            self.footstep_timer -= FOOTSTEP_INTERVAL;
            self.emit(Cue::Footsteps);
        }
    }

    pub fn take_pending(&mut self) -> Vec<CueEvent> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cues(synth: &mut AudioCueSynthesizer) -> Vec<Cue> {
        synth.take_pending().into_iter().map(|e| e.cue).collect()
    }

    #[test]
    fn test_disabled_is_silent() {
        let mut synth = AudioCueSynthesizer::new(false);
        synth.background();
        synth.jump();
        synth.collect();
        synth.tick(1000.0);
        assert!(synth.take_pending().is_empty());
        assert!(!synth.footsteps_active());
    }

    #[test]
    fn test_background_starts_footsteps() {
        let mut synth = AudioCueSynthesizer::new(true);
        synth.background();
        assert_eq!(cues(&mut synth), vec![Cue::Background]);
        synth.tick(279.0);
        assert!(synth.take_pending().is_empty());
        synth.tick(1.0);
        synth.tick(560.0);
        assert_eq!(cues(&mut synth), vec![Cue::Footsteps; 3]);
    }

    #[test]
    fn test_cancel_only_when_looping() {
        let mut synth = AudioCueSynthesizer::new(true);
        synth.cancel_footsteps();
        assert!(synth.take_pending().is_empty());
        synth.background();
        synth.stop_all();
        assert_eq!(
            cues(&mut synth),
            vec![Cue::Background, Cue::CancelFootsteps]
        );
        synth.tick(1000.0);
        assert!(synth.take_pending().is_empty());
    }

    #[test]
    fn test_collect_cancels_footsteps_first() {
        let mut synth = AudioCueSynthesizer::new(true);
        synth.background();
        synth.take_pending();
        synth.collect();
        assert_eq!(cues(&mut synth), vec![Cue::CancelFootsteps, Cue::Collect]);
    }

    #[test]
    fn test_jump_notes_panned_left() {
        let notes = Cue::Jump.notes();
        assert!(notes.iter().all(|n| (n.pan + 0.6).abs() < f64::EPSILON));
        assert!((notes[1].frequency - 880.0).abs() < f64::EPSILON);
        assert!((notes[0].fade_volume() - 0.3).abs() < f64::EPSILON);
        assert!((Cue::Collect.notes()[0].fade_volume() - DEFAULT_NOTE_VOLUME).abs() < f64::EPSILON);
    }
}
