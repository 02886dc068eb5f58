//! PCM rendering of cue notes.
//!
//! Each note is two detuned triangle oscillators through a gain stage that
//! holds at `NOTE_GAIN`, jumps to the note's fade volume 50 ms before the
//! end and ramps linearly to silence.

use super::cues::Note;
use std::f64::consts::FRAC_PI_2;

pub const SAMPLE_RATE: u32 = 44_100;
pub const CHANNELS: u16 = 2;

const NOTE_GAIN: f64 = 0.1;
const FADE_TIME: f64 = 0.05;
const FADE_FLOOR: f64 = 0.000_01;

fn triangle(phase: f64) -> f64 {
    let p = phase.fract();
    4.0 * (p - 0.5).abs() - 1.0
}

fn gain_at(note: &Note, t: f64) -> f64 {
    let fade_start = note.duration - FADE_TIME;
    if t < fade_start {
        return NOTE_GAIN;
    }
    let progress = ((t - fade_start) / FADE_TIME).clamp(0.0, 1.0);
    let from = note.fade_volume();
    from + (FADE_FLOOR - from) * progress
}

/// Equal-power stereo gains for a pan position.
pub fn pan_gains(pan: f64) -> (f64, f64) {
    let x = (pan.clamp(-1.0, 1.0) + 1.0) / 2.0;
    ((x * FRAC_PI_2).cos(), (x * FRAC_PI_2).sin())
}

/// Render one note as interleaved stereo samples, without its start offset.
pub fn render_note(note: &Note) -> Vec<f32> {
    let rate = f64::from(SAMPLE_RATE);
    let frames = (note.duration * rate).round().max(0.0) as usize;
    let (left, right) = pan_gains(note.pan);
    let mut samples = Vec::with_capacity(frames * 2);
    for i in 0..frames {
        let t = i as f64 / rate;
        let wave = triangle((note.frequency + 1.0) * t) + triangle((note.frequency - 2.0) * t);
        let value = wave * gain_at(note, t);
        samples.push((value * left) as f32);
        samples.push((value * right) as f32);
    }
    samples
}

/// Mix notes into one interleaved stereo buffer, honouring start offsets.
pub fn mix_notes(notes: &[Note]) -> Vec<f32> {
    let rate = f64::from(SAMPLE_RATE);
    let total = notes
        .iter()
        .map(|n| (n.end() * rate).round() as usize)
        .max()
        .unwrap_or(0);
    let mut mix = vec![0.0f32; total * 2];
    for note in notes {
        let offset = (note.start_offset * rate).round() as usize * 2;
        for (i, sample) in render_note(note).into_iter().enumerate() {
            if let Some(slot) = mix.get_mut(offset + i) {
                *slot += sample;
            }
        }
    }
    mix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::cues::Cue;

    #[test]
    fn test_triangle_range() {
        for i in 0..100 {
            let v = triangle(i as f64 / 37.0);
            assert!((-1.0..=1.0).contains(&v));
        }
        assert!((triangle(0.5) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_centre_pan_is_balanced() {
        let (l, r) = pan_gains(0.0);
        assert!((l - r).abs() < 1e-12);
        let (l, r) = pan_gains(-1.0);
        assert!((l - 1.0).abs() < 1e-12 && r.abs() < 1e-12);
    }

    #[test]
    fn test_render_length_and_fade() {
        let note = Cue::Background.notes()[1];
        let samples = render_note(&note);
        let frames = (0.232 * f64::from(SAMPLE_RATE)).round() as usize;
        assert_eq!(samples.len(), frames * 2);
        let tail = &samples[samples.len() - 2..];
        assert!(tail.iter().all(|s| s.abs() < 0.01));
    }

    #[test]
    fn test_mix_spans_offsets() {
        let notes = Cue::Jump.notes();
        let mix = mix_notes(&notes);
        let frames = ((0.116 + 0.232) * f64::from(SAMPLE_RATE)).round() as usize;
        assert_eq!(mix.len(), frames * 2);
        // Jump cue sits left of centre.
        let left: f32 = mix.iter().step_by(2).map(|s| s.abs()).sum();
        let right: f32 = mix.iter().skip(1).step_by(2).map(|s| s.abs()).sum();
        assert!(left > right);
    }

    #[test]
    fn test_mix_empty() {
        assert!(mix_notes(&[]).is_empty());
    }
}
