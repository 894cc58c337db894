//! Audio cue selection
//!
//! Turns the one-tick event flags raised by the simulation into concrete
//! cues: which sample variant to play, at what pitch and volume. Playback
//! itself belongs to the host.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::Settings;
use crate::sim::TickEvents;

/// Sample variants per cue
const VARIANTS: u8 = 3;
const CUT_PITCH_MIN: f32 = 0.5;
const CUT_PITCH_SPREAD: f32 = 0.5;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Wing beat
    Flap,
    /// Knife whoosh
    KnifeCut,
}

impl SoundEffect {
    fn sample_stem(self) -> &'static str {
        match self {
            SoundEffect::Flap => "flap",
            SoundEffect::KnifeCut => "woosh",
        }
    }
}

/// A cue ready for the host to play
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub effect: SoundEffect,
    /// 1-based sample variant
    pub variant: u8,
    pub pitch: f32,
    pub volume: f32,
}

impl Cue {
    /// Asset path of the chosen sample
    pub fn path(&self) -> String {
        format!("audio/{}{}.wav", self.effect.sample_stem(), self.variant)
    }
}

/// Picks cue variants with a seeded RNG so replays sound the same
#[derive(Debug, Clone)]
pub struct CuePicker {
    rng: Pcg32,
    volume: f32,
}

impl CuePicker {
    pub fn new(settings: &Settings) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            volume: settings.effective_volume(),
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Cues for this tick's events; empty when muted
    pub fn cues_for(&mut self, events: &TickEvents) -> Vec<Cue> {
        let mut cues = Vec::new();
        if self.volume <= 0.0 {
            return cues;
        }
        if events.flap_cue {
            let variant = self.variant();
            cues.push(Cue {
                effect: SoundEffect::Flap,
                variant,
                pitch: 1.0,
                volume: self.volume,
            });
        }
        if events.cut_cue {
            let variant = self.variant();
            let pitch = CUT_PITCH_MIN + self.rng.random::<f32>() * CUT_PITCH_SPREAD;
            cues.push(Cue {
                effect: SoundEffect::KnifeCut,
                variant,
                pitch,
                volume: self.volume,
            });
        }
        cues
    }

    fn variant(&mut self) -> u8 {
        self.rng.random_range(1..=VARIANTS)
    }
}
