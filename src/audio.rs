//! Sound cues for the audio collaborator
//!
//! The simulation only names what should be heard. Synthesis belongs to an
//! [`AudioSink`] supplied by the host; [`AudioManager`] applies the volume
//! settings and forwards cues fire-and-forget.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Puck struck by a mallet
    MalletHit,
    /// Puck bounced off a wall
    WallHit,
    /// Puck went into a goal
    Goal,
}

/// Oscillator shape for a tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// How a cue is meant to sound, for sinks that synthesize tones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    pub waveform: Waveform,
    /// Frequency steps in Hz, evenly spread over the duration
    pub frequencies: Vec<f32>,
    /// Frequency at the end of a glide, if the pitch sweeps
    pub glide_to: Option<f32>,
    /// Peak gain before volume scaling
    pub gain: f32,
    pub duration_secs: f32,
}

impl SoundEffect {
    pub fn tone(&self) -> ToneSpec {
        match self {
            // High pitched short beep
            SoundEffect::MalletHit => ToneSpec {
                waveform: Waveform::Square,
                frequencies: vec![600.0],
                glide_to: Some(200.0),
                gain: 0.3,
                duration_secs: 0.1,
            },
            // Lower, duller bump
            SoundEffect::WallHit => ToneSpec {
                waveform: Waveform::Triangle,
                frequencies: vec![300.0],
                glide_to: None,
                gain: 0.2,
                duration_secs: 0.1,
            },
            // Rising arpeggio
            SoundEffect::Goal => ToneSpec {
                waveform: Waveform::Sine,
                frequencies: vec![400.0, 600.0, 800.0],
                glide_to: None,
                gain: 0.5,
                duration_secs: 0.4,
            },
        }
    }
}

/// Something that can make noise
pub trait AudioSink {
    /// Start playing `effect` at `volume` (0.0 - 1.0); must not block
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink that only writes cues to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: u64,
}

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played += 1;
        log::trace!("sfx {:?} at {:.2}", effect, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play the cue of every event that has one
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(GameEvent::sound) {
            self.play(effect);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Side;

    #[derive(Default)]
    struct Recorder(Vec<(SoundEffect, f32)>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.push((effect, volume));
        }
    }

    #[test]
    fn test_events_map_to_cues() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.play_events(&[
            GameEvent::WallHit,
            GameEvent::FaceOff,
            GameEvent::MalletHit { side: Side::Opponent },
        ]);
        let played: Vec<_> = audio.sink().0.iter().map(|(e, _)| *e).collect();
        assert_eq!(played, vec![SoundEffect::WallHit, SoundEffect::MalletHit]);
    }

    #[test]
    fn test_volume_and_mute() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(2.0);
        audio.play(SoundEffect::Goal);
        assert_eq!(audio.sink().0, vec![(SoundEffect::Goal, 0.5)]);

        audio.set_muted(true);
        audio.play(SoundEffect::Goal);
        assert_eq!(audio.sink().0.len(), 1);
    }

    #[test]
    fn test_goal_tone_is_arpeggio() {
        let tone = SoundEffect::Goal.tone();
        assert_eq!(tone.waveform, Waveform::Sine);
        assert_eq!(tone.frequencies.len(), 3);
    }
}
