//! Cues: what the overlay does when a rule fires.
//!
//! The notifier only reports which rule crossed; the cue list attached to
//! each rule in the configuration decides how that is presented.

use serde::{Deserialize, Serialize};

use super::catalog::Clip;

/// Volume of generated tones
const BEEP_GAIN: f32 = 0.1;

/// Reaction configured for a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cue {
    /// Synthesized tone pattern
    Beep { pattern: BeepPattern },
    /// One specific clip, skipped if the catalog does not have it
    Clip { file: String },
    /// Next clip from the non-repeating rotation
    RandomClip,
    /// A random start-of-game clip
    StartClip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeepPattern {
    /// Single 800 Hz beep
    FiftyPercent,
    /// Two short 1 kHz beeps
    SeventyPercent,
}

/// One sine tone of a beep pattern
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration_ms: u64,
    /// Start time relative to the first tone
    pub offset_ms: u64,
    pub gain: f32,
}

impl BeepPattern {
    pub fn tones(self) -> Vec<Tone> {
        let tone = |frequency_hz, duration_ms, offset_ms| Tone {
            frequency_hz,
            duration_ms,
            offset_ms,
            gain: BEEP_GAIN,
        };

        match self {
            BeepPattern::FiftyPercent => vec![tone(800, 500, 0)],
            BeepPattern::SeventyPercent => vec![tone(1000, 200, 0), tone(1000, 200, 250)],
        }
    }

    /// Time from the first tone starting to the last one ending
    pub fn total_ms(self) -> u64 {
        self.tones()
            .iter()
            .map(|t| t.offset_ms + t.duration_ms)
            .max()
            .unwrap_or(0)
    }
}

/// A cue resolved against the catalog, ready for presentation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CueEvent {
    Beep {
        rule: String,
        pattern: BeepPattern,
        tones: Vec<Tone>,
    },
    Clip {
        /// `None` for ambient clips not tied to a rule
        rule: Option<String>,
        clip: Clip,
    },
}

impl CueEvent {
    pub fn rule(&self) -> Option<&str> {
        match self {
            CueEvent::Beep { rule, .. } => Some(rule),
            CueEvent::Clip { rule, .. } => rule.as_deref(),
        }
    }
}
