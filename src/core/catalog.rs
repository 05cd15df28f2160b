//! Clip catalog: which sound clips exist and what text goes with them.
//!
//! File names follow `<speaker>_<title>.mp3`. Start clips live under
//! `start/` and have no speaker.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Regular clips with their on-screen transcript
const CLIPS: &[(&str, &str)] = &[
    ("mrbeast_70percent_population_wow_thats_a_lot.mp3", "70% population ! Wow, that's a lot..."),
    ("snoop_bro_you_are_about_to_be_smoked.mp3", "Bro, you are about to be smoked!"),
    ("freeman_in_the_end_its_not_the_number.mp3", "In the end, it's not the number of troops you have, it's how many you are willing to lose. And I'm willing to lose them all."),
    ("trump_i_didnt_just_beat_them.mp3", "I didn't just beat them. I humiliated them. Wiped them off the map like they were never even there."),
    ("trump_listen_kid_build_expand_dominate.mp3", "Listen, kid, build, expand, dominate. It's not rocket science, it's winning."),
    ("biden_one_time_i_get_a_small.mp3", "One time, I get aaaaa...  A small [...] back there in the Minesota. one many. Have you seen the price of warship recently? Anyway, shold we crack a join now?"),
    ("mrbeast_this_guy_has_more_pop_than_subs.mp3", "This guy has more population than I have subscribers!"),
    ("tate_while_youre_building_cities.mp3", "While you're building cities, I'm building empires. Try to keep up, dork."),
    ("tate_i_left_your_base_intact.mp3", "I left your base intact. Not out of mercy, out of disrespect."),
    ("tate_i_took_your_capital_so_fast.mp3", "I took your capital so fast, I didn't even notice you had one."),
    ("tyson_come_on_son_dont_save_troops.mp3", "Come on, son! Don't save troops like it's your birthday, spend 'em and break their spine!"),
    ("omni_you_dont_understand_this_map.mp3", "You don't understand… this map isn't yours to conquer."),
    ("spongebob_look_patrick_grown_man.mp3", "Haha, look Patrick, a grown man playing video-games!"),
];

/// Transcript without a playable file (kept for when the clip is added)
const EXTRA_TRANSCRIPTS: &[(&str, &str)] = &[(
    "trump_your_strategy_trash.mp3",
    "Your strategy? Trash. Mine? Pure domination. That's why you follow and I lead.",
)];

const START_CLIPS: &[(&str, &str)] = &[
    ("start/Alright, good luck out there, champ.mp3", "Alright, good luck out there, champ!"),
    ("start/Good luck looser.mp3", "Good luck, loser!"),
    ("start/Hope your cities fall with dignity.mp3", "Hope your cities fall with dignity!"),
    ("start/I want to play a game...Live or die.mp3", "I want to play a game... Live or die, make your choice."),
];

const START_PREFIX: &str = "start/";
const CLIP_EXTENSION: &str = ".mp3";

const FADE_OUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipKind {
    Regular,
    Start,
}

impl ClipKind {
    /// How long the character card stays up after the clip ends
    pub fn linger(self) -> Duration {
        match self {
            ClipKind::Regular => Duration::from_secs(5),
            ClipKind::Start => Duration::from_secs(3),
        }
    }

    /// Linger plus the fade-out transition
    pub fn hide_after(self) -> Duration {
        self.linger() + FADE_OUT
    }
}

/// Everything the overlay needs to present one clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub file: String,
    pub kind: ClipKind,
    pub speaker: Option<String>,
    pub transcript: String,
    /// Hide the character card this long after the clip ends
    pub hide_after_ms: u64,
}

/// Speaker prefix of a clip file name (`trump_x.mp3` -> `trump`)
pub fn speaker_of(file: &str) -> Option<&str> {
    file.split_once('_')
        .map(|(speaker, _)| speaker)
        .filter(|speaker| !speaker.is_empty())
}

/// Everything after the speaker prefix, or the whole name
pub fn title_of(file: &str) -> &str {
    match file.split_once('_') {
        Some((_, title)) => title,
        None => file,
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    clips: Vec<String>,
    start_clips: Vec<String>,
    transcripts: HashMap<String, String>,
}

impl Catalog {
    pub fn new(clips: Vec<String>, start_clips: Vec<String>) -> Self {
        Self {
            clips,
            start_clips,
            transcripts: HashMap::new(),
        }
    }

    /// The clip set shipped with the overlay
    pub fn builtin() -> Self {
        let transcripts = CLIPS
            .iter()
            .chain(EXTRA_TRANSCRIPTS)
            .chain(START_CLIPS)
            .map(|(file, text)| (file.to_string(), text.to_string()))
            .collect();

        Self {
            clips: CLIPS.iter().map(|(file, _)| file.to_string()).collect(),
            start_clips: START_CLIPS.iter().map(|(file, _)| file.to_string()).collect(),
            transcripts,
        }
    }

    pub fn with_transcript<F: Into<String>, T: Into<String>>(mut self, file: F, text: T) -> Self {
        self.transcripts.insert(file.into(), text.into());
        self
    }

    pub fn clips(&self) -> &[String] {
        &self.clips
    }

    pub fn start_clips(&self) -> &[String] {
        &self.start_clips
    }

    pub fn contains(&self, file: &str) -> bool {
        self.clips.iter().any(|c| c == file)
    }

    /// Transcript for a clip, falling back to a name derived from the file
    pub fn transcript_of(&self, file: &str) -> String {
        if let Some(text) = self.transcripts.get(file) {
            return text.clone();
        }

        match file.strip_prefix(START_PREFIX) {
            Some(name) => name.replace(CLIP_EXTENSION, ""),
            None => title_of(file).replace(CLIP_EXTENSION, ""),
        }
    }

    pub fn describe(&self, file: &str) -> Clip {
        let kind = if file.starts_with(START_PREFIX) {
            ClipKind::Start
        } else {
            ClipKind::Regular
        };

        let speaker = match kind {
            ClipKind::Regular => speaker_of(file).map(str::to_string),
            ClipKind::Start => None,
        };

        Clip {
            file: file.to_string(),
            kind,
            speaker,
            transcript: self.transcript_of(file),
            hide_after_ms: kind.hide_after().as_millis() as u64,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
