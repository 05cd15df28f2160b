//! One watch session: the state of the overlay between two game resets.
//!
//! The session owns the rule list, the notifier flags, the clip rotation
//! and the ambient clip timer. The host drives it with [`WatchSession::tick`]
//! on every poll and [`WatchSession::navigate`] whenever the page path
//! changes.

use chrono::{DateTime, Local};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::core::catalog::Catalog;
use crate::core::config::Config;
use crate::core::cues::{Cue, CueEvent};
use crate::core::notifier::{evaluate, NotifierState, ThresholdRule};
use crate::core::quantity::{parse, Quantity};
use crate::core::rotation::ClipRotation;
use crate::error::{Result, WatchError};

/// Outcome of one poll tick
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub quantity: Quantity,
    pub percentage: f64,
    /// Rule ids that crossed on this tick, in declaration order
    pub fired: Vec<String>,
    pub cues: Vec<CueEvent>,
    /// Whether the HUD should be shown
    pub visible: bool,
}

pub struct WatchSession {
    config: Config,
    catalog: Catalog,
    rules: Vec<ThresholdRule>,
    state: NotifierState,
    rotation: ClipRotation,
    test_mode: bool,
    current_path: Option<String>,
    next_ambient: Option<Instant>,
    ticks: u64,
    started_at: DateTime<Local>,
}

impl WatchSession {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_catalog(config, Catalog::builtin())
    }

    pub fn with_catalog(config: Config, catalog: Catalog) -> Result<Self> {
        config.validate()?;

        let rules = config.threshold_rules();
        let state = NotifierState::for_rules(&rules);
        let rotation = ClipRotation::new(catalog.clips().to_vec());

        log::info!(
            "Watch session started with {} rule(s), {} clip(s)",
            rules.len(),
            catalog.clips().len()
        );

        Ok(Self {
            test_mode: config.test_mode,
            config,
            catalog,
            rules,
            state,
            rotation,
            current_path: None,
            next_ambient: None,
            ticks: 0,
            started_at: Local::now(),
        })
    }

    /// Attach a callback to a rule, run in addition to its configured cues
    pub fn on_cross<F>(&mut self, id: &str, callback: F) -> Result<()>
    where
        F: FnMut(&Quantity) + Send + 'static,
    {
        let rule = self
            .rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| WatchError::unknown_rule(id))?;
        rule.set_on_cross(Box::new(callback));
        Ok(())
    }

    /// Parse scraped text, evaluate every rule and resolve the cues of the
    /// rules that fired.
    pub fn tick<R: Rng + ?Sized>(&mut self, text: &str, rng: &mut R) -> Result<TickReport> {
        self.ticks += 1;

        let quantity = parse(text);
        let fired = evaluate(&quantity, &mut self.rules, &mut self.state)?;

        let mut cues = Vec::new();
        for id in &fired {
            let configured = self.config.cues_for(id).to_vec();
            for cue in &configured {
                if let Some(event) = self.resolve(id, cue, rng) {
                    cues.push(event);
                }
            }
        }

        Ok(TickReport {
            tick: self.ticks,
            percentage: quantity.percentage(),
            quantity,
            fired,
            cues,
            visible: self.is_visible(),
        })
    }

    fn resolve<R: Rng + ?Sized>(&mut self, rule: &str, cue: &Cue, rng: &mut R) -> Option<CueEvent> {
        match cue {
            Cue::Beep { pattern } => Some(CueEvent::Beep {
                rule: rule.to_string(),
                pattern: *pattern,
                tones: pattern.tones(),
            }),
            Cue::Clip { file } => {
                if !self.catalog.contains(file) {
                    log::debug!("Rule '{}' wants clip {:?}, not in catalog", rule, file);
                    return None;
                }
                Some(self.clip_event(Some(rule), file))
            }
            Cue::RandomClip => {
                let file = self.rotation.next_clip(rng)?;
                Some(self.clip_event(Some(rule), &file))
            }
            Cue::StartClip => {
                let file = self.catalog.start_clips().choose(rng)?.clone();
                Some(self.clip_event(Some(rule), &file))
            }
        }
    }

    fn clip_event(&self, rule: Option<&str>, file: &str) -> CueEvent {
        CueEvent::Clip {
            rule: rule.map(str::to_string),
            clip: self.catalog.describe(file),
        }
    }

    /// Record a page path change. Leaving a game page, or moving to another
    /// game page, starts the notifier over. Returns whether it was reset.
    pub fn navigate(&mut self, path: &str) -> bool {
        if self.current_path.as_deref() == Some(path) {
            return false;
        }

        let was_game = self.on_game_page();
        let is_game = path.contains(&self.config.game_path_marker);
        self.current_path = Some(path.to_string());

        if was_game || (is_game && self.ticks > 0) {
            self.reset();
            return true;
        }

        false
    }

    /// Re-arm every rule and forget recently played clips
    pub fn reset(&mut self) {
        log::info!("Session reset after {} tick(s)", self.ticks);
        self.state.reset();
        self.rotation.clear_history();
    }

    /// Flip test mode; the ambient timer restarts from `now`
    pub fn toggle_test_mode<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> bool {
        self.test_mode = !self.test_mode;
        log::info!("Test mode: {}", if self.test_mode { "ON" } else { "OFF" });
        self.schedule_ambient(now, rng);
        self.test_mode
    }

    /// Delay until the next ambient clip
    pub fn next_ambient_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let ambient = &self.config.ambient;
        if self.test_mode {
            return Duration::from_secs(ambient.test_secs);
        }

        let min_ms = ambient.min_secs.saturating_mul(1000);
        let max_ms = ambient.max_secs.saturating_mul(1000).max(min_ms);
        Duration::from_millis(rng.gen_range(min_ms..=max_ms))
    }

    fn schedule_ambient<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) {
        if !self.config.ambient.enabled {
            self.next_ambient = None;
            return;
        }
        let delay = self.next_ambient_delay(rng);
        log::debug!("Next ambient clip in {:?}", delay);
        self.next_ambient = now.checked_add(delay);
    }

    /// When the next ambient clip is due, if one is scheduled
    pub fn next_ambient_at(&self) -> Option<Instant> {
        self.next_ambient
    }

    /// Play an ambient clip if its time has come.
    ///
    /// The first call only arms the timer.
    pub fn poll_ambient<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> Option<CueEvent> {
        if !self.config.ambient.enabled {
            return None;
        }

        match self.next_ambient {
            None => {
                self.schedule_ambient(now, rng);
                None
            }
            Some(deadline) if now >= deadline => {
                self.schedule_ambient(now, rng);
                let file = self.rotation.next_clip(rng)?;
                Some(self.clip_event(None, &file))
            }
            Some(_) => None,
        }
    }

    /// End the session, returning how many ticks it processed
    pub fn teardown(self) -> u64 {
        let elapsed = Local::now().signed_duration_since(self.started_at);
        log::info!(
            "Watch session ended: {} tick(s) over {}s",
            self.ticks,
            elapsed.num_seconds()
        );
        self.ticks
    }

    pub fn on_game_page(&self) -> bool {
        self.current_path
            .as_deref()
            .is_some_and(|p| p.contains(&self.config.game_path_marker))
    }

    pub fn is_visible(&self) -> bool {
        self.test_mode || self.on_game_page()
    }

    pub fn test_mode(&self) -> bool {
        self.test_mode
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rules(&self) -> &[ThresholdRule] {
        &self.rules
    }

    pub fn state(&self) -> &NotifierState {
        &self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }
}
