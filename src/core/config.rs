use anyhow::{Context, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::cues::{BeepPattern, Cue};
use crate::core::notifier::{Metric, ThresholdRule};
use crate::core::quantity::parse_amount;
use crate::error::WatchError;

/// Longest ambient delay a config may ask for (one day)
pub const MAX_AMBIENT_SECS: u64 = 24 * 60 * 60;

/// Clip played at the 70% beat if the catalog has it
pub const SEVENTY_PERCENT_CLIP: &str = "mrbeast_70percent_population_wow_thats_a_lot.mp3";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Delay between two polls of the scraped text
    pub poll_interval_ms: u64,
    /// Path fragment that identifies a game page
    pub game_path_marker: String,
    /// Start sessions with test mode on (HUD always visible, fast ambient clips)
    pub test_mode: bool,
    pub ambient: AmbientConfig,
    /// Evaluated in this order on every tick
    pub rules: Vec<RuleConfig>,
}

/// Timing of the random clips played between threshold beats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    pub enabled: bool,
    pub min_secs: u64,
    pub max_secs: u64,
    pub test_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub id: String,
    pub metric: Metric,
    /// Plain number or a population literal such as `"2.5K"`
    #[serde(deserialize_with = "deserialize_amount")]
    pub value: f64,
    #[serde(default)]
    pub cues: Vec<Cue>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            game_path_marker: "/join/".to_string(),
            test_mode: false,
            ambient: AmbientConfig::default(),
            rules: default_rules(),
        }
    }
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_secs: 2 * 60,
            max_secs: 5 * 60,
            test_secs: 15,
        }
    }
}

impl RuleConfig {
    pub fn new<S: Into<String>>(id: S, metric: Metric, value: f64, cues: Vec<Cue>) -> Self {
        Self {
            id: id.into(),
            metric,
            value,
            cues,
        }
    }

    pub fn to_rule(&self) -> ThresholdRule {
        ThresholdRule::new(self.id.clone(), self.metric, self.value)
    }
}

/// Start-of-game greeting, then the 70% and 50% population beats
pub fn default_rules() -> Vec<RuleConfig> {
    vec![
        RuleConfig::new("start_population", Metric::Current, 2_500.0, vec![Cue::StartClip]),
        RuleConfig::new(
            "seventy_percent",
            Metric::Percentage,
            70.0,
            vec![
                Cue::Beep {
                    pattern: BeepPattern::SeventyPercent,
                },
                Cue::Clip {
                    file: SEVENTY_PERCENT_CLIP.to_string(),
                },
            ],
        ),
        RuleConfig::new(
            "fifty_percent",
            Metric::Percentage,
            50.0,
            vec![
                Cue::Beep {
                    pattern: BeepPattern::FiftyPercent,
                },
                Cue::RandomClip,
            ],
        ),
    ]
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Number(f64),
    Text(String),
}

fn deserialize_amount<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
    match AmountRepr::deserialize(deserializer)? {
        AmountRepr::Number(value) => Ok(value),
        AmountRepr::Text(text) => {
            let value = parse_amount(&text);
            let literal = text.trim().trim_end_matches(|c: char| c.is_ascii_alphabetic());
            if value == 0.0 && literal.trim().parse::<f64>().ok() != Some(0.0) {
                return Err(D::Error::custom(format!("invalid amount: {:?}", text)));
            }
            Ok(value)
        }
    }
}

impl Config {
    /// Load from the user config directory, or defaults if no file exists
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            log::debug!("No config at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        // An empty file behaves like a missing one
        let config: Config = if data.trim().is_empty() {
            Config::default()
        } else {
            serde_json::from_str(&data)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config file: {:?}", path))?;

        log::debug!("Loaded {} rule(s) from {:?}", config.rules.len(), path);
        Ok(config)
    }

    /// Load `path` if given, otherwise the user config
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, data).with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("popwatch").join("config.json"))
    }

    /// Reject configurations the notifier cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(WatchError::config("poll_interval_ms must be greater than 0"));
        }

        if self.game_path_marker.trim().is_empty() {
            return Err(WatchError::config("game_path_marker cannot be empty"));
        }

        let ambient = &self.ambient;
        for (name, secs) in [
            ("min_secs", ambient.min_secs),
            ("max_secs", ambient.max_secs),
            ("test_secs", ambient.test_secs),
        ] {
            if secs > MAX_AMBIENT_SECS {
                return Err(WatchError::config(format!(
                    "ambient.{} ({}) exceeds {} seconds",
                    name, secs, MAX_AMBIENT_SECS
                )));
            }
        }

        if self.ambient.min_secs > self.ambient.max_secs {
            return Err(WatchError::config(format!(
                "ambient.min_secs ({}) is greater than ambient.max_secs ({})",
                self.ambient.min_secs, self.ambient.max_secs
            )));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.id.trim().is_empty() {
                return Err(WatchError::invalid_rule(&rule.id, "id cannot be empty"));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(WatchError::DuplicateRule(rule.id.clone()));
            }
            if !rule.value.is_finite() || rule.value < 0.0 {
                return Err(WatchError::invalid_rule(
                    &rule.id,
                    format!("value must be a non-negative number, got {}", rule.value),
                ));
            }
        }

        Ok(())
    }

    pub fn threshold_rules(&self) -> Vec<ThresholdRule> {
        self.rules.iter().map(RuleConfig::to_rule).collect()
    }

    pub fn rule(&self, id: &str) -> Option<&RuleConfig> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Cues attached to a rule, empty for unknown ids
    pub fn cues_for(&self, id: &str) -> &[Cue] {
        self.rule(id).map(|r| r.cues.as_slice()).unwrap_or(&[])
    }
}
