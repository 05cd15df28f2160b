//! Watch command handler.
//!
//! Feeds scraped population text through a [`WatchSession`], one line per
//! poll tick, and prints the cues the overlay would play.

use anyhow::{Context, Result};
use chrono::Local;
use clap::ArgMatches;
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::config::Config;
use crate::core::cues::CueEvent;
use crate::core::session::{TickReport, WatchSession};
use crate::ui::{describe_cue, format_delay, format_hud, format_time};

/// What one input line asks the session to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
    /// Blank line or `#` comment
    Skip,
    /// `@nav <path>`: the page path changed
    Navigate(&'a str),
    /// `@test`: toggle test mode
    ToggleTestMode,
    /// Anything else is scraped text for one tick
    Tick(&'a str),
}

pub fn parse_directive(line: &str) -> Directive<'_> {
    let trimmed = line.trim();

    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Directive::Skip;
    }
    if trimmed == "@test" {
        return Directive::ToggleTestMode;
    }
    let mut words = trimmed.splitn(2, char::is_whitespace);
    if words.next() == Some("@nav") {
        return match words.next().map(str::trim) {
            Some(path) if !path.is_empty() => Directive::Navigate(path),
            _ => Directive::Skip,
        };
    }

    Directive::Tick(trimmed)
}

/// Pause between ticks: `--interval` wins, else the configured poll interval.
/// Zero disables pacing.
pub fn tick_interval(flag: Option<u64>, poll_interval_ms: u64) -> Option<Duration> {
    match flag.unwrap_or(poll_interval_ms) {
        0 => None,
        ms => Some(Duration::from_millis(ms)),
    }
}

/// Execute the watch command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config_path = matches.get_one::<PathBuf>("config");
    let mut config = Config::load_or_default(config_path.map(PathBuf::as_path))?;

    if matches.get_flag("test-mode") {
        config.test_mode = true;
    }
    if matches.get_flag("no-ambient") {
        config.ambient.enabled = false;
    }

    let interval = tick_interval(
        matches.get_one::<u64>("interval").copied(),
        config.poll_interval_ms,
    );
    let json_output = matches.get_flag("json");

    let mut rng = match matches.get_one::<u64>("seed") {
        Some(&seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let reader: Box<dyn BufRead> = match matches.get_one::<PathBuf>("file") {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open input file: {:?}", path))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    // Create shared cancellation flag
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let cancel_flag_clone = cancel_flag.clone();

    // Setup Ctrl+C handler
    ctrlc::set_handler(move || {
        eprintln!();
        eprintln!("{}", "Stopping watch...".yellow().bold());
        cancel_flag_clone.store(true, Ordering::Relaxed);
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let mut session = WatchSession::new(config)?;

    if !json_output {
        println!(
            "{}",
            format!(
                "Watching population ({} rule(s), game pages match {:?})",
                session.rules().len(),
                session.config().game_path_marker
            )
            .white()
            .bold()
        );
    }

    for line in reader.lines() {
        if cancel_flag.load(Ordering::Relaxed) {
            break;
        }

        let line = line.context("Failed to read input line")?;

        match parse_directive(&line) {
            Directive::Skip => continue,
            Directive::Navigate(path) => {
                let reset = session.navigate(path);
                if !json_output {
                    print_navigation(path, reset, session.is_visible());
                }
            }
            Directive::ToggleTestMode => {
                let now = Instant::now();
                let on = session.toggle_test_mode(now, &mut rng);
                if !json_output {
                    let ambient = match session.next_ambient_at() {
                        Some(deadline) => format!(
                            "next ambient clip in {}",
                            format_delay(deadline.saturating_duration_since(now))
                        ),
                        None => "ambient clips off".to_string(),
                    };
                    println!(
                        "{}",
                        format!("Test mode {} ({})", if on { "ON" } else { "OFF" }, ambient)
                            .magenta()
                    );
                }
            }
            Directive::Tick(text) => {
                let report = session.tick(text, &mut rng)?;
                if json_output {
                    println!("{}", serde_json::to_string(&report)?);
                } else {
                    print_report(&report);
                }
            }
        }

        if let Some(event) = session.poll_ambient(Instant::now(), &mut rng) {
            if json_output {
                println!("{}", serde_json::to_string(&event)?);
            } else {
                print_cue(&event);
            }
        }

        if let Some(interval) = interval {
            std::thread::sleep(interval);
        }
    }

    let ticks = session.teardown();
    if !json_output {
        println!("{}", format!("Processed {} tick(s)", ticks).dimmed());
    }

    Ok(())
}

fn print_navigation(path: &str, reset: bool, visible: bool) {
    let mut message = format!("Navigated to {}", path);
    if reset {
        message.push_str(" (session reset)");
    }
    if !visible {
        message.push_str(" (HUD hidden)");
    }
    println!("{}", message.blue());
}

fn print_report(report: &TickReport) {
    let stamp = format!("[{}]", format_time(Local::now())).dimmed();
    let hud = if report.visible {
        format_hud(&report.quantity).normal()
    } else {
        format_hud(&report.quantity).dimmed()
    };

    if report.fired.is_empty() {
        println!("{} {}", stamp, hud);
        return;
    }

    println!(
        "{} {}  {}",
        stamp,
        hud,
        format!("crossed: {}", report.fired.join(", ")).green().bold()
    );
    for event in &report.cues {
        print_cue(event);
    }
}

fn print_cue(event: &CueEvent) {
    let origin = event.rule().unwrap_or("ambient");
    println!(
        "    {} {}",
        format!("[{}]", origin).cyan(),
        describe_cue(event)
    );
}
