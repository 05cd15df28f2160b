use chrono::{DateTime, Local};
use std::time::Duration;

use crate::core::cues::CueEvent;
use crate::core::quantity::Quantity;

/// Format a population count the way the game shows it (750, 2.5K, 1.3M)
pub fn format_population(value: f64) -> String {
    let whole = value.round();
    if whole < 1_000.0 {
        return format!("{}", whole as u64);
    }

    let thousands = (value / 100.0).round() / 10.0;
    if thousands < 1_000.0 {
        return format!("{}K", trim_decimal(thousands));
    }

    let millions = (value / 100_000.0).round() / 10.0;
    format!("{}M", trim_decimal(millions))
}

/// `12.0` -> `12`, `12.5` -> `12.5`
fn trim_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as u64)
    } else {
        format!("{:.1}", value)
    }
}

pub fn format_percentage(percentage: f64) -> String {
    format!("{}%", percentage as u64)
}

/// The one-line heads-up display
pub fn format_hud(quantity: &Quantity) -> String {
    format!(
        "Population: {} / {} ({})",
        format_population(quantity.current),
        format_population(quantity.total),
        format_percentage(quantity.percentage())
    )
}

/// Format timestamp for log lines (HH:MM:SS)
pub fn format_time(time: DateTime<Local>) -> String {
    time.format("%H:%M:%S").to_string()
}

/// Format a delay as `2m 30s`, `45s` or `500ms`
pub fn format_delay(delay: Duration) -> String {
    let secs = delay.as_secs();
    if secs == 0 {
        return format!("{}ms", delay.as_millis());
    }
    if secs < 60 {
        return format!("{}s", secs);
    }
    match secs % 60 {
        0 => format!("{}m", secs / 60),
        rest => format!("{}m {}s", secs / 60, rest),
    }
}

/// Short human-readable description of a resolved cue
pub fn describe_cue(event: &CueEvent) -> String {
    match event {
        CueEvent::Beep { pattern, tones, .. } => {
            let freqs: Vec<String> = tones.iter().map(|t| format!("{}Hz", t.frequency_hz)).collect();
            format!("beep {:?} [{}]", pattern, freqs.join(", "))
        }
        CueEvent::Clip { clip, .. } => match &clip.speaker {
            Some(speaker) => format!("{}: \"{}\"", speaker, clip.transcript),
            None => format!("\"{}\"", clip.transcript),
        },
    }
}
