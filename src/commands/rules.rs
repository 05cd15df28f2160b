use anyhow::Result;
use clap::ArgMatches;
use colored::Colorize;
use std::path::PathBuf;

use crate::core::config::Config;
use crate::core::cues::Cue;
use crate::core::notifier::Metric;
use crate::ui::{format_percentage, format_population};

/// List the configured threshold rules in evaluation order
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config_path = matches.get_one::<PathBuf>("config");
    let config = Config::load_or_default(config_path.map(PathBuf::as_path))?;

    if config.rules.is_empty() {
        println!("{}", "No rules configured".yellow());
        return Ok(());
    }

    println!("{}", "Threshold rules (evaluated in this order):".white().bold());
    println!();

    for (i, rule) in config.rules.iter().enumerate() {
        let threshold = match rule.metric {
            Metric::Current => format_population(rule.value),
            Metric::Percentage => format_percentage(rule.value),
        };
        let cues: Vec<String> = rule.cues.iter().map(cue_label).collect();

        println!(
            "{:>3}. {:<20} {:<11} >= {:<8} {}",
            i + 1,
            rule.id.cyan().bold(),
            rule.metric.to_string(),
            threshold,
            cues.join(", ").dimmed()
        );
    }

    Ok(())
}

fn cue_label(cue: &Cue) -> String {
    match cue {
        Cue::Beep { pattern } => format!("beep:{:?}", pattern),
        Cue::Clip { file } => format!("clip:{}", file),
        Cue::RandomClip => "random clip".to_string(),
        Cue::StartClip => "start clip".to_string(),
    }
}
