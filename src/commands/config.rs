use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use std::path::PathBuf;

use crate::core::config::Config;
use crate::ui;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("path", _)) => show_path(),
        Some(("init", sub_matches)) => init(sub_matches),
        Some(("show", sub_matches)) => show(sub_matches),
        _ => {
            println!("Use 'popwatch config --help' for more information.");
            Ok(())
        }
    }
}

fn show_path() -> Result<()> {
    let path = Config::get_config_path()?;
    println!("{}", path.display());
    Ok(())
}

/// Write the default configuration so it can be edited
fn init(matches: &ArgMatches) -> Result<()> {
    let path = match matches.get_one::<PathBuf>("path") {
        Some(path) => path.clone(),
        None => Config::get_config_path()?,
    };
    let force = matches.get_flag("force");

    if path.exists() && !force {
        let overwrite = ui::confirm(&format!(
            "Config already exists at {}. Overwrite? (y/N)",
            path.display()
        ))
        .context("Failed to read confirmation")?;

        if !overwrite {
            ui::warn("Keeping existing config");
            return Ok(());
        }
    }

    Config::default().save_to(&path)?;
    ui::success(&format!("Config written to {}", path.display()));

    Ok(())
}

fn show(matches: &ArgMatches) -> Result<()> {
    let config_path = matches.get_one::<PathBuf>("config");
    let config = Config::load_or_default(config_path.map(PathBuf::as_path))?;

    println!("{}", serde_json::to_string_pretty(&config)?);
    if config_path.is_none() && !Config::get_config_path()?.exists() {
        println!("{}", "(built-in defaults, no config file found)".dimmed());
    }

    Ok(())
}
