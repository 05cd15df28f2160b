use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::quantity::parse;
use crate::ui::format_hud;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let text = matches
        .get_one::<String>("text")
        .context("Text argument is required")?;

    let quantity = parse(text);

    if matches.get_flag("json") {
        let output = serde_json::json!({
            "current": quantity.current,
            "total": quantity.total,
            "percentage": quantity.percentage(),
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if quantity.is_zero() {
        println!("{}", "No population ratio found".yellow());
    }
    println!("{}", format_hud(&quantity).white().bold());
    println!(
        "{}",
        format!(
            "current = {}, total = {}",
            quantity.current, quantity.total
        )
        .dimmed()
    );

    Ok(())
}
