use anyhow::Result;
use clap::ArgMatches;
use colored::Colorize;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::core::catalog::Catalog;
use crate::core::cues::CueEvent;
use crate::core::rotation::ClipRotation;
use crate::ui::describe_cue;

/// Draw clips from the built-in catalog the way the overlay would
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let count = matches.get_one::<usize>("count").copied().unwrap_or(1);
    let start = matches.get_flag("start");
    let mut rng = match matches.get_one::<u64>("seed") {
        Some(&seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let catalog = Catalog::builtin();
    let mut rotation = ClipRotation::new(catalog.clips().to_vec());

    for i in 1..=count {
        let file = if start {
            catalog.start_clips().choose(&mut rng).cloned()
        } else {
            rotation.next_clip(&mut rng)
        };

        let Some(file) = file else {
            println!("{}", "Catalog is empty".yellow());
            break;
        };

        let event = CueEvent::Clip {
            rule: None,
            clip: catalog.describe(&file),
        };
        println!(
            "{:>3}. {}  {}",
            i,
            file.cyan(),
            describe_cue(&event).dimmed()
        );
    }

    Ok(())
}
