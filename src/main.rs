use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

use popwatch::commands;

fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("PATH")
        .help("Config file to use instead of the user config")
        .value_parser(clap::value_parser!(PathBuf))
}

fn seed_arg() -> Arg {
    Arg::new("seed")
        .long("seed")
        .value_name("SEED")
        .help("Seed the random clip selection for reproducible runs")
        .value_parser(clap::value_parser!(u64))
}

fn main() -> Result<()> {
    let matches = Command::new("popwatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Population threshold watcher for the game overlay")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a population fragment such as \"53.2K / 1.3M\"")
                .arg(
                    Arg::new("text")
                        .help("Scraped text containing current / total")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the result as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Run threshold rules over scraped text, one line per poll tick")
                .long_about(
                    "Run threshold rules over scraped text, one line per poll tick\n\n\
                     Input lines:\n    \
                     <text>          scraped population text, e.g. \"53.2K / 1.3M\"\n    \
                     @nav <path>     page navigation, e.g. \"@nav /join/abc\"\n    \
                     @test           toggle test mode\n    \
                     # ...           comment",
                )
                .arg(
                    Arg::new("file")
                        .short('f')
                        .long("file")
                        .value_name("PATH")
                        .help("Read ticks from a file instead of stdin")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(config_arg())
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .value_name("MS")
                        .help("Pause between ticks (defaults to poll_interval_ms from the config, 0 disables)")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("test-mode")
                        .short('t')
                        .long("test-mode")
                        .help("Start with test mode on")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no-ambient")
                        .long("no-ambient")
                        .help("Disable ambient clips between threshold beats")
                        .action(ArgAction::SetTrue),
                )
                .arg(seed_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print one JSON object per tick")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("pick")
                .about("Draw clips from the catalog without immediate repeats")
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .value_name("N")
                        .help("Number of clips to draw")
                        .default_value("1")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("start")
                        .long("start")
                        .help("Draw start-of-game clips instead")
                        .action(ArgAction::SetTrue),
                )
                .arg(seed_arg()),
        )
        .subcommand(
            Command::new("rules")
                .about("List threshold rules in evaluation order")
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("config")
                .about("Manage the configuration file (use 'popwatch config --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("path").about("Print the user config path"))
                .subcommand(
                    Command::new("init")
                        .about("Write the default configuration")
                        .arg(
                            Arg::new("path")
                                .help("Where to write it (defaults to the user config path)")
                                .index(1)
                                .value_parser(clap::value_parser!(PathBuf)),
                        )
                        .arg(
                            Arg::new("force")
                                .long("force")
                                .help("Overwrite without asking")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("show")
                        .about("Print the effective configuration")
                        .arg(config_arg()),
                ),
        )
        .subcommand(Command::new("version").about("Shows version information"))
        .get_matches();

    let level = if matches.get_flag("verbose") {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    popwatch::init_logging_with(level);

    if matches.get_flag("version") {
        return commands::version();
    }

    match matches.subcommand() {
        Some(("parse", sub_matches)) => commands::parse(sub_matches),
        Some(("watch", sub_matches)) => commands::watch(sub_matches),
        Some(("pick", sub_matches)) => commands::pick(sub_matches),
        Some(("rules", sub_matches)) => commands::rules(sub_matches),
        Some(("config", sub_matches)) => commands::config::execute(sub_matches),
        Some(("version", _)) => commands::version(),
        _ => {
            println!("Welcome to popwatch!");
            println!("Use 'popwatch --help' for more information.");
            Ok(())
        }
    }
}
