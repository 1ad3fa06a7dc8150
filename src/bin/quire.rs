//! Command-line interface for quire
//! Compiles one or more quire documents and prints the mangled tree.
//!
//! Usage:
//!   quire `<path>...` [--config `<file>`] [--tag `<name>`]... [--format `<format>`]
//!   quire `<path>` --list-designators                   - Print the identifier table instead
//!
//! Several paths are compiled together as one opus. Problems go to stderr as
//! `file:line:column: message`.

use clap::{Arg, ArgAction, ArgMatches, Command};
use quire::quire::formats::{designator_listing, render};
use quire::quire::transforms::stages::Source;
use quire::quire::transforms::standard::Pipeline;
use quire_config::{Loader, QuireConfig};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn build_cli() -> Command {
    Command::new("quire")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile quire documents into a structured tree")
        .arg_required_else_help(true)
        .arg(
            Arg::new("paths")
                .help("Documents to compile; several form one opus")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("tag")
                .long("tag")
                .short('t')
                .help("Keep only content carrying this tag (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["treeviz", "json", "yaml"]),
        )
        .arg(
            Arg::new("compact")
                .long("compact")
                .help("Drop whitespace and line breaks from the output tree")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-designators")
                .long("list-designators")
                .help("Print the identifier table instead of the tree")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("show-locations")
                .long("show-locations")
                .help("Include source locations in the output")
                .action(ArgAction::SetTrue),
        )
}

fn load_config(matches: &ArgMatches) -> Result<QuireConfig, String> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader
            .set_override("output.format", format.as_str())
            .map_err(|e| e.to_string())?;
    }
    if matches.get_flag("compact") {
        loader = loader
            .set_override("mangling.remove_separators", true)
            .map_err(|e| e.to_string())?;
    }
    if matches.get_flag("show-locations") {
        loader = loader
            .set_override("output.show_locations", true)
            .map_err(|e| e.to_string())?;
    }
    let mut config = loader.build().map_err(|e| e.to_string())?;
    if let Some(tags) = matches.get_many::<String>("tag") {
        config.filter.tags = tags.cloned().collect();
    }
    Ok(config)
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_sources(matches: &ArgMatches) -> Result<Vec<Source>, String> {
    matches
        .get_many::<String>("paths")
        .into_iter()
        .flatten()
        .map(|path| {
            std::fs::read_to_string(path)
                .map(|text| Source::named(path.as_str(), text))
                .map_err(|e| format!("{}: {}", path, e))
        })
        .collect()
}

fn run(matches: &ArgMatches) -> Result<ExitCode, String> {
    let config = load_config(matches)?;
    init_logging(&config.logging.level);
    debug!(?config, "configuration loaded");

    let sources = read_sources(matches)?;
    let compiled = Pipeline::from_config(&config)
        .compile(sources)
        .map_err(|e| e.to_string())?;

    let output = if matches.get_flag("list-designators") {
        designator_listing(&compiled.designators, &compiled.tree)
    } else {
        render(
            &compiled.tree,
            config.output.format,
            config.output.show_locations,
        )
        .map_err(|e| e.to_string())?
    };
    print!("{}", output);

    for problem in &compiled.problems {
        eprintln!("{}", problem);
    }
    if config.problems.fail_on_problems && !compiled.problems.is_empty() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    match run(&matches) {
        Ok(code) => code,
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}
