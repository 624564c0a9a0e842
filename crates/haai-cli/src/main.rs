//! `haai` - query the HAAI activity taxonomy

mod commands;
mod discover;
mod format;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use haai_catalog::{Dataset, DatasetConfig, GenerationPolicy};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn build_cli() -> Command {
    Command::new("haai")
        .version(haai_catalog::VERSION)
        .about("Human Activity Automation Index (HAAI) Taxonomy Tool")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .env("HAAI_DATA_DIR")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Dataset root (defaults to the nearest directory holding taxonomy.json)"),
        )
        .arg(
            Arg::new("generation")
                .long("generation")
                .global(true)
                .default_value("auto")
                .value_parser(["auto", "split", "legacy"])
                .help("Dataset generation to read"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log loading decisions to stderr"),
        )
        .subcommand(Command::new("domains").about("List all domains"))
        .subcommand(
            Command::new("domain").about("Show domain details").arg(
                Arg::new("id")
                    .required(true)
                    .value_parser(value_parser!(u32))
                    .help("Domain number"),
            ),
        )
        .subcommand(
            Command::new("activities")
                .about("List activities, optionally for one domain")
                .arg(
                    Arg::new("domain")
                        .value_parser(value_parser!(u32))
                        .help("Domain number; 0 or omitted lists every activity"),
                ),
        )
        .subcommand(
            Command::new("activity")
                .about("Show activity details")
                .arg(Arg::new("id").required(true).help("Activity id, e.g. 3.3.1")),
        )
        .subcommand(
            Command::new("wave").about("List activities by AGI wave").arg(
                Arg::new("wave")
                    .required(true)
                    .value_parser(value_parser!(u8).range(1..=4))
                    .help("Wave number (1-4)"),
            ),
        )
        .subcommand(
            Command::new("capability")
                .about("List activities by AI capability")
                .arg(
                    Arg::new("status")
                        .required(true)
                        .help("solved, near_solved, partial, early or not_attempted"),
                ),
        )
        .subcommand(
            Command::new("bottleneck")
                .about("List activities by bottleneck type")
                .arg(Arg::new("type").required(true).help("Bottleneck category")),
        )
        .subcommand(
            Command::new("search")
                .about("Search activities by name or description")
                .arg(
                    Arg::new("term")
                        .required(true)
                        .num_args(1..)
                        .help("Search terms, joined with spaces"),
                ),
        )
        .subcommand(Command::new("time").about("Show ATUS time-spent data"))
        .subcommand(Command::new("econ").about("Show economic impact by domain"))
        .subcommand(Command::new("stats").about("Show taxonomy statistics"))
        .subcommand(
            Command::new("index")
                .about("Show index metadata")
                .arg(Arg::new("name").required(true).help("Index name, e.g. abstraction")),
        )
        .subcommand(Command::new("audit").about("Show scores left unresolved by the merge"))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn dataset_config(matches: &ArgMatches) -> Result<DatasetConfig> {
    let root = matches
        .get_one::<PathBuf>("data-dir")
        .cloned()
        .unwrap_or_else(discover::discover_root);
    let generation = matches
        .get_one::<String>("generation")
        .map_or(Ok(GenerationPolicy::Auto), |raw| raw.parse())
        .map_err(anyhow::Error::msg)?;

    tracing::debug!(root = %root.display(), ?generation, "dataset configured");
    Ok(DatasetConfig::new(root).with_generation(generation))
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a String> {
    args.get_one::<String>(name)
        .with_context(|| format!("missing argument <{name}>"))
}

fn run(matches: &ArgMatches, out: &mut impl Write) -> Result<()> {
    let dataset = Dataset::open(dataset_config(matches)?);

    match matches.subcommand() {
        Some(("domains", _)) => commands::domains(&dataset, out),
        Some(("domain", args)) => {
            let id = *args.get_one::<u32>("id").context("missing argument <id>")?;
            commands::domain(&dataset, id, out)
        }
        Some(("activities", args)) => {
            commands::activities(&dataset, args.get_one::<u32>("domain").copied(), out)
        }
        Some(("activity", args)) => commands::activity(&dataset, required(args, "id")?, out),
        Some(("wave", args)) => {
            let wave = *args.get_one::<u8>("wave").context("missing argument <wave>")?;
            commands::wave(&dataset, wave, out)
        }
        Some(("capability", args)) => {
            commands::capability(&dataset, required(args, "status")?, out)
        }
        Some(("bottleneck", args)) => {
            commands::bottleneck(&dataset, required(args, "type")?, out)
        }
        Some(("search", args)) => {
            let term = args
                .get_many::<String>("term")
                .map(|terms| terms.map(String::as_str).collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            commands::search(&dataset, &term, out)
        }
        Some(("time", _)) => commands::time(&dataset, out),
        Some(("econ", _)) => commands::econ(&dataset, out),
        Some(("stats", _)) => commands::stats(&dataset, out),
        Some(("index", args)) => commands::index(&dataset, required(args, "name")?, out),
        Some(("audit", _)) => commands::audit(&dataset, out),
        Some((other, _)) => anyhow::bail!("unknown command: {other}"),
        None => anyhow::bail!("no command given"),
    }
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run(&matches, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = out.flush();
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
