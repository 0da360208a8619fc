use super::{FILE_DT_FORMAT, VERSION};
use chrono::prelude::*;
use clap::{App, Arg, ArgMatches};
use std::path::PathBuf;
use tracing::Level;

/// Takes the CLI arguments that control where the chart is written and how much is logged.
pub fn parse_cli() -> (PathBuf, Level) {
    let cli_args = cli_app().get_matches();
    settings_from(&cli_args, Local::now())
}

fn cli_app() -> App<'static, 'static> {
    let arg_svgout = Arg::with_name("output_svgfile")
        .help("name of the output svg file, defaults to chart_<datetime>.svg")
        .short("o")
        .long("svgfile")
        .takes_value(true);
    let arg_verbose = Arg::with_name("verbose")
        .help("print log information on stderr, repeat for more detail")
        .short("v")
        .long("verbose")
        .multiple(true)
        .takes_value(false);
    App::new("chartmaker")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to enter x/y data manually or from a text file and plot it")
        .arg(arg_svgout)
        .arg(arg_verbose)
}

fn settings_from(cli_args: &ArgMatches, now: DateTime<Local>) -> (PathBuf, Level) {
    let svgout = match cli_args.value_of("output_svgfile") {
        Some(p) => PathBuf::from(p),
        None => default_svgout(now),
    };
    let level = match cli_args.occurrences_of("verbose") {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    (svgout, level)
}

pub fn default_svgout(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("chart_{}.svg", now.format(FILE_DT_FORMAT)))
}
