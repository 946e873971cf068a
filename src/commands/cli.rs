//! Command-line definition

use clap::{Arg, ArgAction, Command as ClapCommand};

use crate::utils::logger::DEFAULT_LOG_FILE;

fn region_args(cmd: ClapCommand) -> ClapCommand {
    cmd.arg(
            Arg::new("bounds")
                .long("bounds")
                .help("Region corners as 'lat1,lon1,lat2,lon2'")
                .value_name("BOUNDS")
                .allow_hyphen_values(true)
                .conflicts_with("geojson")
                .required_unless_present("geojson"),
        )
        .arg(
            Arg::new("geojson")
                .long("geojson")
                .help("GeoJSON file holding the drawn rectangle")
                .value_name("FILE"),
        )
}

fn date_arg(cmd: ClapCommand) -> ClapCommand {
    cmd.arg(
        Arg::new("date")
            .short('d')
            .long("date")
            .help("Target date (YYYY-MM-DD), between 2017-03-23 and today")
            .value_name("DATE"),
    )
}

fn window_arg(cmd: ClapCommand) -> ClapCommand {
    cmd.arg(
        Arg::new("window")
            .short('w')
            .long("window")
            .help("Search window in days around the target date (15-180)")
            .value_name("DAYS"),
    )
}

/// Build the `satres` command line
pub fn build_cli() -> ClapCommand {
    let generate = window_arg(date_arg(region_args(
        ClapCommand::new("generate").about("Fetch two scenes and produce a super-resolved image"),
    )))
    .arg(
        Arg::new("output-dir")
            .short('o')
            .long("output-dir")
            .help("Directory for the result image (overrides the config)")
            .value_name("DIR"),
    )
    .arg(
        Arg::new("no-progress")
            .long("no-progress")
            .help("Do not draw progress spinners")
            .action(ArgAction::SetTrue),
    );

    let area = region_args(ClapCommand::new("area").about("Report the area of a region in hectares"));

    let search = window_arg(date_arg(region_args(
        ClapCommand::new("search").about("Find the two clearest scenes without running the model"),
    )));

    let tiles = date_arg(region_args(
        ClapCommand::new("tiles").about("Print a map tile template for the target year's composite"),
    ));

    ClapCommand::new("satres")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Super-resolve a pair of Sentinel-2 captures over a small region")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Configuration file (TOML)")
                .value_name("FILE")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Log file path")
                .value_name("FILE")
                .default_value(DEFAULT_LOG_FILE)
                .global(true),
        )
        .subcommand(generate)
        .subcommand(area)
        .subcommand(search)
        .subcommand(tiles)
}
