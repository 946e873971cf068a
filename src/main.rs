use std::process;
use log::error;

use satres::utils::logger::Logger;
use satres::commands::{build_cli, CommandFactory, SatresCommandFactory};

/// Exit code for errors that leave the process unusable (model load)
const FATAL_EXIT_CODE: i32 = 2;

fn main() {
    let matches = build_cli().get_matches();

    let verbose = matches.get_flag("verbose");
    let level = Logger::level_for(verbose);
    let log_file = matches.get_one::<String>("log-file")
        .map(String::as_str)
        .unwrap_or(satres::utils::logger::DEFAULT_LOG_FILE);

    let logger = match Logger::new(log_file, level) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger(log_file, level) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = SatresCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command failed during {}: {}", e.stage(), e);
                eprintln!("Error: {}", e);
                process::exit(if e.is_fatal() { FATAL_EXIT_CODE } else { 1 });
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
