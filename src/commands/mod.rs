//! CLI command implementations
//!
//! This module contains implementations of the subcommands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod cli;
pub mod args;
pub mod generate_command;
pub mod area_command;
pub mod search_command;
pub mod tiles_command;

pub use command_traits::{Command, CommandFactory};
pub use cli::build_cli;
pub use generate_command::GenerateCommand;
pub use area_command::AreaCommand;
pub use search_command::SearchCommand;
pub use tiles_command::TilesCommand;

use clap::ArgMatches;
use crate::utils::logger::Logger;
use crate::errors::{SrError, SrResult};

/// Factory for creating command instances based on CLI arguments
///
/// Dispatches on the subcommand name and hands the subcommand's own
/// matches to the command.
pub struct SatresCommandFactory;

impl SatresCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        SatresCommandFactory
    }
}

impl Default for SatresCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for SatresCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> SrResult<Box<dyn Command + 'a>> {
        match args.subcommand() {
            Some(("generate", sub)) => Ok(Box::new(GenerateCommand::new(sub, logger)?)),
            Some(("area", sub)) => Ok(Box::new(AreaCommand::new(sub, logger)?)),
            Some(("search", sub)) => Ok(Box::new(SearchCommand::new(sub, logger)?)),
            Some(("tiles", sub)) => Ok(Box::new(TilesCommand::new(sub, logger)?)),
            Some((other, _)) => Err(SrError::GenericError(format!("Unknown command: {}", other))),
            None => Err(SrError::GenericError("No command given; try --help".to_string())),
        }
    }
}
