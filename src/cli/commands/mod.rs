//! Command implementations for the run report merger CLI
//!
//! Each subcommand lives in its own module. The commands are the only place
//! files are opened: they read the input buffers, hand them to the pure
//! engine, and write the produced bytes to the destination.

pub mod merge;
pub mod shared;
pub mod template;
pub mod update;

pub use shared::RunSummary;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Dispatch a parsed command line to its command handler
pub fn run(args: Args) -> Result<RunSummary> {
    match args.command {
        Some(Commands::Merge(merge_args)) => merge::run_merge(merge_args),
        Some(Commands::Update(update_args)) => update::run_update(update_args),
        Some(Commands::Template(template_args)) => template::run_template(template_args),
        None => Err(Error::configuration("no command given")),
    }
}
