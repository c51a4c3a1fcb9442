pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{ClassifyArgs, CliArgs, Commands, CompareArgs, ConfigArgs, InspectArgs};
pub use output::{OutputFormat, OutputFormatter, VersionComparison};
