use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Detects Liberty dev-mode projects and keeps their Liberty nature current
#[derive(Parser, Debug)]
#[command(
    name = "liberty-detect",
    about = "Detects Liberty dev-mode support in Maven and Gradle projects",
    version,
    long_about = "liberty-detect inspects a project's pom.xml or Gradle build script for the \
                  Liberty build plugin and records the answer as the Liberty nature in the \
                  project's .project file."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Classify a project and reconcile its Liberty nature",
        long_about = "Answers whether the project runs in Liberty dev mode. An existing Liberty \
                      nature is trusted unless --refresh is given; otherwise the build descriptor \
                      is analyzed and the nature added or removed to match.\n\n\
                      Examples:\n  \
                      liberty-detect classify\n  \
                      liberty-detect classify /path/to/project --refresh\n  \
                      liberty-detect classify --format json"
    )]
    Classify(ClassifyArgs),

    #[command(
        about = "Analyze a project's build descriptor without changing its natures",
        long_about = "Reports the Liberty plugin declaration, its version and whether it \
                      supports container dev mode. Never writes project metadata.\n\n\
                      Examples:\n  \
                      liberty-detect inspect /path/to/project --format yaml"
    )]
    Inspect(InspectArgs),

    #[command(
        about = "Compare two Maven-style version strings",
        long_about = "Prints <, = or > for the ordering of A relative to B, or 'not comparable' \
                      when either version cannot be parsed.\n\n\
                      Examples:\n  \
                      liberty-detect compare 3.3-M1 3.2"
    )]
    Compare(CompareArgs),

    #[command(about = "Show the effective configuration")]
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to the project (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(long, help = "Ignore an existing Liberty nature and re-read the descriptor")]
    pub refresh: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to the project (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct CompareArgs {
    #[arg(value_name = "A")]
    pub left: String,

    #[arg(value_name = "B")]
    pub right: String,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
