use liberty_detect::cli::commands::{CliArgs, Commands};
use liberty_detect::cli::handlers::{handle_classify, handle_compare, handle_config, handle_inspect};
use liberty_detect::util::logging::{init_logging, parse_level, LoggingConfig};
use liberty_detect::{DetectConfig, VERSION};

use clap::Parser;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("liberty-detect v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Classify(classify_args) => handle_classify(classify_args, args.quiet),
        Commands::Inspect(inspect_args) => handle_inspect(inspect_args, args.quiet),
        Commands::Compare(compare_args) => handle_compare(compare_args),
        Commands::Config(config_args) => handle_config(config_args),
    };

    std::process::exit(exit_code);
}

/// Flags win over `LIBERTY_DETECT_LOG_LEVEL`
fn init_logging_from_args(args: &CliArgs) {
    let mut config = LoggingConfig::from_detect_config(&DetectConfig::default());

    config.level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        config.level
    };

    init_logging(config);
}
