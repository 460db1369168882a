use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};

use analysis_input::config as cfg;
use analysis_input::report::{self, DEFAULT_OUTPUT_PATH, StatusReport};

/// Analysis input CLI
#[derive(Debug, Parser)]
#[command(
    name = analysis_input::PKG_NAME,
    version = analysis_input::PKG_VERSION,
    about = "Validate a clone-analysis input document and write a status report"
)]
struct Args {
    /// Path to the JSON input file
    #[arg(required_unless_present = "print_schema")]
    input: Option<PathBuf>,

    /// Path of the JSON status report to write
    #[arg(default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Validate and print the input without writing the report
    #[arg(long = "check")]
    check: bool,

    /// Set log level (e.g., trace, debug, info, warn, error). Overrides RUST_LOG.
    #[arg(long = "log-level")]
    log_level: Option<String>,

    /// Print the JSON Schema for the input document and exit
    #[arg(long = "print-schema")]
    print_schema: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    analysis_input::init_tracing(args.log_level.as_deref());

    if args.print_schema {
        cfg::write_schema_to_writer(io::stdout().lock())?;
        println!();
        return Ok(());
    }

    let Some(input) = args.input else {
        anyhow::bail!("missing input file argument");
    };
    info!(
        version = analysis_input::PKG_VERSION,
        input = %input.display(),
        output = %args.output.display(),
        check = args.check,
        "Starting analysis input"
    );

    let config = cfg::load(&input)?;
    debug!("Analysis input loaded successfully");

    println!("{config}");

    if args.check {
        return Ok(());
    }

    report::write_report(&StatusReport::success(&config), &args.output)?;
    println!("\nOutput written to: {}", args.output.display());
    Ok(())
}
