//! # dscm CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;

use dscm_cli::{codes, message, status, validate};

/// Diagnostics contract toolkit.
///
/// Inspects the machine-code taxonomy, message catalog and status table,
/// and validates documents against JSON Schemas the way services do.
#[derive(Parser, Debug)]
#[command(name = "dscm", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List every machine code with its status and message template.
    Codes(codes::CodesArgs),
    /// Render a catalog message.
    Message(message::MessageArgs),
    /// Show the status mapping and boundary body for a code.
    Status(status::StatusArgs),
    /// Validate a document against a JSON Schema.
    Validate(validate::ValidateArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Codes(args) => codes::run(&args, &mut out)?,
        Commands::Message(args) => message::run(&args, &mut out)?,
        Commands::Status(args) => status::run(&args, &mut out)?,
        Commands::Validate(args) => {
            if !validate::run(&args, &mut out)? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
