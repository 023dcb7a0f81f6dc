mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "escala",
    version,
    about = "Shift-roster parser for hospital schedules (PDF and CSV)"
)]
struct Cli {
    /// Log parsing decisions to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a roster (PDF or CSV) into sectors, employees and day codes
    Parse {
        /// Path to a .pdf or .csv roster
        input_file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,

        /// Write the parsed schedule to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Custom roster configuration (JSON)
        #[arg(short, long, value_name = "FILE", env = "ESCALA_CONFIG")]
        config: Option<PathBuf>,

        /// Include strategy scores and merge conflicts
        #[arg(long)]
        diagnostics: bool,
    },
    /// Inspect and validate roster configurations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print the shift-code legend
    Legend {
        /// Custom roster configuration (JSON)
        #[arg(short, long, value_name = "FILE", env = "ESCALA_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the built-in configuration as JSON
    Show,
    /// Validate a custom configuration file
    Validate {
        /// Path to JSON configuration file
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Parse {
            input_file,
            output,
            out,
            config,
            diagnostics,
        } => commands::parse::run(input_file, output, out, config, diagnostics),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
        Commands::Legend { config } => commands::legend::run(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
