use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use move_ide::analyzer_config;
use move_ide::commands::{self, OutputFormat, Position};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Static analysis for Move source files
#[derive(Parser, Debug)]
#[command(name = "move-ide", version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: the nearest move-ide.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report syntax and semantic diagnostics
    Check {
        /// Files, package directories or directories (default: current directory)
        paths: Vec<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,

        /// Never color the output
        #[arg(long)]
        no_color: bool,
    },
    /// Print the highlighted tokens of a file
    Tokens { file: PathBuf },
    /// Show the declaration an identifier refers to
    Resolve {
        file: PathBuf,
        /// LINE:COLUMN or byte offset
        #[arg(long)]
        at: Position,
    },
    /// List the usages of a declaration
    Usages {
        file: PathBuf,
        /// LINE:COLUMN or byte offset
        #[arg(long)]
        at: Position,
    },
    /// Run the external Move compiler and report its diagnostics
    Build {
        /// Any path inside the package (default: current directory)
        path: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<bool> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Check {
            paths,
            format,
            no_color,
        } => {
            let start = paths.first().map_or(current_dir.as_path(), PathBuf::as_path);
            let config = commands::load_config(cli.config.as_deref(), start)?;
            let files = commands::input_files(&paths, &current_dir)?;
            let use_color = !no_color && io::stdout().is_terminal();

            let summary = commands::check(
                &files,
                &analyzer_config(&config),
                format,
                use_color,
                &mut stdout,
            )?;
            eprintln!("{summary}");
            Ok(summary.errors == 0)
        }
        Commands::Tokens { file } => {
            commands::tokens(&file, &mut stdout)?;
            Ok(true)
        }
        Commands::Resolve { file, at } => commands::resolve(&file, at, &mut stdout),
        Commands::Usages { file, at } => commands::usages(&file, at, &mut stdout),
        Commands::Build { path } => {
            let start = path.as_deref().unwrap_or(current_dir.as_path());
            let config = commands::load_config(cli.config.as_deref(), start)?;
            commands::build(start, &config, &mut stdout)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
