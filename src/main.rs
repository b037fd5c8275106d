use anyhow::Result;
use changetree::output::{self, Verbosity};
use changetree::{ChangetreeContext, commands};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cht",
    version = changetree::VERSION,
    about = "Liquibase changelog tree inspector",
    long_about = "Resolves a tree of Liquibase changelogs, extracts changeset records from the referenced SQL scripts, and renders the result"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the changelog tree and print it
    Tree {
        /// Root changelog to resolve (defaults to the configured one)
        changelog: Option<PathBuf>,

        /// Emit the resolved tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every changeset found in the tree
    Changesets {
        /// Root changelog to resolve (defaults to the configured one)
        changelog: Option<PathBuf>,
    },

    /// Get and set configuration options
    Config {
        /// Configuration key
        key: Option<String>,

        /// Configuration value to set
        value: Option<String>,

        /// Unset the configuration key
        #[arg(long)]
        unset: bool,

        /// List all configuration values
        #[arg(short, long)]
        list: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    if cli.quiet {
        output::set_verbosity(Verbosity::Quiet);
    } else if cli.verbose {
        output::set_verbosity(Verbosity::Verbose);
    }

    match cli.command {
        Commands::Tree { changelog, json } => {
            let ctx = ChangetreeContext::new()?;
            commands::tree::execute(&ctx, changelog.as_deref(), json)?;
        }
        Commands::Changesets { changelog } => {
            let ctx = ChangetreeContext::new()?;
            commands::changesets::execute(&ctx, changelog.as_deref())?;
        }
        Commands::Config {
            key,
            value,
            unset,
            list,
        } => {
            let mut ctx = ChangetreeContext::new()?;
            commands::config::execute(&mut ctx, key.as_deref(), value, unset, list)?;
        }
        Commands::Completion { shell } => {
            print_completions(shell, &mut Cli::command());
        }
    }

    Ok(())
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(generator, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

// Tracing goes to stderr so renderings on stdout stay pipeable.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "changetree=debug"
    } else {
        "changetree=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
