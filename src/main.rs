//! Contextifyer - link ontology terms in markdown
//!
//! Entry point for the contextifyer binary: the HTTP service, batch
//! rewriting of files and directories, and a few inspection commands.

mod cli;

use clap::{Parser, Subcommand};
use contextifyer_core::error::Result;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(name = "contextifyer")]
#[command(about = "Link ontology terms in markdown text", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Config file (defaults to <config dir>/contextifyer/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Read labels from a JSON file instead of the SPARQL endpoint
    #[arg(long, global = true, env = "CONTEXTIFYER_LABELS_FILE")]
    labels_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP service
    Serve {
        /// Listen address (overrides server.addr)
        #[arg(long)]
        addr: Option<String>,
    },

    /// Rewrite a markdown file or every markdown file under a directory
    Batch {
        /// Input file or directory
        input: PathBuf,

        /// Output file or directory
        #[arg(short, long)]
        output: PathBuf,

        /// Extension of files picked up from directories (overrides batch.extension)
        #[arg(long)]
        extension: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite one document and print it
    Transform {
        /// Input file ("-" or omitted for stdin)
        input: Option<PathBuf>,

        /// Print the rewritten text and the links as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look up a single phrase
    Match {
        /// Phrase to match
        text: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the normalized label map
    Labels {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let level = level.as_str().to_lowercase();

    let filter = EnvFilter::new(format!(
        "contextifyer={level},contextifyer_core={level},tower_http={level},hyper=warn,reqwest=warn"
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // stdout carries command output
        .init();

    debug!("Contextifyer v{} starting...", env!("CARGO_PKG_VERSION"));

    let settings = cli::helpers::load_settings(cli.config.as_deref(), cli.labels_file)?;

    match cli.command {
        Commands::Serve { addr } => cli::serve::handle(settings, addr).await,
        Commands::Batch {
            input,
            output,
            extension,
            json,
        } => cli::batch::handle(settings, input, output, extension, json).await,
        Commands::Transform { input, json } => cli::transform::handle(settings, input, json).await,
        Commands::Match { text, json } => cli::match_cmd::handle(settings, text, json).await,
        Commands::Labels { json } => cli::labels::handle(settings, json).await,
        Commands::Config => cli::config::handle(&settings, cli.config.as_deref()),
    }
}
