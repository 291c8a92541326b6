//! FIFI CLI, the main entry point.
//!
//! Commands:
//! - `chat`     Interactive conversation in the terminal
//! - `ask`      Answer a single question and exit
//! - `serve`    Start the HTTP chat gateway
//! - `crawl`    Rebuild the URL corpus from the university site
//! - `sources`  Show which corpus pages match a question
//! - `onboard`  Write a starter config file

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "fifi",
    about = "FIFI: IU South Bend Information Assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with FIFI interactively
    Chat,

    /// Ask a single question
    Ask {
        /// The question to answer
        #[arg(short, long)]
        message: String,
    },

    /// Start the HTTP chat gateway
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Crawl the university site and write the URL corpus
    Crawl {
        /// Output file (defaults to the configured corpus path)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,

        /// Maximum number of pages to visit
        #[arg(long)]
        max_pages: Option<usize>,
    },

    /// List the corpus pages most relevant to a question
    Sources {
        /// The question to rank pages for
        query: String,

        /// How many pages to show
        #[arg(short, long, default_value_t = fifi_knowledge::LISTING_LIMIT)]
        limit: usize,
    },

    /// Initialize configuration
    Onboard,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // `chat` keeps the terminal quiet unless asked otherwise
    let default_level = match (&cli.command, cli.verbose) {
        (_, true) => "debug",
        (Commands::Chat, false) => "warn",
        _ => "info",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Chat => commands::chat::run().await?,
        Commands::Ask { message } => commands::ask::run(message).await?,
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Crawl { output, max_pages } => commands::crawl::run(output, max_pages).await?,
        Commands::Sources { query, limit } => commands::sources::run(query, limit).await?,
        Commands::Onboard => commands::onboard::run().await?,
    }

    Ok(())
}
