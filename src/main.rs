//! Moneybear: visual search for second-hand products

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use moneybear::{config::{Config, SearchMode}, logging::init_logging};

use commands::SearchArgs;

#[derive(Parser)]
#[command(name = "moneybear")]
#[command(about = "Image search proxy and mock catalog for second-hand products")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "moneybear.toml")]
    config: PathBuf,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the search API
    Serve {
        /// Listen address
        #[arg(short, long)]
        listen: Option<String>,

        /// Search backend (passthrough, catalog)
        #[arg(short, long)]
        mode: Option<SearchMode>,
    },

    /// Write a default configuration file
    Init {
        /// Output directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Search a running server with an image file
    Search {
        /// JPG, PNG or WebP image
        image: PathBuf,

        /// Server base URL (defaults to the configured listen address)
        #[arg(short, long)]
        server: Option<String>,

        /// Refine the search with this caption (passthrough only)
        #[arg(long)]
        caption: Option<String>,

        /// Number of pages to load (catalog only)
        #[arg(short, long, default_value = "1")]
        pages: u32,

        /// Request format (passthrough, catalog)
        #[arg(short, long)]
        mode: Option<SearchMode>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config)?;
    init_logging(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Serve { listen, mode } => commands::serve(config, listen, mode).await,
        Commands::Init { path } => commands::init_config(path).await,
        Commands::Search {
            image,
            server,
            caption,
            pages,
            mode,
            json,
        } => {
            let args = SearchArgs {
                image,
                server,
                caption,
                pages,
                mode,
                json,
            };
            commands::search_image(config, args).await
        }
    }
}
