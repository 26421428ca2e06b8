use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use concordia_search::Config;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "concordia", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the database (default: ~/.local/share/concordia/concordia.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Add a document to the corpus
    ///
    /// Validates the title and body, refuses a title that is already
    /// taken (comparison is case-insensitive), embeds the body with the
    /// configured Ollama model and stores the document. The first add
    /// after Ollama starts can take up to two minutes while the model
    /// loads; later calls are fast.
    Add {
        /// Document title (unique, at most 500 characters)
        title: String,
        /// Document body; this is the text that gets embedded
        body: String,
        /// Optional reference to a source image
        #[arg(long)]
        image: Option<String>,
    },
    /// Search the corpus semantically
    ///
    /// Free text is embedded as-is. A query that looks like a Bible
    /// citation ("Lucas 2:15", "jo 3 16") is resolved to the verse text
    /// first and that text is embedded instead, so a citation finds
    /// documents about the verse's meaning rather than documents that
    /// merely mention the reference. A citation that cannot be resolved
    /// is an error; it does not fall back to free-text search.
    Search {
        /// Free text or a citation such as "Sl 23:1"
        query: String,
    },
    /// List all documents, newest first
    List,
    /// Show a single document in full
    Show {
        /// Document id
        id: String,
    },
    /// Replace a document's title and body (the body is re-embedded)
    Edit {
        /// Document id
        id: String,
        /// New title
        title: String,
        /// New body
        body: String,
    },
    /// Delete a document
    Delete {
        /// Document id
        id: String,
    },
    /// Show corpus statistics and embedding provider health
    Status,
    /// Show or initialize the configuration file
    Config {
        /// Write a commented example config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::load_with_db_path(cli.db)?;

    // Ensure database directory exists
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    match cli.command {
        Commands::Add { title, body, image } => {
            commands::run_add(&config, &title, &body, image).await?;
        }
        Commands::Search { query } => {
            commands::run_search(&config, &query).await?;
        }
        Commands::List => {
            commands::run_list(&config)?;
        }
        Commands::Show { id } => {
            commands::run_show(&config, &id)?;
        }
        Commands::Edit { id, title, body } => {
            commands::run_edit(&config, &id, &title, &body).await?;
        }
        Commands::Delete { id } => {
            commands::run_delete(&config, &id)?;
        }
        Commands::Status => {
            commands::run_status(&config).await?;
        }
        Commands::Config { init } => {
            commands::run_config(&config, init)?;
        }
    }

    Ok(())
}
