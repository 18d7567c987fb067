//! Solace CLI - journal entries in, supportive replies out

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use solace::config::Config;
use solace::error::Result;
use solace::memory::{MemoryStore, UserId};
use solace::providers::{LocalEmbedder, RemoteGenerator};
use solace::reply::ReplyPipeline;
use solace::storage::FileBlobStore;

/// Solace - An emotionally supportive journaling companion
#[derive(Parser)]
#[command(name = "solace")]
#[command(about = "An emotionally supportive journaling companion")]
#[command(version)]
pub struct Cli {
    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Index a new journal entry
    Journal {
        /// User the entry belongs to
        #[arg(long, short = 'u')]
        user: String,

        /// The journal text
        text: String,
    },

    /// Ask for a reply grounded in the most recent journal entry
    Chat {
        /// User asking the question
        #[arg(long, short = 'u')]
        user: String,

        /// The question or message
        message: String,
    },

    /// List a user's remembered journal entries
    History {
        /// User whose entries to list
        #[arg(long, short = 'u')]
        user: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Journal { user, text } => journal(cli.config, &user, &text).await,
        Command::Chat { user, message } => chat(cli.config, &user, &message).await,
        Command::History { user } => history(cli.config, &user).await,
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,solace=debug"));

    // Replies go to stdout; keep logs on stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    if let Some(path) = config_path {
        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(&path).map_err(|e| {
            solace::SolaceError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| solace::SolaceError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    } else {
        let default_paths = [
            dirs::home_dir().map(|h| h.join(".solace").join("config.toml")),
            dirs::config_dir().map(|c| c.join("solace").join("config.toml")),
            Some(PathBuf::from("config.toml")),
        ];

        for path_opt in default_paths.iter().flatten() {
            if path_opt.exists() {
                tracing::info!("Loading config from: {}", path_opt.display());
                let content = std::fs::read_to_string(path_opt).map_err(|e| {
                    solace::SolaceError::Config(format!(
                        "Failed to read config file {}: {}",
                        path_opt.display(),
                        e
                    ))
                })?;
                let config: Config = toml::from_str(&content).map_err(|e| {
                    solace::SolaceError::Config(format!("Failed to parse config: {e}"))
                })?;
                return Ok(config);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }
}

fn parse_user(user: &str) -> Result<UserId> {
    UserId::try_from(user)
        .map_err(|e| solace::SolaceError::Config(format!("invalid --user value: {e}")))
}

fn build_store(config: &Config) -> Result<Arc<MemoryStore>> {
    let blobs = Arc::new(FileBlobStore::new(&config.storage.data_dir)?);

    tracing::info!("Initializing embedding model (this may take a moment on first run)...");
    let embedder = Arc::new(LocalEmbedder::new(&config.embedding)?);

    Ok(Arc::new(MemoryStore::new(blobs, embedder)))
}

async fn journal(config_path: Option<PathBuf>, user: &str, text: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let user_id = parse_user(user)?;
    let store = build_store(&config)?;

    store.append(&user_id, text).await?;

    let count = store.all(&user_id).await.len();
    println!("Saved journal entry ({count} remembered).");
    Ok(())
}

async fn chat(config_path: Option<PathBuf>, user: &str, message: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let user_id = parse_user(user)?;
    let store = build_store(&config)?;
    let generator = Arc::new(RemoteGenerator::new(&config.generation)?);

    let pipeline = ReplyPipeline::new(store, generator);
    let reply = pipeline.respond(&user_id, message).await;

    println!("{reply}");
    Ok(())
}

async fn history(config_path: Option<PathBuf>, user: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let user_id = parse_user(user)?;
    let store = build_store(&config)?;

    let records = store.all(&user_id).await;
    if records.is_empty() {
        println!("No journal entries yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["Created", "Entry"]);

    for record in &records {
        table.add_row([
            record.created_at.format("%Y-%m-%d %H:%M").to_string(),
            truncate_string(&record.text, 70),
        ]);
    }

    println!("{table}");
    println!("\nTotal: {} entries", records.len());
    Ok(())
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
