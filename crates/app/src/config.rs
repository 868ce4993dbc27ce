use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/libretto.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub owner: String,
    pub listen: String,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            owner: String::new(),
            listen: "127.0.0.1:8080".to_string(),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "libretto")]
#[command(about = "Personal ledger over a remote document store")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override store base URL (e.g. http://127.0.0.1:8080).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the owner id operations are scoped to.
    #[arg(long)]
    owner: Option<String>,
    /// Override log level (trace|debug|info|warn|error).
    #[arg(long)]
    level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the owner's transactions.
    List,
    /// Print income total, expense total, and balance.
    Summary,
    /// Add a transaction.
    Add(AddArgs),
    /// Replace a transaction record whole, keyed by id.
    Update(UpdateArgs),
    /// Delete a transaction by id.
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Run the local dev document store.
    Serve {
        /// Bind address, e.g. 127.0.0.1:8080.
        #[arg(long)]
        listen: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Label; defaults to the category name when omitted.
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long)]
    pub category: String,
    /// Decimal amount, e.g. 12.50.
    #[arg(long)]
    pub amount: String,
    /// income | expense
    #[arg(long)]
    pub kind: String,
    /// dd-mm-yyyy; defaults to today.
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub category: String,
    /// Decimal amount, e.g. 12.50.
    #[arg(long)]
    pub amount: String,
    /// income | expense
    #[arg(long)]
    pub kind: String,
    /// dd-mm-yyyy
    #[arg(long)]
    pub date: String,
}

pub fn load() -> Result<(AppConfig, Command), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("LIBRETTO"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }
    if let Some(owner) = cli.owner {
        settings.owner = owner;
    }
    if let Some(level) = cli.level {
        settings.level = level;
    }

    Ok((settings, cli.command))
}
