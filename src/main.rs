use std::path::PathBuf;

use axum::extract::FromRef;
use clap::Parser;

mod config;
use config::Config;

mod error;
pub(crate) use error::ApiResult;

mod commands {
    pub mod serve;
    pub mod sweep;
}

mod controllers {
    pub mod paste;
}

mod keys;
mod models;

mod store;
use store::PasteStore;

mod views;

/// Share text with a link that works for a day.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on, overriding the config file.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[derive(Clone, FromRef)]
pub struct App {
    pub config: Config,
    pub store: PasteStore,
}

impl App {
    pub fn new(config: Config) -> Self {
        let store = PasteStore::new(config.pastes.id_length);
        App { config, store }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.port = port;
    }

    commands::serve::run(App::new(config)).await
}
