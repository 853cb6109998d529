//! Config Admin - configuration management console

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config_admin::{
    api::{build_router, AppState},
    config::{get_data_dir, load_config, load_config_from, save_config, AppConfig, LoggingConfig},
    db::init_database,
};

#[derive(Parser)]
#[command(name = "config-admin")]
#[command(version)]
#[command(about = "Configuration management console for projects, environments and labels")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to <config dir>/config-admin/config.toml)
    #[arg(short, long, env = "CONFIG_ADMIN_CONFIG")]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Database path (defaults to <data dir>/config-admin/data.db)
    #[arg(short, long)]
    database: Option<String>,

    /// Prefix for the management endpoints, e.g. /admin
    #[arg(long)]
    context_path: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Serve,
    /// Initialize the database
    Init,
    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the default config file
        #[arg(long)]
        save: bool,
    },
}

impl Cli {
    /// Command-line flags win over the file and the environment
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(database) = &self.database {
            config.database.path = Some(database.clone());
        }
        if let Some(context_path) = &self.context_path {
            config.server.context_path = context_path.clone();
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| logging.filter.as_str().into());
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    cli.apply_overrides(&mut config);

    init_tracing(&config.logging);

    let db_path = config.database.get_path().to_string_lossy().to_string();

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing database at: {}", db_path);
            let pool = init_database(&db_path).await?;
            pool.close().await;
            println!("Database initialized successfully!");
            return Ok(());
        }
        Some(Commands::Config { save }) => {
            println!("# Data directory: {}", get_data_dir().display());
            println!("# Database path: {}", db_path);
            println!("{}", toml::to_string_pretty(&config)?);
            if save {
                let path = save_config(&config)?;
                println!("# Saved to {}", path.display());
            }
            return Ok(());
        }
        Some(Commands::Serve) | None => {}
    }

    run_server(config, &db_path).await
}

async fn run_server(config: AppConfig, db_path: &str) -> anyhow::Result<()> {
    tracing::info!("Initializing database at: {}", db_path);
    let pool = init_database(db_path).await?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let context_path = config.server.normalized_context_path();

    let app = build_router(AppState::new(pool.clone(), config));

    tracing::info!(
        "Starting server on {} (management endpoints under '{}/')",
        addr,
        context_path
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
