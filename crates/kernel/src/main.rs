//! Vetrina Kernel
//!
//! HTTP server and document maintenance commands.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use clap::{Parser, Subcommand};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use vetrina_kernel::config::Config;
use vetrina_kernel::config_storage::{export_json, import_json};
use vetrina_kernel::content::BlockRegistry;
use vetrina_kernel::routes;
use vetrina_kernel::routes::helpers::warn_duplicate_slugs;
use vetrina_kernel::state::{AppState, open_store};

#[derive(Parser)]
#[command(name = "vetrina", version, about = "Block-based page builder")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Write the current site document as JSON.
    Export {
        /// Output file; stdout when absent.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the site document with the contents of a JSON file.
    Import {
        /// Path to the JSON document.
        file: PathBuf,
    },
    /// List the registered block types.
    Blocks,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Export { output } => export(&config, output.as_deref()).await,
        Command::Import { file } => import(&config, &file).await,
        Command::Blocks => {
            list_blocks();
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting Vetrina kernel");
    info!(port = config.port, "Configuration loaded");

    let state = AppState::new(&config).context("failed to initialize application state")?;

    let site = state.store().load().await;
    info!(
        pages = site.pages.len(),
        block_types = state.registry().len(),
        "Site document loaded"
    );
    warn_duplicate_slugs(&site);

    let cors = build_cors_layer(&config);

    let app = routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind to address")?;

    info!(%addr, "Server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

async fn export(config: &Config, output: Option<&Path>) -> Result<()> {
    let store = open_store(config);
    let site = store.load().await;
    let json = export_json(&site).context("failed to serialize site document")?;

    match output {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "site document exported");
        }
        None => println!("{json}"),
    }
    Ok(())
}

async fn import(config: &Config, file: &Path) -> Result<()> {
    let raw = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let site = import_json(&raw)
        .with_context(|| format!("{} is not a site document", file.display()))?;
    warn_duplicate_slugs(&site);

    let pages = site.pages.len();
    let store = open_store(config);
    store.save(site).await.context("failed to save site document")?;
    info!(path = %file.display(), pages, "site document imported");
    Ok(())
}

fn list_blocks() {
    for definition in BlockRegistry::standard().list_definitions() {
        let fields: Vec<&str> = definition.fields.iter().map(|f| f.key.as_str()).collect();
        println!(
            "{:<16} {:<28} {}",
            definition.block_type,
            definition.label,
            fields.join(", ")
        );
    }
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::OPTIONS];

    if config.cors_allowed_origins.len() == 1 && config.cors_allowed_origins[0] == "*" {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(methods)
            .allow_headers(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %o, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(tower_http::cors::Any)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
