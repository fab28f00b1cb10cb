//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Which [`ConfigStore`](crate::config_storage::ConfigStore) backs the site document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    File,
    Memory,
}

impl std::str::FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => bail!("unknown store kind '{other}' (expected 'file' or 'memory')"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// JSON file holding the site document (default: .tmp/site-config.json).
    pub config_path: PathBuf,

    /// Store backend (default: file).
    pub store: StoreKind,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Optional directory of page templates overriding the built-in ones.
    pub templates_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let config_path = env::var("VETRINA_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".tmp/site-config.json"));

        let store = env::var("VETRINA_STORE")
            .unwrap_or_else(|_| "file".to_string())
            .parse()
            .context("VETRINA_STORE must be 'file' or 'memory'")?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let templates_dir = env::var("TEMPLATES_DIR").ok().map(PathBuf::from);

        Ok(Self {
            port,
            config_path,
            store,
            cors_allowed_origins,
            templates_dir,
        })
    }

    /// In-memory configuration for tests.
    pub fn for_tests() -> Self {
        Self {
            port: 0,
            config_path: PathBuf::from(".tmp/site-config.json"),
            store: StoreKind::Memory,
            cors_allowed_origins: vec!["*".to_string()],
            templates_dir: None,
        }
    }
}
