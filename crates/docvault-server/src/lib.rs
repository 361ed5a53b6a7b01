//! Bootstrap pieces for the docvault server: configuration loading and the
//! fully layered application router.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use docvault_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Environment variable prefix, e.g. `DOCVAULT_PORT=9000`.
pub const ENV_PREFIX: &str = "DOCVAULT";

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Layer the optional TOML file at `path` under `DOCVAULT_*` environment
/// variables, on top of built-in defaults.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080)?
    .set_default("store_path", "docvault.db")?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix(ENV_PREFIX))
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router with HTTP request tracing attached.
pub fn app(store: SqliteStore) -> Router {
  docvault_api::router(Arc::new(store)).layer(TraceLayer::new_for_http())
}
