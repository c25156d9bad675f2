use std::path::PathBuf;

use clap::Parser;
use roster_http::codec::{Limits, MAX_BODY_BYTES};
use tracing_subscriber::EnvFilter;

use crate::server::DispatchMode;

/// Serve static files and a small record roster over HTTP/1.1.
#[derive(Debug, Clone, Parser)]
#[command(name = "roster", version, about, long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "ROSTER_ADDRESS", default_value = "0.0.0.0:8080")]
    pub address: String,

    /// Document root holding static content and the page templates
    #[arg(long, env = "ROSTER_ROOT", default_value = "www-data")]
    pub root: PathBuf,

    /// JSON file the records are stored in
    #[arg(long, env = "ROSTER_STORE", default_value = "db.json")]
    pub store: PathBuf,

    /// How accepted connections are dispatched
    #[arg(long, env = "ROSTER_MODE", value_enum, default_value_t = DispatchMode::Sequential)]
    pub mode: DispatchMode,

    /// Largest request body accepted, in bytes
    #[arg(long, env = "ROSTER_MAX_BODY_BYTES", default_value_t = MAX_BODY_BYTES)]
    pub max_body_bytes: u64,

    /// Log filter, e.g. `debug` or `roster_http=trace`; overrides RUST_LOG
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Config {
    pub fn limits(&self) -> Limits {
        Limits { max_body_bytes: self.max_body_bytes, ..Limits::default() }
    }

    /// `--log-level` if given, else `RUST_LOG`, else `info`.
    pub fn env_filter(&self) -> EnvFilter {
        match &self.log_level {
            Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_invalid| EnvFilter::new("info")),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_missing| EnvFilter::new("info")),
        }
    }
}
