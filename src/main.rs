//! Web Utilities MCP Server.
//!
//! Usage:
//!   web-utils [--max-search-results N] [--max-fetch-chars N] [--timeout-secs N]
//!
//! The Brave Search credential is read from `BRAVE_API_KEY` (a `.env` file in
//! the working directory is honored).

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::{self, EnvFilter};

use web_utils::config::{
    API_KEY_ENV, DEFAULT_MAX_FETCH_CHARS, DEFAULT_MAX_SEARCH_RESULTS, DEFAULT_SEARCH_ENDPOINT,
    DEFAULT_TIMEOUT_SECS,
};
use web_utils::{Config, Server};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "web-utils")]
#[command(about = "MCP server with Brave web search and webpage text extraction")]
struct Cli {
    /// Brave Search API key.
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Number of search results to request and return.
    #[arg(long, env = "WEB_UTILS_MAX_SEARCH_RESULTS", default_value_t = DEFAULT_MAX_SEARCH_RESULTS)]
    max_search_results: usize,

    /// Character budget for extracted webpage text.
    #[arg(long, env = "WEB_UTILS_MAX_FETCH_CHARS", default_value_t = DEFAULT_MAX_FETCH_CHARS)]
    max_fetch_chars: usize,

    /// Search API endpoint.
    #[arg(long, env = "WEB_UTILS_SEARCH_ENDPOINT", default_value = DEFAULT_SEARCH_ENDPOINT)]
    search_endpoint: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "WEB_UTILS_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Cli {
    fn into_config(self) -> Config {
        Config {
            max_search_results: self.max_search_results,
            max_fetch_chars: self.max_fetch_chars,
            search_endpoint: self.search_endpoint,
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..Config::default()
        }
        .with_api_key(self.api_key)
    }
}

//--------------------------------------------------------------------------------------------------
// Functions: Main
//--------------------------------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may already be set.
    let dotenv = dotenvy::dotenv();

    // Logging to stderr only (stdout is reserved for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    if let Ok(path) = &dotenv {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    let config = Cli::parse().into_config();
    if !config.has_api_key() {
        tracing::warn!(
            "{} environment variable not set. Brave search tool will not work. \
             Create a .env file with {}=YOUR_KEY",
            API_KEY_ENV,
            API_KEY_ENV
        );
    }

    tracing::info!("Starting Web Utils MCP Server on stdio");

    let server = Server::new(&config)?;

    // Set up graceful shutdown
    let shutdown = Arc::new(tokio::sync::Notify::new());
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Received shutdown signal");
        shutdown_clone.notify_one();
    });

    let service = server.serve(stdio()).await?;

    tokio::select! {
        result = service.waiting() => {
            result?;
        }
        _ = shutdown.notified() => {
            tracing::info!("Shutting down");
        }
    }

    tracing::info!("Web Utils MCP Server stopped");
    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
