//! Web Utilities MCP Server
//!
//! An MCP server exposing two text-returning tools to language models:
//!
//! - **brave_search**: query the Brave Search API and get a numbered list of results
//! - **fetch_webpage_text**: fetch an HTML page and get its readable text, with
//!   scripts, styles and page chrome removed
//!
//! Both tools always answer with a string. Failures (missing credential, network
//! errors, non-HTML pages) are rendered as readable messages rather than
//! protocol errors, so the calling model can react to them.

pub mod config;
pub mod error;
pub mod http;
pub mod server;
pub mod tools;

pub use config::Config;
pub use error::WebError;
pub use http::{HttpClient, HttpResponse};
pub use server::Server;
pub use tools::{FetchInput, FetchTool, SearchInput, SearchResultItem, SearchTool};
