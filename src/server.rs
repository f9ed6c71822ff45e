//! MCP server implementation.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::{
    ServerHandler,
    handler::server::tool::ToolRouter,
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::config::Config;
use crate::error::WebError;
use crate::http::HttpClient;
use crate::tools::{FetchInput, FetchTool, SearchInput, SearchTool};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Web utilities MCP server.
#[derive(Clone)]
pub struct Server {
    tool_router: ToolRouter<Self>,
    search: SearchTool,
    fetch: FetchTool,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Server {
    /// Create a server whose tools share one HTTP client built from `config`.
    pub fn new(config: &Config) -> Result<Self, WebError> {
        let http = HttpClient::new(config)?;
        Ok(Self {
            tool_router: Self::tool_router(),
            search: SearchTool::new(config, http.clone()),
            fetch: FetchTool::new(config, http),
        })
    }

    /// Public wrapper for brave_search (for testing).
    pub async fn search(&self, query: &str) -> String {
        self.search.search(query).await
    }

    /// Public wrapper for fetch_webpage_text (for testing).
    pub async fn fetch(&self, url: &str) -> String {
        self.fetch.fetch(url).await
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations: Tool Router
//--------------------------------------------------------------------------------------------------

#[tool_router]
impl Server {
    /// Search the web with the Brave Search API.
    #[tool(
        name = "brave_search",
        description = "Performs a web search using the Brave Search API and returns the top results (title, URL, snippet) as text, or an error message."
    )]
    async fn brave_search(&self, params: Parameters<SearchInput>) -> String {
        let input: SearchInput = params.0;
        self.search.search(&input.query).await
    }

    /// Fetch a webpage and return its main text content.
    #[tool(
        name = "fetch_webpage_text",
        description = "Fetches a webpage and extracts its main text content, dropping scripts, styles and navigation. Returns the text (up to a limit) or an error message."
    )]
    async fn fetch_webpage_text(&self, params: Parameters<FetchInput>) -> String {
        let input: FetchInput = params.0;
        self.fetch.fetch(&input.url).await
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations: Server Handler
//--------------------------------------------------------------------------------------------------

#[tool_handler]
impl ServerHandler for Server {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Web utilities: use brave_search to look things up on the web and \
                 fetch_webpage_text to read the text of a specific page."
                    .into(),
            ),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_registers_both_tools() {
        let server = Server::new(&Config::default()).unwrap();
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["brave_search", "fetch_webpage_text"]);
    }

    #[test]
    fn test_server_info_enables_tools() {
        let server = Server::new(&Config::default()).unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.is_some());
    }
}
