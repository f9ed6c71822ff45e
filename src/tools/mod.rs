//! MCP tool implementations.

mod fetch;
mod search;

pub use fetch::{FetchInput, FetchTool, NO_TEXT, extract_text, normalize_whitespace, truncate_chars};
pub use search::{NO_RESULTS, SearchInput, SearchResultItem, SearchTool};
