//! fetch_webpage_text tool implementation.

use ego_tree::NodeRef;
use html5ever::driver::{self, ParseOpts};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use schemars::JsonSchema;
use scraper::{Html, HtmlTreeSink, Node};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::WebError;
use crate::http::HttpClient;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Elements whose whole subtree is dropped before text extraction.
const EXCLUDED_ELEMENTS: &[&str] = &["script", "style", "nav", "footer", "header", "aside"];

/// Returned when a page has no text left after extraction.
pub const NO_TEXT: &str = "Could not extract any text content from the page.";

/// Appended when extracted text was cut at the character limit.
const TRUNCATION_MARKER: &str = "...";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Input for the fetch_webpage_text tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FetchInput {
    /// The URL of the webpage to fetch.
    pub url: String,
}

/// Fetches HTML pages and reduces them to plain text.
#[derive(Debug, Clone)]
pub struct FetchTool {
    http: HttpClient,
    max_chars: usize,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl FetchTool {
    pub fn new(config: &Config, http: HttpClient) -> Self {
        Self {
            http,
            max_chars: config.max_fetch_chars,
        }
    }

    /// Fetch `url` and return its text. Never fails; errors become text.
    pub async fn fetch(&self, url: &str) -> String {
        match self.run(url).await {
            Ok(text) => text,
            Err(err @ WebError::ContentTypeMismatch(_)) => {
                tracing::debug!(%url, error = %err, "skipping non-HTML response");
                format!("Error: {err}")
            }
            Err(err) => {
                tracing::warn!(%url, code = err.code(), error = %err, "webpage fetch failed");
                format!("Error fetching webpage {url}: {err}")
            }
        }
    }

    async fn run(&self, url: &str) -> Result<String, WebError> {
        let response = self.http.get(url, None).await?;

        let content_type = response.content_type().unwrap_or_default().trim();
        if !content_type.to_lowercase().contains("text/html") {
            return Err(WebError::ContentTypeMismatch(content_type.to_string()));
        }

        let text = extract_text(&response.body);
        if text.is_empty() {
            return Ok(NO_TEXT.to_string());
        }

        Ok(truncate_chars(&text, self.max_chars))
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Extract visible text from an HTML document.
///
/// Text nodes are trimmed and joined with single spaces, skipping the
/// subtrees of [`EXCLUDED_ELEMENTS`], then whitespace is normalized.
/// `<template>` contents are included.
pub fn extract_text(html: &str) -> String {
    let document = parse_html(html);
    let mut fragments = Vec::new();
    collect_text(document.tree.root(), &mut fragments);
    normalize_whitespace(&fragments.join(" "))
}

/// Parse a document with scripting disabled, so `<noscript>` children are
/// built as elements instead of one raw text node.
fn parse_html(html: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    driver::parse_document(HtmlTreeSink::new(Html::new_document()), opts).one(html)
}

fn collect_text<'a>(node: NodeRef<'a, Node>, out: &mut Vec<&'a str>) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    out.push(text);
                }
            }
            Node::Element(el) if EXCLUDED_ELEMENTS.contains(&el.name()) => {}
            // Template contents hang off the element as a fragment node.
            Node::Element(_) | Node::Fragment => collect_text(child, out),
            _ => {}
        }
    }
}

/// Collapse every whitespace run into one space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep the first `limit` characters, marking the cut with `...`.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &text[..cut]),
        None => text.to_string(),
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
