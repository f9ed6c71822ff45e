//! Drives the server through a real MCP client over an in-memory duplex pipe.

use axum::{Router, http::header, routing::get};
use rmcp::{
    ServiceExt,
    model::CallToolRequestParam,
    service::{RoleClient, RunningService},
};
use web_utils::{Config, Server};

async fn connect(config: &Config) -> RunningService<RoleClient, ()> {
    let (server_io, client_io) = tokio::io::duplex(64 * 1024);
    let server = Server::new(config).unwrap();
    tokio::spawn(async move {
        let service = server.serve(server_io).await.unwrap();
        let _ = service.waiting().await;
    });
    ().serve(client_io).await.unwrap()
}

async fn call_text(
    client: &RunningService<RoleClient, ()>,
    name: &'static str,
    args: serde_json::Value,
) -> String {
    let result = client
        .call_tool(CallToolRequestParam {
            name: name.into(),
            arguments: args.as_object().cloned(),
        })
        .await
        .unwrap();
    assert_ne!(result.is_error, Some(true));
    result
        .content
        .iter()
        .filter_map(|c| c.as_text().map(|t| t.text.clone()))
        .collect::<Vec<_>>()
        .join("")
}

#[tokio::test]
async fn test_lists_both_tools() {
    let client = connect(&Config::default()).await;

    let mut names: Vec<String> = client
        .list_all_tools()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name.to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["brave_search", "fetch_webpage_text"]);

    client.cancel().await.unwrap();
}

#[tokio::test]
async fn test_search_error_is_text_content() {
    let client = connect(&Config::default()).await;

    let text = call_text(&client, "brave_search", serde_json::json!({ "query": "rust" })).await;
    assert_eq!(
        text,
        "Error: Brave Search API key (BRAVE_API_KEY) is not configured."
    );

    client.cancel().await.unwrap();
}

#[tokio::test]
async fn test_fetch_returns_page_text() {
    let app = Router::new().route(
        "/",
        get(|| async {
            (
                [(header::CONTENT_TYPE, "text/html")],
                "<html><body><header>Top</header><p>Page   body</p></body></html>",
            )
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = connect(&Config::default()).await;
    let text = call_text(
        &client,
        "fetch_webpage_text",
        serde_json::json!({ "url": format!("http://{addr}/") }),
    )
    .await;
    assert_eq!(text, "Page body");

    client.cancel().await.unwrap();
}
