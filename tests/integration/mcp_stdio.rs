// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A scripted MCP session through the stdio line loop.

use std::sync::Arc;

use outlook_mcp::api::mcp_stdio::serve;
use outlook_mcp::mcp::{McpHandler, OutlookMcpHandler};
use serde_json::{json, Value};
use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt};

use super::support::{dispatcher_for, graph_message};

async fn session(server: &mockito::ServerGuard, requests: &[Value]) -> Vec<Value> {
    let handler: Arc<dyn McpHandler> =
        Arc::new(OutlookMcpHandler::new(dispatcher_for(server, None)));

    let (mut client, service) = duplex(64 * 1024);
    let (service_read, service_write) = tokio::io::split(service);
    let task = tokio::spawn(serve(handler, service_read, service_write));

    for request in requests {
        client
            .write_all(format!("{}\n", request).as_bytes())
            .await
            .unwrap();
    }
    client.shutdown().await.unwrap();

    let mut output = String::new();
    client.read_to_string(&mut output).await.unwrap();
    task.await.unwrap().unwrap();

    output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn full_session_over_stdio() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/me/messages/M1")
        .match_header("authorization", "Bearer T1")
        .with_status(200)
        .with_body(graph_message("M1").to_string())
        .create_async()
        .await;

    let responses = session(
        &server,
        &[
            json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize",
                    "params": { "protocolVersion": "2024-11-05", "capabilities": {} } }),
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
            json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }),
            json!({ "jsonrpc": "2.0", "id": 3, "method": "tools/call",
                    "params": { "name": "get_email", "arguments": { "message_id": "M1" } } }),
            json!({ "jsonrpc": "2.0", "id": 4, "method": "tools/call",
                    "params": { "name": "set_access_token", "arguments": { "access_token": "T1" } } }),
            json!({ "jsonrpc": "2.0", "id": 5, "method": "tools/call",
                    "params": { "name": "get_email", "arguments": { "message_id": "M1" } } }),
        ],
    )
    .await;

    // The notification gets no line of its own.
    assert_eq!(responses.len(), 5);

    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "outlook-mcp");

    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        [
            "set_access_token",
            "list_emails",
            "get_email",
            "search_emails",
            "mark_as_read",
            "delete_email"
        ]
    );

    assert_eq!(responses[2]["id"], 3);
    assert_eq!(responses[2]["error"]["code"], -32602);
    assert!(responses[2]["error"]["message"]
        .as_str()
        .unwrap()
        .contains("set_access_token"));

    assert_eq!(
        responses[3]["result"]["content"][0]["text"],
        "Access token has been set successfully."
    );

    let text = responses[4]["result"]["content"][0]["text"].as_str().unwrap();
    let detail: Value = serde_json::from_str(text).unwrap();
    assert_eq!(detail["id"], "M1");
    assert_eq!(detail["bodyType"], "preview");
}

#[tokio::test]
async fn garbage_and_unknown_methods_get_protocol_errors() {
    let server = mockito::Server::new_async().await;
    let handler: Arc<dyn McpHandler> =
        Arc::new(OutlookMcpHandler::new(dispatcher_for(&server, None)));

    let input = "not json\n{\"jsonrpc\":\"2.0\",\"id\":9,\"method\":\"resources/list\"}\n";
    let mut output = Vec::new();
    serve(handler, input.as_bytes(), &mut output).await.unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines[0]["error"]["code"], -32700);
    assert_eq!(lines[0]["id"], Value::Null);
    assert_eq!(lines[1]["error"]["code"], -32601);
    assert_eq!(lines[1]["id"], 9);
}
